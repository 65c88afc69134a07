//! Categories and products.

use super::Api;
use crate::store::{Action, Store};
use crate::wire::{WireCategory, WireProduct, WireSubCategory};
use crate::ClientError;
use bazaar_commerce::catalog::{Category, Product, SubCategory};
use bazaar_commerce::{CategoryId, ProductId, SubCategoryId};
use futures::future::join_all;
use std::collections::BTreeMap;
use tracing::instrument;

/// Read-only catalog endpoints. None of them need a token.
#[derive(Debug, Clone)]
pub struct CatalogService {
    api: Api,
    store: Store,
}

impl CatalogService {
    pub fn new(api: Api, store: Store) -> Self {
        Self { api, store }
    }

    /// Load the category list into the store.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.store.emit(Action::CategoriesLoading);
        let result = self.fetch_categories().await;
        match &result {
            Ok(categories) => {
                tracing::debug!(count = categories.len(), "categories loaded");
                self.store.emit(Action::CategoriesLoaded(categories.clone()));
            }
            Err(e) => self.store.emit(Action::CategoriesFailed(e.display_message())),
        }
        result
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ClientError> {
        let categories: Vec<WireCategory> =
            self.api.send_list(self.api.http().get("/categories")).await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Subcategories of one category.
    #[instrument(skip(self, category_id), fields(category_id = %category_id))]
    pub async fn subcategories(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<SubCategory>, ClientError> {
        let path = format!("/categories/{}/subcategories", category_id);
        let subcategories: Vec<WireSubCategory> =
            self.api.send_list(self.api.http().get(path)).await?;
        Ok(subcategories.into_iter().map(Into::into).collect())
    }

    /// Load the product grid into the store.
    #[instrument(skip(self))]
    pub async fn products(
        &self,
        category: Option<&CategoryId>,
        subcategory: Option<&SubCategoryId>,
    ) -> Result<Vec<Product>, ClientError> {
        self.store.emit(Action::ProductsLoading);
        let result = self.fetch_products(category, subcategory).await;
        match &result {
            Ok(products) => {
                tracing::debug!(count = products.len(), "products loaded");
                self.store.emit(Action::ProductsLoaded(products.clone()));
            }
            Err(e) => self.store.emit(Action::ProductsFailed(e.display_message())),
        }
        result
    }

    async fn fetch_products(
        &self,
        category: Option<&CategoryId>,
        subcategory: Option<&SubCategoryId>,
    ) -> Result<Vec<Product>, ClientError> {
        let request = self
            .api
            .http()
            .get("/products")
            .query_opt("category", category.map(CategoryId::as_str))
            .query_opt("subcategory", subcategory.map(SubCategoryId::as_str));
        let products: Vec<WireProduct> = self.api.send_list(request).await?;
        let currency = self.api.currency();
        Ok(products
            .into_iter()
            .map(|p| p.into_product(currency))
            .collect())
    }

    /// One product, or `None` when the server answers with an empty body.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn product(&self, product_id: &ProductId) -> Result<Option<Product>, ClientError> {
        let request = self.api.http().get(format!("/products/{}", product_id));
        let product: Option<WireProduct> = self.api.send_object(request).await?;
        Ok(product.map(|p| p.into_product(self.api.currency())))
    }

    /// Fetch, concurrently, the first product image of each category.
    ///
    /// One request per category. A category whose request fails or whose
    /// products have no image is left out.
    #[instrument(skip_all, fields(categories = categories.len()))]
    pub async fn cover_images(
        &self,
        categories: &[Category],
    ) -> BTreeMap<CategoryId, String> {
        let lookups = categories.iter().map(|category| async move {
            match self.fetch_products(Some(&category.id), None).await {
                Ok(products) => products
                    .into_iter()
                    .find_map(|p| p.image_url)
                    .map(|url| (category.id.clone(), url)),
                Err(e) => {
                    tracing::debug!(category = %category.id, error = %e, "no cover image");
                    None
                }
            }
        });

        let images: BTreeMap<_, _> = join_all(lookups).await.into_iter().flatten().collect();
        self.store.emit(Action::CoverImagesLoaded(images.clone()));
        images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;
    use crate::store::LoadStatus;
    use bazaar_data::mock::{MockReply, MockTransport};
    use bazaar_data::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn service(transport: &Arc<MockTransport>) -> (Store, CatalogService) {
        let store = Store::default();
        (store.clone(), CatalogService::new(testing::api(transport), store))
    }

    #[tokio::test]
    async fn test_categories_bare_or_enveloped() {
        let transport = Arc::new(MockTransport::new());
        transport
            .on(
                Method::Get,
                "/categories",
                MockReply::json(200, json!([{"id": "men", "name": "Men"}])),
            )
            .on(
                Method::Get,
                "/categories",
                MockReply::json(
                    200,
                    json!({"success": true, "data": [{"id": "men", "name": "Men"}, {"id": "women", "name": "Women"}]}),
                ),
            );
        let (store, catalog) = service(&transport);

        assert_eq!(catalog.categories().await.unwrap().len(), 1);
        assert_eq!(catalog.categories().await.unwrap().len(), 2);

        let state = store.state();
        assert_eq!(state.catalog.categories.status, LoadStatus::Succeeded);
        assert_eq!(state.catalog.categories.items.len(), 2);
        assert!(transport.requests()[0].header("authorization").is_none());
    }

    #[tokio::test]
    async fn test_products_query_and_failure() {
        let transport = Arc::new(MockTransport::new());
        transport.on(Method::Get, "/products", MockReply::status(503));
        let (store, catalog) = service(&transport);

        let result = catalog
            .products(Some(&CategoryId::new("men")), Some(&SubCategoryId::new("kurtas")))
            .await;
        assert!(result.is_err());

        let request = &transport.requests()[0];
        assert_eq!(request.query_param("category").as_deref(), Some("men"));
        assert_eq!(request.query_param("subcategory").as_deref(), Some("kurtas"));

        let state = store.state();
        assert_eq!(state.catalog.products.status, LoadStatus::Failed);
        assert_eq!(
            state.catalog.products.error.as_deref(),
            Some("Something went wrong. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_single_product_enveloped() {
        let transport = Arc::new(MockTransport::new());
        transport.on(
            Method::Get,
            "/products/p-1",
            MockReply::json(200, json!({"data": {"id": "p-1", "name": "Kurta", "price": 799}})),
        );
        let (_, catalog) = service(&transport);

        let product = catalog.product(&ProductId::new("p-1")).await.unwrap().unwrap();
        assert_eq!(product.name, "Kurta");
        assert_eq!(product.price.amount_cents, 79900);
    }

    #[tokio::test]
    async fn test_cover_images_one_request_per_category() {
        let transport = Arc::new(MockTransport::new());
        transport
            .on(
                Method::Get,
                "/products",
                MockReply::json(
                    200,
                    json!([
                        {"id": 1, "name": "No image", "price": 10},
                        {"id": 2, "name": "Shirt", "price": 10, "imageUrl": "https://cdn/shirt.jpg"}
                    ]),
                ),
            )
            .on(Method::Get, "/products", MockReply::status(500));
        let (store, catalog) = service(&transport);
        let categories = vec![Category::new("men", "Men"), Category::new("kids", "Kids")];

        let images = catalog.cover_images(&categories).await;

        assert_eq!(transport.requests_to(Method::Get, "/products").len(), 2);
        assert_eq!(images.len(), 1);
        assert_eq!(images.values().next().map(String::as_str), Some("https://cdn/shirt.jpg"));
        assert_eq!(store.state().catalog.cover_images, images);
    }

    #[tokio::test]
    async fn test_subcategories() {
        let transport = Arc::new(MockTransport::new());
        transport.on(
            Method::Get,
            "/categories/men/subcategories",
            MockReply::json(200, json!({"data": [{"id": 3, "name": "Kurtas"}]})),
        );
        let (_, catalog) = service(&transport);

        let subs = catalog.subcategories(&CategoryId::new("men")).await.unwrap();
        assert_eq!(subs[0].id.as_str(), "3");
    }
}
