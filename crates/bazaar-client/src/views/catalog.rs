//! Category navigation, category tiles and product cards.

use super::discount_badge;
use crate::routes::Route;
use bazaar_commerce::catalog::{Category, Product};
use bazaar_commerce::{CategoryId, ProductId};
use serde::Serialize;
use std::collections::BTreeMap;

/// One entry in the category navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNavEntry {
    pub name: String,
    pub route: Route,
    pub active: bool,
    /// Subcategory links, shown under the category.
    pub children: Vec<CategoryNavEntry>,
}

/// Category navigation with the current selection highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNav {
    pub entries: Vec<CategoryNavEntry>,
}

impl CategoryNav {
    pub fn new(categories: &[Category], current: &Route) -> Self {
        let (selected_category, selected_subcategory) = match current {
            Route::Home {
                category,
                subcategory,
            } => (category.as_ref(), subcategory.as_ref()),
            _ => (None, None),
        };

        let entries = categories
            .iter()
            .map(|category| {
                let in_category = selected_category == Some(&category.id);
                let children = category
                    .subcategories
                    .iter()
                    .map(|sub| CategoryNavEntry {
                        name: sub.name.clone(),
                        route: Route::category(category.id.clone(), Some(sub.id.clone())),
                        active: in_category && selected_subcategory == Some(&sub.id),
                        children: Vec::new(),
                    })
                    .collect();
                CategoryNavEntry {
                    name: category.name.clone(),
                    route: Route::category(category.id.clone(), None),
                    active: in_category,
                    children,
                }
            })
            .collect();

        Self { entries }
    }

    /// Name of the selected category and subcategory, for the page title.
    pub fn breadcrumb(&self) -> Vec<&str> {
        let mut crumbs = Vec::new();
        if let Some(category) = self.entries.iter().find(|e| e.active) {
            crumbs.push(category.name.as_str());
            if let Some(sub) = category.children.iter().find(|e| e.active) {
                crumbs.push(sub.name.as_str());
            }
        }
        crumbs
    }
}

/// A tile on the category grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTile {
    pub id: CategoryId,
    pub name: String,
    /// The category's own image, else the prefetched cover image.
    pub image_url: Option<String>,
    pub route: Route,
}

impl CategoryTile {
    pub fn build_all(
        categories: &[Category],
        cover_images: &BTreeMap<CategoryId, String>,
    ) -> Vec<CategoryTile> {
        categories
            .iter()
            .map(|c| CategoryTile {
                id: c.id.clone(),
                name: c.name.clone(),
                image_url: c
                    .image_url
                    .clone()
                    .or_else(|| cover_images.get(&c.id).cloned()),
                route: Route::category(c.id.clone(), None),
            })
            .collect()
    }
}

/// A product in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub image_url: Option<String>,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_badge: Option<String>,
    /// Quantity already in the cart, `0` when absent.
    pub in_cart: i64,
}

impl ProductCard {
    pub fn new(product: &Product, in_cart: i64) -> Self {
        let discount = product.discount_percent();
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            price: product.price.display(),
            original_price: discount
                .and(product.original_price)
                .map(|p| p.display()),
            discount_badge: discount_badge(discount),
            in_cart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_commerce::catalog::SubCategory;
    use bazaar_commerce::{Currency, Money, SubCategoryId};

    fn categories() -> Vec<Category> {
        vec![
            Category::new("men", "Men").with_subcategories(vec![
                SubCategory::new("kurtas", "Kurtas"),
                SubCategory::new("shirts", "Shirts"),
            ]),
            Category::new("women", "Women"),
        ]
    }

    #[test]
    fn test_nav_marks_selection() {
        let route = Route::category(CategoryId::new("men"), Some(SubCategoryId::new("shirts")));
        let nav = CategoryNav::new(&categories(), &route);

        assert!(nav.entries[0].active);
        assert!(!nav.entries[1].active);
        assert!(!nav.entries[0].children[0].active);
        assert!(nav.entries[0].children[1].active);
        assert_eq!(nav.breadcrumb(), vec!["Men", "Shirts"]);

        let nav = CategoryNav::new(&categories(), &Route::Checkout);
        assert!(nav.breadcrumb().is_empty());
    }

    #[test]
    fn test_tiles_fall_back_to_cover_image() {
        let mut covers = BTreeMap::new();
        covers.insert(CategoryId::new("women"), "https://cdn/saree.jpg".to_string());
        let mut categories = categories();
        categories[0].image_url = Some("https://cdn/men.jpg".to_string());

        let tiles = CategoryTile::build_all(&categories, &covers);
        assert_eq!(tiles[0].image_url.as_deref(), Some("https://cdn/men.jpg"));
        assert_eq!(tiles[1].image_url.as_deref(), Some("https://cdn/saree.jpg"));
    }

    #[test]
    fn test_product_card() {
        let mut product = Product::new("p-1", "Kurta", Money::new(79900, Currency::INR));
        product.original_price = Some(Money::new(99900, Currency::INR));

        let card = ProductCard::new(&product, 2);
        assert_eq!(card.discount_badge.as_deref(), Some("20% off"));
        assert!(card.original_price.is_some());
        assert_eq!(card.in_cart, 2);

        product.original_price = Some(Money::new(0, Currency::INR));
        let card = ProductCard::new(&product, 0);
        assert_eq!(card.discount_badge, None);
        assert_eq!(card.original_price, None);
    }
}
