//! Server cart endpoints.
//!
//! Every call answers with the resulting server cart. These are raw calls;
//! ordering and store updates live in the remote cart backend.

use super::Api;
use crate::wire::{MergeRequest, QuantityRequest, WireCartLine};
use crate::ClientError;
use bazaar_commerce::{Cart, CartLineItem, ProductId};
use bazaar_data::ClientRequestBuilder;
use tracing::instrument;

/// Authenticated cart endpoints.
#[derive(Debug, Clone)]
pub struct CartService {
    api: Api,
}

impl CartService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    async fn send_cart(&self, request: ClientRequestBuilder) -> Result<Cart, ClientError> {
        let request = self.api.authorized(request)?;
        let lines: Vec<WireCartLine> = self.api.send_list(request).await?;
        let currency = self.api.currency();
        Ok(Cart::from_items(
            lines.into_iter().map(|line| line.into_line(currency)),
        ))
    }

    /// `GET /cart`
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<Cart, ClientError> {
        self.send_cart(self.api.http().get("/cart")).await
    }

    /// `PUT /cart/items/{product_id}`
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn set_quantity(
        &self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<Cart, ClientError> {
        let request = self
            .api
            .http()
            .put(format!("/cart/items/{}", product_id))
            .json(&QuantityRequest { quantity })?;
        self.send_cart(request).await
    }

    /// `DELETE /cart/items/{product_id}`
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn remove(&self, product_id: &ProductId) -> Result<Cart, ClientError> {
        let request = self.api.http().delete(format!("/cart/items/{}", product_id));
        self.send_cart(request).await
    }

    /// `DELETE /cart`
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<Cart, ClientError> {
        self.send_cart(self.api.http().delete("/cart")).await
    }

    /// `POST /cart/merge` with every local line.
    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub async fn merge(&self, items: &[CartLineItem]) -> Result<Cart, ClientError> {
        let body = MergeRequest {
            items: items.iter().map(WireCartLine::from_line).collect(),
        };
        let request = self.api.http().post("/cart/merge").json(&body)?;
        self.send_cart(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;
    use bazaar_data::mock::{MockReply, MockTransport};
    use bazaar_data::Method;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fetch_enveloped_cart() {
        let transport = Arc::new(MockTransport::new());
        transport.on(
            Method::Get,
            "/cart",
            MockReply::json(
                200,
                json!({"data": [{"productId": 7, "productName": "Kurta", "price": 799, "quantity": 2}]}),
            ),
        );
        let service = CartService::new(testing::logged_in_api(&transport));

        let cart = service.fetch().await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].product_id.as_str(), "7");
        assert_eq!(cart.item_count(), 2);

        let request = &transport.requests()[0];
        assert_eq!(request.header("authorization"), Some("Bearer test-token"));
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_cart() {
        let transport = Arc::new(MockTransport::new());
        transport.on(Method::Delete, "/cart", MockReply::status(204));
        let service = CartService::new(testing::logged_in_api(&transport));

        assert!(service.clear().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_quantity_body() {
        let transport = Arc::new(MockTransport::new());
        transport.on(Method::Put, "/cart/items/p-1", MockReply::json(200, json!([])));
        let service = CartService::new(testing::logged_in_api(&transport));

        service.set_quantity(&ProductId::new("p-1"), 3).await.unwrap();

        let request = &transport.requests_to(Method::Put, "/cart/items/p-1")[0];
        assert_eq!(request.json::<serde_json::Value>().unwrap(), json!({"quantity": 3}));
    }

    #[tokio::test]
    async fn test_requires_token() {
        let transport = Arc::new(MockTransport::new());
        let service = CartService::new(testing::api(&transport));

        let err = service.fetch().await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Unauthorized);
        assert_eq!(transport.request_count(), 0);
    }
}
