//! Product reviews.

use super::Api;
use crate::wire::{ReviewRequest, WireReview};
use crate::ClientError;
use bazaar_auth::AuthError;
use bazaar_commerce::review::{Review, ReviewDraft};
use bazaar_commerce::ProductId;
use tracing::instrument;

/// Review listing and submission.
#[derive(Debug, Clone)]
pub struct ReviewService {
    api: Api,
}

impl ReviewService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// `GET /products/{id}/reviews`
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn reviews(&self, product_id: &ProductId) -> Result<Vec<Review>, ClientError> {
        let request = self
            .api
            .http()
            .get(format!("/products/{}/reviews", product_id));
        let reviews: Vec<WireReview> = self.api.send_list(request).await?;
        Ok(reviews
            .into_iter()
            .map(|r| r.into_review(product_id))
            .collect())
    }

    /// Validate and post a review.
    ///
    /// An invalid draft fails with [`ClientError::Review`] without any
    /// request. A missing token or a 401/403 answer fails with
    /// [`ClientError::LoginRequired`]. Returns the created review when the
    /// server echoes it back.
    #[instrument(skip(self, product_id, draft), fields(product_id = %product_id, rating = draft.rating))]
    pub async fn submit(
        &self,
        product_id: &ProductId,
        draft: &ReviewDraft,
    ) -> Result<Option<Review>, ClientError> {
        let submission = draft.validate().map_err(ClientError::Review)?;

        let request = self
            .api
            .http()
            .post(format!("/products/{}/reviews", product_id))
            .json(&ReviewRequest {
                rating: submission.rating,
                comment: &submission.comment,
            })?;
        let request = match self.api.authorized(request) {
            Ok(request) => request,
            Err(ClientError::Auth(AuthError::NotLoggedIn)) => return Err(ClientError::LoginRequired),
            Err(e) => return Err(e),
        };

        let created: Option<WireReview> = match self.api.send_object(request).await {
            Ok(created) => created,
            Err(ClientError::Fetch(e)) if e.is_unauthorized() => {
                tracing::info!("review rejected, login required");
                return Err(ClientError::LoginRequired);
            }
            // Accepted, but the body is not a review.
            Err(ClientError::Fetch(bazaar_data::FetchError::JsonError(_)))
            | Err(ClientError::Fetch(bazaar_data::FetchError::ParseError(_))) => None,
            Err(e) => return Err(e),
        };
        tracing::info!("review submitted");
        Ok(created.map(|r| r.into_review(product_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;
    use bazaar_commerce::review::ReviewValidationError;
    use bazaar_data::mock::{MockReply, MockTransport};
    use bazaar_data::Method;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let transport = Arc::new(MockTransport::new());
        let service = ReviewService::new(testing::logged_in_api(&transport));
        let product = ProductId::new("p-1");

        let err = service
            .submit(&product, &ReviewDraft::new(0, "Lovely fabric and fit"))
            .await
            .unwrap_err();
        assert_eq!(err.review_errors(), &[ReviewValidationError::MissingRating]);

        let err = service
            .submit(&product, &ReviewDraft::new(4, "   too short   "))
            .await
            .unwrap_err();
        assert_eq!(err.display_message(), "Comment must be at least 10 characters long.");

        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_posts_trimmed_comment() {
        let transport = Arc::new(MockTransport::new());
        transport.on(
            Method::Post,
            "/products/p-1/reviews",
            MockReply::json(
                201,
                json!({"id": "r-9", "rating": 5, "comment": "Lovely fabric and fit", "author": "Asha"}),
            ),
        );
        let service = ReviewService::new(testing::logged_in_api(&transport));

        let review = service
            .submit(&ProductId::new("p-1"), &ReviewDraft::new(5, "  Lovely fabric and fit "))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(review.product_id.as_str(), "p-1");

        let request = &transport.requests()[0];
        assert_eq!(
            request.json::<serde_json::Value>().unwrap(),
            json!({"rating": 5, "comment": "Lovely fabric and fit"})
        );
        assert_eq!(request.header("authorization"), Some("Bearer test-token"));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_login_prompt() {
        let transport = Arc::new(MockTransport::new());
        transport.on(Method::Post, "/products/p-1/reviews", MockReply::status(401));
        let service = ReviewService::new(testing::logged_in_api(&transport));

        let err = service
            .submit(&ProductId::new("p-1"), &ReviewDraft::new(3, "Decent for the price"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::LoginRequired));
        assert_eq!(err.display_message(), "Please log in to submit a review.");
    }

    #[tokio::test]
    async fn test_missing_token_is_login_prompt_without_request() {
        let transport = Arc::new(MockTransport::new());
        let service = ReviewService::new(testing::api(&transport));

        let err = service
            .submit(&ProductId::new("p-1"), &ReviewDraft::new(3, "Decent for the price"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::LoginRequired));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_list_reviews() {
        let transport = Arc::new(MockTransport::new());
        transport.on(
            Method::Get,
            "/products/p-1/reviews",
            MockReply::json(200, json!({"data": [{"_id": 1, "rating": 4, "comment": "Good"}]})),
        );
        let service = ReviewService::new(testing::api(&transport));

        let reviews = service.reviews(&ProductId::new("p-1")).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id.as_str(), "1");
    }
}
