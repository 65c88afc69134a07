//! REST services.
//!
//! Each service wraps one group of backend endpoints. Services that feed
//! the store dispatch loading/loaded/failed actions around their calls and
//! also return the result to the caller.

mod auth;
mod cart;
mod catalog;
mod customer;
mod review;

pub use auth::{AuthService, LoginOutcome, INVALID_LOGIN_MESSAGE, RESET_LINK_SENT_MESSAGE};
pub use cart::CartService;
pub use catalog::CatalogService;
pub use customer::CustomerService;
pub use review::ReviewService;

use crate::ClientError;
use bazaar_auth::TokenStore;
use bazaar_commerce::Currency;
use bazaar_data::{ClientRequestBuilder, FetchClient, Response, DEFAULT_ENVELOPE_FIELD};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// What every service needs to talk to the backend.
#[derive(Debug, Clone)]
pub struct Api {
    http: FetchClient,
    tokens: TokenStore,
    envelope_field: Arc<str>,
    currency: Currency,
}

impl Api {
    /// `http` should already carry the base URL.
    pub fn new(http: FetchClient, tokens: TokenStore) -> Self {
        Self {
            http,
            tokens,
            envelope_field: Arc::from(DEFAULT_ENVELOPE_FIELD),
            currency: Currency::default(),
        }
    }

    /// Field enveloped list responses carry their array under.
    pub fn with_envelope_field(mut self, field: impl AsRef<str>) -> Self {
        self.envelope_field = Arc::from(field.as_ref());
        self
    }

    /// Currency wire prices are interpreted in.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn http(&self) -> &FetchClient {
        &self.http
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn envelope_field(&self) -> &str {
        &self.envelope_field
    }

    /// Attach the stored bearer token, failing when there is none.
    pub(crate) fn authorized(
        &self,
        request: ClientRequestBuilder,
    ) -> Result<ClientRequestBuilder, ClientError> {
        let token = self.tokens.require()?;
        Ok(request.bearer_auth(token))
    }

    /// Send and turn non-2xx statuses into errors.
    pub(crate) async fn send(&self, request: ClientRequestBuilder) -> Result<Response, ClientError> {
        Ok(request.send().await?.error_for_status()?)
    }

    /// Send and parse a list payload, bare or enveloped.
    pub(crate) async fn send_list<T: DeserializeOwned>(
        &self,
        request: ClientRequestBuilder,
    ) -> Result<Vec<T>, ClientError> {
        let response = self.send(request).await?;
        Ok(response.json_list(&self.envelope_field)?)
    }

    /// Send and parse a single object, which may also be enveloped.
    pub(crate) async fn send_object<T: DeserializeOwned>(
        &self,
        request: ClientRequestBuilder,
    ) -> Result<Option<T>, ClientError> {
        let response = self.send(request).await?;
        if response.is_empty() {
            return Ok(None);
        }
        let value = unwrap_object(response.json()?, &self.envelope_field);
        Ok(Some(serde_json::from_value(value).map_err(bazaar_data::FetchError::from)?))
    }
}

/// `{ "<field>": { ... } }` becomes the inner object; anything else is
/// returned as is.
fn unwrap_object(value: Value, field: &str) -> Value {
    match value {
        Value::Object(mut map) if matches!(map.get(field), Some(Value::Object(_))) => {
            map.remove(field).unwrap_or(Value::Null)
        }
        other => other,
    }
}
