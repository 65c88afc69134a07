//! HTTP client utilities for the Bazaar storefront client.
//!
//! Provides a small builder API over a pluggable [`Transport`], automatic
//! JSON handling, and normalization of list payloads that arrive either as a
//! bare array or wrapped in an envelope object.
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_data::FetchClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Category {
//!     id: String,
//!     name: String,
//! }
//!
//! let client = FetchClient::reqwest(None)?.with_base_url("https://api.example.com");
//!
//! // Bare array or {"data": [...]}, both work
//! let categories: Vec<Category> = client
//!     .get("/categories")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json_list("data")?;
//! ```

pub mod envelope;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod request;
mod response;
mod transport;

pub use envelope::{normalize_list, DEFAULT_ENVELOPE_FIELD};
pub use error::FetchError;
pub use request::{HttpRequest, Method, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for making outbound requests.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client over the given transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Create a client backed by `reqwest`.
    pub fn reqwest(timeout: Option<Duration>) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(timeout)?)))
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Put, url)
    }

    /// Create a PATCH request.
    pub fn patch(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Patch, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!(
                        "{}/{}",
                        base.trim_end_matches('/'),
                        url.trim_start_matches('/')
                    )
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Append a query parameter only when a value is present.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Add a bearer header when a token is available.
    pub fn bearer_auth_opt(self, token: Option<impl AsRef<str>>) -> Self {
        match token {
            Some(token) => self.bearer_auth(token),
            None => self,
        }
    }

    /// Add a basic authorization header.
    pub fn basic_auth(mut self, username: impl AsRef<str>, password: Option<&str>) -> Self {
        self.builder = self.builder.basic_auth(username, password);
        self
    }

    /// Override the timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.builder = self.builder.timeout(timeout);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let request = self.builder.build()?;
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let result = self.transport.execute(request).await;
        match &result {
            Ok(response) => tracing::debug!(%method, %url, status = response.status, "response"),
            Err(e) => tracing::warn!(%method, %url, error = %e, "request failed"),
        }
        result
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockReply, MockTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_base_url_joining() {
        let transport = Arc::new(MockTransport::new());
        transport.on(Method::Get, "/api/categories", MockReply::json(200, json!([])));
        let client = FetchClient::new(transport.clone()).with_base_url("http://mock.local/api/");

        client.get("/categories").send().await.unwrap();
        client.get("categories").send().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url.as_str(), "http://mock.local/api/categories");
        assert_eq!(requests[1].url.as_str(), "http://mock.local/api/categories");
    }

    #[tokio::test]
    async fn test_default_headers_and_optional_parts() {
        let transport = Arc::new(MockTransport::new());
        let client = FetchClient::new(transport.clone())
            .with_base_url("http://mock.local")
            .with_default_header("Accept", "application/json");

        client
            .get("/products")
            .query_opt("category", Some("men"))
            .query_opt("subcategory", None::<String>)
            .bearer_auth_opt(None::<String>)
            .send()
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("authorization"), None);
        assert_eq!(request.url.query(), Some("category=men"));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let transport = Arc::new(MockTransport::new());
        transport.on(Method::Get, "/cart", MockReply::error(FetchError::Timeout));
        let client = FetchClient::new(transport).with_base_url("http://mock.local");

        let result = client.get("/cart").send().await;
        assert_eq!(result.unwrap_err(), FetchError::Timeout);
    }
}
