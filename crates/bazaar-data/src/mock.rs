//! In-memory transport for tests.
//!
//! Replies are queued per `(method, path)` and served in order; every
//! request is recorded so tests can assert on what was (or was not) sent.

use crate::{FetchError, HttpRequest, Method, Response, Transport};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A canned reply.
#[derive(Debug, Clone)]
pub struct MockReply {
    result: Result<Response, FetchError>,
    delay: Option<Duration>,
}

impl MockReply {
    /// Reply with a JSON body.
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            result: Ok(Response::new(status, headers, body.to_string().into_bytes())),
            delay: None,
        }
    }

    /// Reply with a status and no body.
    pub fn status(status: u16) -> Self {
        Self {
            result: Ok(Response::new(status, HashMap::new(), Vec::new())),
            delay: None,
        }
    }

    /// Fail at the transport level.
    pub fn error(error: FetchError) -> Self {
        Self {
            result: Err(error),
            delay: None,
        }
    }

    /// Hold the reply back for `delay` before resolving.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Default)]
struct MockState {
    replies: HashMap<(Method, String), VecDeque<MockReply>>,
    requests: Vec<HttpRequest>,
}

/// Transport that serves queued [`MockReply`]s.
///
/// Unmatched requests get a `404` with an explanatory body.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    /// Create a transport with no replies queued.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a reply for `method` + URL path (query string ignored).
    pub fn on(&self, method: Method, path: &str, reply: MockReply) -> &Self {
        self.state()
            .replies
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Every request executed so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state().requests.clone()
    }

    /// Requests matching `method` + path.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        self.state()
            .requests
            .iter()
            .filter(|r| r.method == method && r.url.path() == path)
            .cloned()
            .collect()
    }

    /// Number of requests executed so far.
    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Response, FetchError> {
        let key = (request.method, request.url.path().to_string());
        let reply = {
            let mut state = self.state();
            state.requests.push(request);
            state.replies.get_mut(&key).and_then(VecDeque::pop_front)
        };

        let Some(reply) = reply else {
            let body = format!("no mock reply for {} {}", key.0, key.1);
            return Ok(Response::new(404, HashMap::new(), body.into_bytes()));
        };

        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        reply.result
    }
}
