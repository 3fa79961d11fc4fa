//! # Mock Transport for Testing
//!
//! Scripted replies per method and path, with every request recorded for
//! verification. Clones share the same script and history.

use super::transport::{decode_response, ApiRequest, ApiResponse, Method, Transport, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// JSON body with a status code
    Json(u16, Value),
    /// Raw body bytes, parsed the way the real transport would
    Raw(u16, String),
    /// The request never reached a server
    Fail(String),
}

impl MockReply {
    pub fn ok(body: Value) -> Self {
        Self::Json(200, body)
    }

    pub fn empty(status: u16) -> Self {
        Self::Raw(status, String::new())
    }

    fn resolve(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        match self {
            Self::Json(status, body) => decode_response(*status, body.to_string().as_bytes()),
            Self::Raw(status, body) => decode_response(*status, body.as_bytes()),
            Self::Fail(message) => Err(TransportError::Network {
                url: request.path(),
                message: message.clone(),
            }),
        }
    }
}

type RouteKey = (Method, String);

#[derive(Debug, Default)]
struct MockState {
    routes: HashMap<RouteKey, VecDeque<MockReply>>,
    requests: Vec<ApiRequest>,
}

/// In-memory [`Transport`] with scripted replies
///
/// Replies for a route are consumed in order; the last one is repeated so a
/// reload after a mutation sees the same list.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a reply for `method` on `path` (e.g. `/api/v1/aisles`)
    pub fn respond(&self, method: Method, path: &str, reply: MockReply) -> &Self {
        self.state()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Every request sent so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state().requests.clone()
    }

    /// Requests sent with `method`
    pub fn requests_with(&self, method: Method) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let reply = {
            let mut state = self.state();
            state.requests.push(request.clone());
            let key = (request.method, request.path());
            state.routes.get_mut(&key).and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
        };

        match reply {
            Some(reply) => reply.resolve(&request),
            None => Err(TransportError::Network {
                url: request.to_string(),
                message: "no mock reply configured".to_string(),
            }),
        }
    }
}
