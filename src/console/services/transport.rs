//! # Transport
//!
//! Thin JSON-over-HTTP layer between the console and the REST API.
//!
//! The status code is examined before the body is parsed: an empty body (or
//! `204`) is never fed to the JSON parser, and non-2xx responses become
//! [`TransportError::Status`] with the server's `detail` when it sent one.
//! There is no retry, timeout or cancellation.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Url;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// HTTP methods used by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Unencoded path segments, e.g. `["api", "v1", "aisles", "1"]`
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, segments: Vec<String>) -> Self {
        Self {
            method,
            segments,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path with a leading slash, segments unencoded
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path())?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

/// A successful (2xx) response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `None` for empty bodies and `204 No Content`
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid request URL: {0}")]
    Url(String),

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("malformed response body (status {status}): {message}")]
    Decode { status: u16, message: String },

    #[error("server returned {status}{}", .detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status { status: u16, detail: Option<String> },
}

impl TransportError {
    /// Whether the server answered at all
    pub fn response_received(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Status { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Decode { status, .. } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Sends API requests
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Classify a raw response by status, then parse its body.
pub fn decode_response(status: u16, body: &[u8]) -> Result<ApiResponse, TransportError> {
    let is_blank = body.iter().all(u8::is_ascii_whitespace);

    if !(200..300).contains(&status) {
        let detail = if is_blank {
            None
        } else {
            serde_json::from_slice::<Value>(body)
                .ok()
                .and_then(|value| error_detail(&value))
        };
        return Err(TransportError::Status { status, detail });
    }

    if status == 204 || is_blank {
        return Ok(ApiResponse { status, body: None });
    }

    serde_json::from_slice(body)
        .map(|value| ApiResponse {
            status,
            body: Some(value),
        })
        .map_err(|e| TransportError::Decode {
            status,
            message: e.to_string(),
        })
}

/// Summarize a `{"detail": ...}` error envelope.
///
/// Validation errors arrive as a list of `{loc, msg}` objects.
fn error_detail(value: &Value) -> Option<String> {
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg")?.as_str()?;
                    let loc = item
                        .get("loc")
                        .and_then(Value::as_array)
                        .map(|parts| {
                            parts
                                .iter()
                                .map(|p| match p {
                                    Value::String(s) => s.clone(),
                                    other => other.to_string(),
                                })
                                .collect::<Vec<_>>()
                                .join(".")
                        })
                        .filter(|loc| !loc.is_empty());
                    Some(match loc {
                        Some(loc) => format!("{loc}: {msg}"),
                        None => msg.to_string(),
                    })
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        other => Some(other.to_string()),
    }
}

/// reqwest-backed transport rooted at a base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url).map_err(|e| TransportError::Url(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::Url(format!("{base_url} cannot be a base URL")));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a request, segments and query percent-encoded
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::Url(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(&request.segments);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request)?;
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.into(), url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let network_error = |e: reqwest::Error| TransportError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(network_error)?;
        tracing::debug!("{} {} -> {} ({} bytes)", request.method, url, status, bytes.len());

        decode_response(status, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_should_parse_json_success() {
        let response = decode_response(200, br#"{"aisles": []}"#).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(json!({"aisles": []})));
    }

    #[test]
    fn decode_should_not_parse_empty_bodies() {
        assert_eq!(
            decode_response(204, b"").unwrap(),
            ApiResponse {
                status: 204,
                body: None
            }
        );
        assert_eq!(decode_response(200, b"  \n").unwrap().body, None);
    }

    #[test]
    fn decode_should_reject_malformed_success_body() {
        let err = decode_response(200, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, TransportError::Decode { status: 200, .. }));
        assert!(err.response_received());
    }

    #[test]
    fn decode_should_extract_string_detail() {
        let err = decode_response(404, br#"{"detail": "Aisle 1 not found"}"#).unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                status: 404,
                detail: Some("Aisle 1 not found".to_string())
            }
        );
        assert_eq!(err.to_string(), "server returned 404: Aisle 1 not found");
    }

    #[test]
    fn decode_should_summarize_validation_detail() {
        let body = br#"{"detail": [{"loc": ["body", "aisle_id"], "msg": "field required", "type": "missing"}]}"#;
        let err = decode_response(422, body).unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                status: 422,
                detail: Some("body.aisle_id: field required".to_string())
            }
        );
    }

    #[test]
    fn decode_should_tolerate_non_json_error_body() {
        let err = decode_response(500, b"Internal Server Error").unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                status: 500,
                detail: None
            }
        );
        assert_eq!(err.to_string(), "server returned 500");
    }

    #[test]
    fn network_errors_should_not_count_as_responses() {
        let err = TransportError::Network {
            url: "http://localhost".into(),
            message: "connection refused".into(),
        };
        assert!(!err.response_received());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn request_should_display_path_and_query() {
        let request = ApiRequest::new(Method::Put, vec!["api".into(), "v1".into(), "aisles".into()])
            .with_query("id", "1");
        assert_eq!(request.to_string(), "PUT /api/v1/aisles?id=1");
        assert_eq!(request.query_value("id"), Some("1"));
    }

    #[test]
    fn url_for_should_keep_base_path_and_encode_segments() {
        let transport = HttpTransport::new("http://localhost:8000/admin/").unwrap();
        let request = ApiRequest::new(
            Method::Get,
            vec!["api".into(), "v1".into(), "aisles".into(), "a b/c".into()],
        );
        let url = transport.url_for(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/admin/api/v1/aisles/a%20b%2Fc");
    }

    #[test]
    fn url_for_should_encode_query() {
        let transport = HttpTransport::new("http://localhost:8000").unwrap();
        let request = ApiRequest::new(Method::Delete, vec!["api".into(), "v1".into(), "orders".into()])
            .with_query("id", "x&y");
        let url = transport.url_for(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/orders?id=x%26y");
    }

    #[test]
    fn new_should_reject_invalid_base() {
        assert!(HttpTransport::new("not a url").is_err());
        assert!(HttpTransport::new("mailto:admin@example.com").is_err());
    }
}
