//! # Resource API
//!
//! Maps the five collection operations of one entity onto transport
//! requests and interprets the responses.
//!
//! | Operation | Request |
//! |---|---|
//! | list   | `GET {prefix}/{plural}?limit={limit}` |
//! | get    | `GET {prefix}/{plural}/{id}` |
//! | create | `POST {prefix}/{plural}` |
//! | update | `PUT {prefix}/{plural}?id={id}` (or `/{id}`) |
//! | delete | `DELETE {prefix}/{plural}?id={id}` (or `/{id}`) |

use super::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::config::IdAddressing;
use crate::console::models::{Record, RecordError};
use crate::console::schema::EntitySchema;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("response has no '{0}' list")]
    MissingList(String),

    #[error("invalid record in response: {0}")]
    Record(#[from] RecordError),

    #[error("response body is empty")]
    EmptyBody,
}

impl ApiError {
    /// Whether the server answered; only network and URL failures are silent
    pub fn response_received(&self) -> bool {
        match self {
            Self::Transport(e) => e.response_received(),
            _ => true,
        }
    }
}

/// Endpoint settings shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    pub api_prefix: String,
    pub list_limit: u32,
    pub id_addressing: IdAddressing,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_prefix: crate::config::DEFAULT_API_PREFIX.to_string(),
            list_limit: crate::config::MAX_LIST_LIMIT,
            id_addressing: IdAddressing::default(),
        }
    }
}

impl From<&crate::config::ConsoleProfile> for EndpointConfig {
    fn from(profile: &crate::config::ConsoleProfile) -> Self {
        Self {
            api_prefix: profile.api_prefix().to_string(),
            list_limit: profile.list_limit(),
            id_addressing: profile.id_addressing(),
        }
    }
}

/// REST operations for one entity collection
#[derive(Clone)]
pub struct ResourceApi {
    schema: EntitySchema,
    endpoint: EndpointConfig,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ResourceApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceApi")
            .field("entity", &self.schema.plural)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ResourceApi {
    pub fn new(schema: EntitySchema, endpoint: EndpointConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            schema,
            endpoint,
            transport,
        }
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    fn collection_segments(&self) -> Vec<String> {
        self.endpoint
            .api_prefix
            .split('/')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .chain(std::iter::once(self.schema.plural.to_string()))
            .collect()
    }

    fn record_segments(&self, id: &str) -> Vec<String> {
        let mut segments = self.collection_segments();
        segments.push(id.to_string());
        segments
    }

    /// Request addressing one record for update or delete
    fn addressed(&self, method: Method, id: &str) -> ApiRequest {
        match self.endpoint.id_addressing {
            IdAddressing::Query => {
                ApiRequest::new(method, self.collection_segments()).with_query("id", id)
            }
            IdAddressing::Path => ApiRequest::new(method, self.record_segments(id)),
        }
    }

    pub fn list_request(&self) -> ApiRequest {
        ApiRequest::new(Method::Get, self.collection_segments())
            .with_query("limit", self.endpoint.list_limit.to_string())
    }

    pub fn get_request(&self, id: &str) -> ApiRequest {
        ApiRequest::new(Method::Get, self.record_segments(id))
    }

    pub fn create_request(&self, body: Map<String, Value>) -> ApiRequest {
        ApiRequest::new(Method::Post, self.collection_segments()).with_body(Value::Object(body))
    }

    pub fn update_request(&self, id: &str, body: Map<String, Value>) -> ApiRequest {
        self.addressed(Method::Put, id).with_body(Value::Object(body))
    }

    pub fn delete_request(&self, id: &str) -> ApiRequest {
        self.addressed(Method::Delete, id)
    }

    /// Fetch the collection, expecting `{ "{plural}": [record, ...] }`
    pub async fn list(&self) -> Result<Vec<Record>, ApiError> {
        let response = self.transport.send(self.list_request()).await?;
        let body = response.body.ok_or(ApiError::EmptyBody)?;
        let items = body
            .get(self.schema.plural)
            .and_then(Value::as_array)
            .ok_or_else(|| ApiError::MissingList(self.schema.plural.to_string()))?;
        let records: Vec<Record> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match Record::from_json(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping {} item {}: {}", self.schema.plural, index, e);
                    None
                }
            })
            .collect();
        tracing::debug!("Listed {} {}", records.len(), self.schema.plural);
        Ok(records)
    }

    pub async fn get(&self, id: &str) -> Result<Record, ApiError> {
        let response = self.transport.send(self.get_request(id)).await?;
        let body = response.body.ok_or(ApiError::EmptyBody)?;
        Ok(Record::from_json(&body)?)
    }

    pub async fn create(&self, body: Map<String, Value>) -> Result<ApiResponse, ApiError> {
        Ok(self.transport.send(self.create_request(body)).await?)
    }

    pub async fn update(&self, id: &str, body: Map<String, Value>) -> Result<ApiResponse, ApiError> {
        Ok(self.transport.send(self.update_request(id, body)).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<ApiResponse, ApiError> {
        Ok(self.transport.send(self.delete_request(id)).await?)
    }
}
