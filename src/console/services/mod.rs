//! # Services Layer
//!
//! Network-facing services used by the view models: the JSON transport and
//! the per-entity REST mapping built on it.

pub mod mock;
pub mod resource_api;
pub mod transport;

pub use mock::{MockReply, MockTransport};
pub use resource_api::{ApiError, EndpointConfig, ResourceApi};
pub use transport::{
    decode_response, ApiRequest, ApiResponse, HttpTransport, Method, Transport, TransportError,
};
