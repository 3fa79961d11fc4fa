//! # Console
//!
//! Schema-driven CRUD console. One [`ResourceController`] per entity owns
//! the list, its row actions and the modal form; the [`AppController`]
//! feeds it console commands and renders it after each one.

pub mod commands;
pub mod controller;
pub mod io;
pub mod models;
pub mod schema;
pub mod services;
pub mod view_models;
pub mod views;

pub use commands::{CommandError, ConsoleCommand};
pub use controller::AppController;
pub use io::{
    LineSource, MockLineSource, MockRenderStream, RenderStream, TerminalLineSource,
    TerminalRenderStream,
};
pub use schema::{EntitySchema, FieldKind, FieldRole, FieldSpec, SchemaRegistry};
pub use services::{
    ApiError, ApiRequest, ApiResponse, EndpointConfig, HttpTransport, Method, MockReply,
    MockTransport, ResourceApi, Transport, TransportError,
};
pub use view_models::{Confirm, DeleteOutcome, FormManager, ResourceController};
