//! # View Models
//!
//! Business logic between the services and the views. The resource
//! controller owns all per-entity state; views only read it.

pub mod form_manager;
pub mod resource_controller;

pub use form_manager::FormManager;
pub use resource_controller::{Confirm, DeleteOutcome, ResourceController};
