//! # cartline - Terminal CRUD Console for a Grocery Catalog API
//!
//! Lists, creates, edits and deletes aisles, departments, products and
//! orders against a JSON REST API.
//!
//! ## Architecture
//!
//! The console follows the Model-View-ViewModel (MVVM) pattern:
//!
//! ```text
//! ┌─────────────┐  renders  ┌──────────────────────┐  drives  ┌───────────────┐
//! │    Views    │◄──────────│     View Models      │─────────►│   Services    │
//! │             │           │                      │          │               │
//! │ - Table     │           │ - ResourceController │          │ - ResourceApi │
//! │ - Form      │           │ - FormManager        │          │ - Transport   │
//! │ - Status    │           └──────────────────────┘          └───────────────┘
//! └─────────────┘                      ▲
//!                                      │ Commands
//!                                      ▼
//!                              ┌───────────────┐
//!                              │ AppController │
//!                              │ - Line input  │
//!                              │ - Event loop  │
//!                              └───────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod console;

// Re-export main types for easy access
pub use console::*;
