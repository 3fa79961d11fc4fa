//! Step definitions for the console features
//!
//! - `api`: mock catalog API setup
//! - `console`: console input and assertions on what it shows and sends

pub mod api;
pub mod console;
