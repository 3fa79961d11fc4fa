//! # Views Module
//!
//! Contains all view-related components for rendering the console.

pub mod form_view;
pub mod table_view;
pub mod terminal_renderer;

// Re-export main types for convenience
pub use form_view::form_lines;
pub use table_view::{row_cells, table_lines};
pub use terminal_renderer::ConsoleRenderer;
