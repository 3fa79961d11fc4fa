//! # I/O Abstraction Layer
//!
//! Provides clean trait abstractions for input/output streams to enable
//! dependency injection without polluting production code.
//!
//! ## Design Principles
//!
//! - **LineSource**: Abstracts console input, one command line at a time
//! - **RenderStream**: Abstracts output rendering (screen clearing, cursor, colors)
//! - **Clean Separation**: All terminal-specific code isolated to implementations
//!
//! ## Architecture
//!
//! ```text
//! Production:  AppController ──▶ TerminalLineSource   ──▶ stdin
//!                            ──▶ TerminalRenderStream ──▶ crossterm::execute!()
//!
//! Testing:     AppController ──▶ MockLineSource       ──▶ VecDeque<String>
//!                            ──▶ MockRenderStream     ──▶ shared Vec<u8>
//! ```

use anyhow::Result;
use std::io::Write;

pub mod mock;
pub mod terminal;

// Re-export terminal implementations for convenience
pub use terminal::{TerminalLineSource, TerminalRenderStream};

// Re-export mock implementations for testing
pub use mock::{MockLineSource, MockRenderStream};

/// Type alias for terminal size (width, height)
pub type TerminalSize = (u16, u16);

/// Console input abstraction
///
/// Production reads lines from stdin; tests provide a scripted sequence.
pub trait LineSource: Send {
    /// Read the next line without its trailing newline.
    ///
    /// Returns `None` once the input is exhausted.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Output render stream abstraction
///
/// Production implementations use crossterm for real terminal output.
/// Test implementations capture the written text for verification.
pub trait RenderStream: Write + Send {
    /// Clear the entire screen and home the cursor
    fn clear_screen(&mut self) -> Result<()>;

    /// Get terminal size as (width, height)
    fn get_size(&self) -> Result<TerminalSize>;

    /// Whether ANSI styling should be emitted
    fn supports_color(&self) -> bool;
}
