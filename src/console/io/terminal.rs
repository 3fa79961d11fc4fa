//! # Terminal I/O Implementations
//!
//! Production implementations of I/O abstractions using crossterm.
//! All crossterm dependencies are isolated to this module.

use super::{LineSource, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::tty::IsTty;
use crossterm::{cursor, execute, terminal};
use std::io::{self, BufRead, Write};

/// Fallback size when stdout is not a terminal
const DEFAULT_SIZE: TerminalSize = (100, 30);

/// Reads console commands from stdin
pub struct TerminalLineSource {
    stdin: io::Stdin,
}

impl TerminalLineSource {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl LineSource for TerminalLineSource {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.stdin.lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Terminal-based render stream using crossterm
///
/// Renders to the actual terminal using crossterm's rendering system.
/// When stdout is redirected, styling and screen clearing are skipped.
pub struct TerminalRenderStream<W: Write> {
    writer: W,
    is_tty: bool,
}

impl TerminalRenderStream<io::Stdout> {
    /// Create a new terminal render stream using stdout
    pub fn new() -> Self {
        let writer = io::stdout();
        let is_tty = writer.is_tty();
        Self { writer, is_tty }
    }
}

impl<W: Write> TerminalRenderStream<W> {
    /// Create a terminal render stream with custom writer, treated as a non-terminal
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            is_tty: false,
        }
    }
}

impl<W: Write> Write for TerminalRenderStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write + Send> RenderStream for TerminalRenderStream<W> {
    fn clear_screen(&mut self) -> Result<()> {
        if !self.is_tty {
            return Ok(());
        }
        execute!(
            self.writer,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
        .map_err(anyhow::Error::from)
    }

    fn get_size(&self) -> Result<TerminalSize> {
        if !self.is_tty {
            return Ok(DEFAULT_SIZE);
        }
        terminal::size().map_err(anyhow::Error::from)
    }

    fn supports_color(&self) -> bool {
        self.is_tty
    }
}

impl Default for TerminalLineSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for TerminalRenderStream<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}
