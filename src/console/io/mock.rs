//! # Mock I/O Implementations
//!
//! Test implementations of I/O abstractions that capture output
//! and provide scripted input without a terminal.

use super::{LineSource, RenderStream, TerminalSize};
use anyhow::Result;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Mock line source that replays a predefined script
///
/// Clones share the same script, so a test can queue more lines after the
/// controller took ownership.
#[derive(Debug, Clone, Default)]
pub struct MockLineSource {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl MockLineSource {
    /// Create a new mock line source with predefined lines
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Arc::new(Mutex::new(lines.into_iter().map(Into::into).collect())),
        }
    }

    /// Add a line to the end of the script
    pub fn push_line(&self, line: impl Into<String>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push_back(line.into());
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }
}

impl LineSource for MockLineSource {
    fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self
            .lines
            .lock()
            .ok()
            .and_then(|mut lines| lines.pop_front()))
    }
}

/// Commands recorded by the mock render stream
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    GetSize,
    Write(Vec<u8>),
    Flush,
}

/// Mock render stream that captures all output for verification
///
/// Clones share the same buffers, so a test can keep a handle while the
/// controller owns the stream.
#[derive(Debug, Clone)]
pub struct MockRenderStream {
    commands: Arc<Mutex<Vec<RenderCommand>>>,
    buffer: Arc<Mutex<Vec<u8>>>,
    size: TerminalSize,
}

impl MockRenderStream {
    /// Create a new mock render stream with default size (80x24)
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    /// Create a new mock render stream with specific size
    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            buffer: Arc::new(Mutex::new(Vec::new())),
            size,
        }
    }

    /// Get all recorded commands
    pub fn get_commands(&self) -> Vec<RenderCommand> {
        self.commands
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default()
    }

    /// Get everything written so far as a string
    pub fn get_buffer_string(&self) -> String {
        self.buffer
            .lock()
            .map(|buffer| String::from_utf8_lossy(&buffer).to_string())
            .unwrap_or_default()
    }

    /// Count how many times the screen was cleared
    pub fn clear_count(&self) -> usize {
        self.get_commands()
            .iter()
            .filter(|command| **command == RenderCommand::ClearScreen)
            .count()
    }

    /// Clear all recorded commands and output
    pub fn clear(&self) {
        if let Ok(mut commands) = self.commands.lock() {
            commands.clear();
        }
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }

    fn record(&self, command: RenderCommand) {
        if let Ok(mut commands) = self.commands.lock() {
            commands.push(command);
        }
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.extend_from_slice(buf);
        }
        self.record(RenderCommand::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::ClearScreen);
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        self.record(RenderCommand::GetSize);
        Ok(self.size)
    }

    fn supports_color(&self) -> bool {
        false
    }
}
