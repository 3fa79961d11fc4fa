//! # Console Renderer
//!
//! One-way rendering of the active resource controller into a
//! [`RenderStream`]. The renderer holds no state of its own; every frame is
//! drawn from the view-models.

use crate::console::io::RenderStream;
use crate::console::models::{Severity, StatusLine};
use crate::console::view_models::ResourceController;
use crate::console::views::{form_lines, table_lines};
use anyhow::Result;
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

pub const PROMPT: &str = "> ";
const IDLE_HINT: &str = "Type 'help' for commands";

/// Draws console frames onto a render stream
pub struct ConsoleRenderer<RS: RenderStream> {
    stream: RS,
}

impl<RS: RenderStream> ConsoleRenderer<RS> {
    pub fn new(stream: RS) -> Self {
        Self { stream }
    }

    pub fn stream(&self) -> &RS {
        &self.stream
    }

    pub fn stream_mut(&mut self) -> &mut RS {
        &mut self.stream
    }

    /// Full frame: header, table, open form, status line, prompt
    pub fn render(&mut self, controller: &ResourceController) -> Result<()> {
        let (width, _) = self.stream.get_size()?;
        let width = usize::from(width);
        let schema = controller.schema();

        self.stream.clear_screen()?;
        let header = format!(
            "cartline | {} | profile: {}",
            schema.plural,
            controller.status_line().profile_name()
        );
        self.write_styled(&fit(&header, width), None, true)?;
        self.write_line("")?;

        for line in table_lines(schema, controller.table()) {
            self.write_line(&fit(&line, width))?;
        }

        if let Some(form) = controller.form() {
            self.write_line("")?;
            for line in form_lines(form) {
                self.write_line(&fit(&line, width))?;
            }
        }

        self.write_line("")?;
        self.render_status_line(controller.status_line(), width)?;
        self.write_plain(PROMPT)?;
        self.stream.flush()?;
        Ok(())
    }

    /// Table only, for non-interactive output
    pub fn render_table(&mut self, controller: &ResourceController) -> Result<()> {
        for line in table_lines(controller.schema(), controller.table()) {
            self.write_line(&line)?;
        }
        if controller.status_line().is_error() {
            self.render_status_line(controller.status_line(), usize::MAX)?;
        }
        self.stream.flush()?;
        Ok(())
    }

    fn render_status_line(&mut self, status: &StatusLine, width: usize) -> Result<()> {
        let code = status
            .last_status_code()
            .map(|code| format!(" [{code}]"))
            .unwrap_or_default();
        match (status.severity(), status.status_message()) {
            (Some(severity), Some(message)) => {
                let color = match severity {
                    Severity::Info => Color::Green,
                    Severity::Error => Color::Red,
                };
                let text = fit(&format!("{message}{code}"), width);
                self.write_styled(&text, Some(color), false)
            }
            _ => self.write_styled(&fit(IDLE_HINT, width), Some(Color::DarkGrey), false),
        }
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.write_plain(line)?;
        self.write_plain("\n")
    }

    fn write_plain(&mut self, text: &str) -> Result<()> {
        queue!(self.stream, Print(text)).map_err(anyhow::Error::from)
    }

    fn write_styled(&mut self, text: &str, color: Option<Color>, bold: bool) -> Result<()> {
        if !self.stream.supports_color() {
            return self.write_line(text);
        }
        if let Some(color) = color {
            queue!(self.stream, SetForegroundColor(color)).map_err(anyhow::Error::from)?;
        }
        if bold {
            queue!(self.stream, SetAttribute(Attribute::Bold)).map_err(anyhow::Error::from)?;
        }
        queue!(
            self.stream,
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("\n")
        )
        .map_err(anyhow::Error::from)
    }
}

/// Cut `line` to at most `width` display columns
fn fit(line: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out
}
