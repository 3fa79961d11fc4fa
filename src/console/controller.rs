//! # Console Application Controller
//!
//! The controller orchestrates the console components and runs the command
//! loop: render the active entity, read one line, dispatch it, repeat.
//! Commands are handled one at a time, so requests never overlap.

use crate::config::ConsoleProfile;
use crate::console::commands::{ConsoleCommand, HELP_TEXT};
use crate::console::io::{LineSource, RenderStream};
use crate::console::schema::SchemaRegistry;
use crate::console::services::{EndpointConfig, ResourceApi, Transport};
use crate::console::view_models::{Confirm, DeleteOutcome, ResourceController};
use crate::console::views::ConsoleRenderer;
use anyhow::{anyhow, Result};
use std::io::Write;
use std::sync::Arc;

/// Asks for confirmation on the console itself
struct LinePrompt<'a, LS: LineSource, W: Write> {
    source: &'a mut LS,
    out: &'a mut W,
}

impl<LS: LineSource, W: Write> Confirm for LinePrompt<'_, LS, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if let Err(e) = write!(self.out, "{prompt} [y/N] ").and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to show delete prompt: {}", e);
        }
        match self.source.read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Failed to read delete confirmation: {}", e);
                false
            }
        }
    }
}

/// The main application controller
pub struct AppController<LS: LineSource, RS: RenderStream> {
    registry: SchemaRegistry,
    endpoint: EndpointConfig,
    transport: Arc<dyn Transport>,
    profile_name: String,
    profile_path: String,
    confirm_delete: bool,
    active: ResourceController,
    renderer: ConsoleRenderer<RS>,
    line_source: LS,
    should_quit: bool,
}

impl<LS: LineSource, RS: RenderStream> AppController<LS, RS> {
    /// Create the controller with injected I/O streams and transport
    pub fn with_io_streams(
        profile: &ConsoleProfile,
        profile_path: &str,
        entity: &str,
        transport: Arc<dyn Transport>,
        line_source: LS,
        render_stream: RS,
    ) -> Result<Self> {
        let registry = SchemaRegistry::builtin();
        let endpoint = EndpointConfig::from(profile);
        let schema = registry.get(entity).cloned().ok_or_else(|| {
            anyhow!(
                "Unknown entity '{}'. Expected one of: {}",
                entity,
                registry.names().collect::<Vec<_>>().join(", ")
            )
        })?;

        let mut active = ResourceController::new(ResourceApi::new(
            schema,
            endpoint.clone(),
            Arc::clone(&transport),
        ));
        active
            .status_line_mut()
            .set_profile(profile.name().to_string(), profile_path.to_string());

        Ok(Self {
            registry,
            endpoint,
            transport,
            profile_name: profile.name().to_string(),
            profile_path: profile_path.to_string(),
            confirm_delete: profile.confirm_delete(),
            active,
            renderer: ConsoleRenderer::new(render_stream),
            line_source,
            should_quit: false,
        })
    }

    pub fn active(&self) -> &ResourceController {
        &self.active
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main command loop until `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(
            "Starting console on {} with profile '{}'",
            self.active.schema().plural,
            self.profile_name
        );
        self.active.load().await;

        while !self.should_quit {
            self.render()?;
            match self.line_source.read_line()? {
                Some(line) => self.process_line(&line).await,
                None => {
                    tracing::debug!("Input closed");
                    break;
                }
            }
        }

        // Leave the cursor on a fresh line
        writeln!(self.renderer.stream_mut())?;
        tracing::info!("Console closed");
        Ok(())
    }

    /// Draw the current frame
    pub fn render(&mut self) -> Result<()> {
        self.renderer.render(&self.active)
    }

    /// Load the active entity and print its table once.
    ///
    /// Returns whether the load succeeded.
    pub async fn print_once(&mut self) -> Result<bool> {
        let loaded = self.active.load().await;
        self.renderer.render_table(&self.active)?;
        Ok(loaded)
    }

    /// Parse and dispatch one console line
    pub async fn process_line(&mut self, line: &str) {
        tracing::debug!("Console input: {:?}", line);
        match ConsoleCommand::parse(line, &self.registry) {
            Ok(command) => self.dispatch(command).await,
            Err(e) => self.active.status_line_mut().set_error_message(e.to_string()),
        }
    }

    async fn dispatch(&mut self, command: ConsoleCommand) {
        match command {
            ConsoleCommand::Noop => {}
            ConsoleCommand::Reload => {
                self.active.load().await;
            }
            ConsoleCommand::Use(name) => self.switch_entity(&name).await,
            ConsoleCommand::New => self.active.show_create(),
            ConsoleCommand::Edit(row) => {
                self.active.show_edit_row(row).await;
            }
            ConsoleCommand::Delete(row) => self.delete_row(row).await,
            ConsoleCommand::Set { field, value } => {
                self.active.set_field(&field, &value);
            }
            ConsoleCommand::Save => {
                self.active.submit().await;
            }
            ConsoleCommand::Cancel => self.active.cancel(),
            ConsoleCommand::Help => self.active.status_line_mut().set_status_message(HELP_TEXT),
            ConsoleCommand::Quit => self.should_quit = true,
        }
    }

    async fn delete_row(&mut self, row: usize) {
        let outcome = if self.confirm_delete {
            let mut prompt = LinePrompt {
                source: &mut self.line_source,
                out: self.renderer.stream_mut(),
            };
            self.active.delete_row(row, &mut prompt).await
        } else {
            let mut always = |_: &str| true;
            self.active.delete_row(row, &mut always).await
        };
        if let Some(DeleteOutcome::Rejected | DeleteOutcome::Failed) = outcome {
            tracing::debug!("Delete of row {} did not go through", row);
        }
    }

    async fn switch_entity(&mut self, name: &str) {
        let Some(schema) = self.registry.get(name).cloned() else {
            self.active
                .status_line_mut()
                .set_error_message(format!("Unknown entity '{name}'"));
            return;
        };
        tracing::info!("Switching to {}", schema.plural);

        let mut next = ResourceController::new(ResourceApi::new(
            schema,
            self.endpoint.clone(),
            Arc::clone(&self.transport),
        ));
        next.status_line_mut()
            .set_profile(self.profile_name.clone(), self.profile_path.clone());
        self.active = next;
        self.active.load().await;
    }
}
