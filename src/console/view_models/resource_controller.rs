//! # Resource Controller
//!
//! View model for one entity: the list-view lifecycle (load, reload after
//! every mutation), row actions, and the form cycle
//! `list shown -> form open -> list shown again`.
//!
//! Failures are logged and reported on the status line; the table and any
//! open form are left as they were. Nothing is retried.

use super::form_manager::FormManager;
use crate::console::models::{FormMode, FormModel, RowActionKind, StatusLine, TableModel};
use crate::console::schema::EntitySchema;
use crate::console::services::{ApiError, ApiResponse, ResourceApi};
use serde_json::Value;

/// Blocking yes/no prompt shown before a delete
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of a delete action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The prompt was declined, nothing was sent
    Declined,
    /// The server accepted the delete
    Deleted,
    /// The server answered with an error or an unreadable body
    Rejected,
    /// No response arrived
    Failed,
}

#[derive(Debug)]
pub struct ResourceController {
    api: ResourceApi,
    table: TableModel,
    forms: FormManager,
    status_line: StatusLine,
}

impl ResourceController {
    pub fn new(api: ResourceApi) -> Self {
        let forms = FormManager::new(api.schema().clone());
        Self {
            api,
            table: TableModel::new(),
            forms,
            status_line: StatusLine::new(),
        }
    }

    pub fn schema(&self) -> &EntitySchema {
        self.api.schema()
    }

    pub fn table(&self) -> &TableModel {
        &self.table
    }

    pub fn form(&self) -> Option<&FormModel> {
        self.forms.form()
    }

    pub fn is_form_open(&self) -> bool {
        self.forms.is_open()
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    pub fn status_line_mut(&mut self) -> &mut StatusLine {
        &mut self.status_line
    }

    fn report_failure(&mut self, action: &str, error: &ApiError) {
        tracing::error!("Error {action}: {error}");
        if let ApiError::Transport(e) = error {
            if let Some(code) = e.status() {
                self.status_line.set_last_status_code(code);
            }
        }
        self.status_line
            .set_error_message(format!("Error {action}: {error}"));
    }

    fn record_response(&mut self, response: &ApiResponse) {
        self.status_line.set_last_status_code(response.status);
    }

    /// Replace the table with the current list from the server
    pub async fn load(&mut self) -> bool {
        match self.api.list().await {
            Ok(records) => {
                let count = records.len();
                self.table.replace_rows(records);
                self.status_line
                    .set_status_message(format!("Loaded {count} {}", self.schema().plural));
                true
            }
            Err(e) => {
                let action = format!("fetching {}", self.schema().plural);
                self.report_failure(&action, &e);
                false
            }
        }
    }

    /// Record id bound to a row action, if the row exists
    pub fn row_action_id(&self, row: usize, kind: RowActionKind) -> Option<String> {
        self.table
            .row_actions(row)
            .into_iter()
            .find(|action| action.kind == kind)
            .map(|action| action.id)
    }

    fn missing_row(&mut self, row: usize) {
        self.status_line
            .set_error_message(format!("No row {row} in {}", self.schema().plural));
    }

    pub fn show_create(&mut self) {
        self.forms.open_create();
        self.status_line
            .set_status_message(format!("New {}", self.schema().singular));
    }

    /// Fetch one record and open it for editing
    pub async fn show_edit(&mut self, id: &str) -> bool {
        match self.api.get(id).await {
            Ok(record) => {
                self.forms.open_edit(&record);
                self.status_line
                    .set_status_message(format!("Editing {} {id}", self.schema().singular));
                true
            }
            Err(e) => {
                let action = format!("fetching {}", self.schema().singular);
                self.report_failure(&action, &e);
                false
            }
        }
    }

    pub async fn show_edit_row(&mut self, row: usize) -> bool {
        match self.row_action_id(row, RowActionKind::Edit) {
            Some(id) => self.show_edit(&id).await,
            None => {
                self.missing_row(row);
                false
            }
        }
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        match self.forms.set_field(name, value) {
            Ok(()) => true,
            Err(e) => {
                self.status_line.set_error_message(e.to_string());
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        if self.forms.is_open() {
            self.forms.hide();
            self.status_line.set_status_message("Cancelled");
        }
    }

    /// Send the open form; on success hide it and reload the list once
    pub async fn submit(&mut self) -> bool {
        let (mode, body) = match self.forms.prepare_submit() {
            Ok(prepared) => prepared,
            Err(e) => {
                self.status_line.set_error_message(e.to_string());
                return false;
            }
        };

        let singular = self.schema().singular;
        let (result, action, done) = match &mode {
            FormMode::Create => (self.api.create(body).await, "creating", "Created"),
            FormMode::Edit { id } => (self.api.update(id, body).await, "updating", "Updated"),
        };

        match result {
            Ok(response) => {
                self.record_response(&response);
                self.forms.hide();
                if self.load().await {
                    self.status_line
                        .set_status_message(format!("{done} {singular}"));
                }
                true
            }
            Err(e) => {
                self.report_failure(&format!("{action} {singular}"), &e);
                false
            }
        }
    }

    /// Confirm, delete, then reload whenever the server answered
    pub async fn delete<C: Confirm + ?Sized>(&mut self, id: &str, confirm: &mut C) -> DeleteOutcome {
        let prompt = self.schema().delete_prompt();
        if !confirm.confirm(&prompt) {
            self.status_line.set_status_message("Delete cancelled");
            return DeleteOutcome::Declined;
        }

        let singular = self.schema().singular;
        match self.api.delete(id).await {
            Ok(response) => {
                self.record_response(&response);
                let message = response
                    .body
                    .as_ref()
                    .and_then(|body| body.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Deleted {singular} {id}"));
                if self.load().await {
                    self.status_line.set_status_message(message);
                }
                DeleteOutcome::Deleted
            }
            Err(e) if e.response_received() => {
                self.load().await;
                self.report_failure(&format!("deleting {singular}"), &e);
                DeleteOutcome::Rejected
            }
            Err(e) => {
                self.report_failure(&format!("deleting {singular}"), &e);
                DeleteOutcome::Failed
            }
        }
    }

    pub async fn delete_row<C: Confirm + ?Sized>(&mut self, row: usize, confirm: &mut C) -> Option<DeleteOutcome> {
        match self.row_action_id(row, RowActionKind::Delete) {
            Some(id) => Some(self.delete(&id, confirm).await),
            None => {
                self.missing_row(row);
                None
            }
        }
    }
}
