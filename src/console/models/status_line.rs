//! # Status Line Model
//!
//! Encapsulates all state related to the status line display,
//! providing a clean interface for status bar rendering.

/// Severity of the current status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Status line model containing all status bar display state
#[derive(Debug, Clone)]
pub struct StatusLine {
    /// Temporary status message to display
    status_message: Option<(Severity, String)>,

    /// Profile name and path
    profile_name: String,
    profile_path: String,

    /// Status code of the last HTTP response, if any
    last_status_code: Option<u16>,
}

impl StatusLine {
    /// Create a new StatusLine with default values
    pub fn new() -> Self {
        Self {
            status_message: None,
            profile_name: "default".to_string(),
            profile_path: crate::config::DEFAULT_PROFILE_PATH.to_string(),
            last_status_code: None,
        }
    }

    // === Status Message Methods ===

    /// Set an informational message
    pub fn set_status_message<S: Into<String>>(&mut self, message: S) {
        self.status_message = Some((Severity::Info, message.into()));
    }

    /// Set an error message
    pub fn set_error_message<S: Into<String>>(&mut self, message: S) {
        self.status_message = Some((Severity::Error, message.into()));
    }

    /// Clear the status message
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Get the current status message
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(_, m)| m.as_str())
    }

    pub fn severity(&self) -> Option<Severity> {
        self.status_message.as_ref().map(|(s, _)| *s)
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Some(Severity::Error)
    }

    // === HTTP Status Methods ===

    pub fn set_last_status_code(&mut self, code: u16) {
        self.last_status_code = Some(code);
    }

    pub fn last_status_code(&self) -> Option<u16> {
        self.last_status_code
    }

    // === Profile Methods ===

    pub fn set_profile(&mut self, name: String, path: String) {
        self.profile_name = name;
        self.profile_path = path;
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn profile_path(&self) -> &str {
        &self.profile_path
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}
