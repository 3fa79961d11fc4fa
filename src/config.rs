//! Configuration constants and profile loading for cartline
//!
//! Profiles live in an INI file, one section per profile name:
//!
//! ```ini
//! [default]
//! base_url = http://localhost:8000
//! api_prefix = /api/v1
//! list_limit = 100
//! id_addressing = query
//! confirm_delete = true
//! ```

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default profile file path for cartline
pub const DEFAULT_PROFILE_PATH: &str = "~/.cartline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "CARTLINE_PROFILE_PATH";

/// Environment variable holding the tracing filter directive
pub const LOG_FILTER_ENV_VAR: &str = "CARTLINE_LOG";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// The API rejects list limits outside `1..=MAX_LIST_LIMIT`.
pub const MAX_LIST_LIMIT: u32 = 100;

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Errors raised while reading a profile
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read profile file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: ini::Error,
    },

    #[error("invalid value '{value}' for '{key}' in profile '{profile}': {reason}")]
    InvalidValue {
        profile: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// How a record id is placed into update and delete URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdAddressing {
    /// `PUT /api/v1/aisles?id=1`
    #[default]
    Query,
    /// `PUT /api/v1/aisles/1`
    Path,
}

impl std::str::FromStr for IdAddressing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "query" => Ok(Self::Query),
            "path" => Ok(Self::Path),
            other => Err(format!("expected 'query' or 'path', got '{other}'")),
        }
    }
}

/// Connection settings for one named profile
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleProfile {
    name: String,
    base_url: String,
    api_prefix: String,
    list_limit: u32,
    id_addressing: IdAddressing,
    confirm_delete: bool,
}

impl ConsoleProfile {
    /// A profile holding only built-in defaults
    pub fn blank(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            list_limit: MAX_LIST_LIMIT,
            id_addressing: IdAddressing::default(),
            confirm_delete: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    pub fn list_limit(&self) -> u32 {
        self.list_limit
    }

    pub fn id_addressing(&self) -> IdAddressing {
        self.id_addressing
    }

    pub fn confirm_delete(&self) -> bool {
        self.confirm_delete
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_id_addressing(mut self, id_addressing: IdAddressing) -> Self {
        self.id_addressing = id_addressing;
        self
    }

    pub fn with_confirm_delete(mut self, confirm_delete: bool) -> Self {
        self.confirm_delete = confirm_delete;
        self
    }

    fn invalid(&self, key: &str, value: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidValue {
            profile: self.name.clone(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "base_url" => {
                let url = reqwest::Url::parse(value)
                    .map_err(|e| self.invalid(key, value, e.to_string()))?;
                if url.cannot_be_a_base() {
                    return Err(self.invalid(key, value, "not a base URL"));
                }
                self.base_url = value.trim_end_matches('/').to_string();
            }
            "api_prefix" => {
                let trimmed = value.trim().trim_end_matches('/');
                self.api_prefix = if trimmed.starts_with('/') || trimmed.is_empty() {
                    trimmed.to_string()
                } else {
                    format!("/{trimmed}")
                };
            }
            "list_limit" => {
                let limit: u32 = value
                    .trim()
                    .parse()
                    .map_err(|_| self.invalid(key, value, "not a positive integer"))?;
                if !(1..=MAX_LIST_LIMIT).contains(&limit) {
                    return Err(self.invalid(
                        key,
                        value,
                        format!("must be between 1 and {MAX_LIST_LIMIT}"),
                    ));
                }
                self.list_limit = limit;
            }
            "id_addressing" => {
                self.id_addressing = value.parse().map_err(|e: String| self.invalid(key, value, e))?;
            }
            "confirm_delete" => {
                self.confirm_delete = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(self.invalid(key, value, "expected true or false")),
                };
            }
            other => tracing::warn!("Ignoring unknown profile key '{other}' in '{}'", self.name),
        }
        Ok(())
    }
}

/// Reads console profiles from an INI file
#[derive(Debug, Clone)]
pub struct IniProfileStore {
    path: PathBuf,
}

impl IniProfileStore {
    /// Create a store for `path`, expanding a leading `~`
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(shellexpand::tilde(path).into_owned()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the named profile.
    ///
    /// A missing file or section yields a blank profile.
    pub fn load(&self, name: &str) -> Result<ConsoleProfile, ConfigError> {
        let mut profile = ConsoleProfile::blank(name);

        if !self.path.exists() {
            tracing::debug!(
                "Profile file '{}' not found, using blank profile",
                self.path.display()
            );
            return Ok(profile);
        }

        let ini = Ini::load_from_file(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.display().to_string(),
            source,
        })?;

        match ini.section(Some(name)) {
            Some(section) => {
                for (key, value) in section.iter() {
                    profile.apply(key, value)?;
                }
                tracing::info!("Loaded profile '{name}' from '{}'", self.path.display());
            }
            None => tracing::warn!(
                "Profile '{name}' not found in '{}', using blank profile",
                self.path.display()
            ),
        }

        Ok(profile)
    }
}
