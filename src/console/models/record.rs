//! # Record Model
//!
//! A flat entity record as returned by the API: an opaque `id` plus the
//! remaining fields kept as raw JSON values.

use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons a JSON value cannot be read as a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("record has no usable 'id'")]
    MissingId,
}

/// One row of an entity collection
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: String,
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Read a record from a JSON object carrying a string or numeric `id`.
    pub fn from_json(value: &Value) -> Result<Self, RecordError> {
        let object = value.as_object().ok_or(RecordError::NotAnObject)?;
        let id = match object.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err(RecordError::MissingId),
        };
        let fields = object
            .iter()
            .filter(|(key, _)| key.as_str() != "id")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(Self { id, fields })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Field value the way a form input would show it.
    ///
    /// Strings are unquoted, `null` and missing fields become empty.
    pub fn display_value(&self, field: &str) -> String {
        match self.fields.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
