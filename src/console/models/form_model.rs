//! # Form Model
//!
//! State of the create/edit form: which record it targets and the current
//! value of each field. Values are kept as entered text and submitted as
//! strings, in field order.

use crate::console::schema::{FieldKind, FieldSpec};
use serde_json::{Map, Value};
use thiserror::Error;

/// Form input problems reported back to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("no form is open")]
    NotOpen,
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("field '{0}' cannot be changed")]
    ReadOnly(String),
    #[error("{0} is required")]
    Required(String),
    #[error("{label} must be a number, got '{value}'")]
    NotANumber { label: String, value: String },
}

/// What a submit will do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// One input of the form
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub spec: FieldSpec,
    pub value: String,
    /// Submitted but neither shown nor editable
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormModel {
    mode: FormMode,
    title: String,
    fields: Vec<FormField>,
}

impl FormModel {
    pub fn new(mode: FormMode, title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            mode,
            title: title.into(),
            fields,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn visible_fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter().filter(|f| !f.hidden)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.spec.name == name)
            .map(|f| f.value.as_str())
    }

    /// Change the value of a visible field
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.spec.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if field.hidden {
            return Err(FormError::ReadOnly(name.to_string()));
        }
        field.value = value.into();
        Ok(())
    }

    /// Check `required` and numeric inputs, first failure wins
    pub fn validate(&self) -> Result<(), FormError> {
        for field in &self.fields {
            let value = field.value.trim();
            if value.is_empty() {
                if field.spec.required {
                    return Err(FormError::Required(field.spec.label.to_string()));
                }
                continue;
            }
            if field.spec.kind == FieldKind::Number
                && !value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
            {
                return Err(FormError::NotANumber {
                    label: field.spec.label.to_string(),
                    value: field.value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Flat JSON body with every field as a string, in form order.
    ///
    /// Text is sent as entered; number inputs drop surrounding whitespace.
    pub fn to_body(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|f| {
                let value = match f.spec.kind {
                    FieldKind::Number => f.value.trim(),
                    FieldKind::Text => f.value.as_str(),
                };
                (f.spec.name.to_string(), Value::String(value.to_string()))
            })
            .collect()
    }
}
