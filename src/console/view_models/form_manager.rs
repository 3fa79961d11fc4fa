//! # Form Manager
//!
//! Builds create and edit forms from an entity schema, holds the open form
//! and turns it into a request body on submit.

use crate::console::models::{FormError, FormField, FormMode, FormModel, Record};
use crate::console::schema::{EntitySchema, FieldRole};
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
pub struct FormManager {
    schema: EntitySchema,
    form: Option<FormModel>,
}

impl FormManager {
    pub fn new(schema: EntitySchema) -> Self {
        Self { schema, form: None }
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn form(&self) -> Option<&FormModel> {
        self.form.as_ref()
    }

    /// Open a blank form for a new record
    pub fn open_create(&mut self) {
        let fields = self
            .schema
            .fields
            .iter()
            .map(|spec| match spec.role {
                FieldRole::Fixed(value) => FormField {
                    spec: spec.clone(),
                    value: value.to_string(),
                    hidden: true,
                },
                FieldRole::DomainKey | FieldRole::Editable => FormField {
                    spec: spec.clone(),
                    value: String::new(),
                    hidden: false,
                },
            })
            .collect();
        self.form = Some(FormModel::new(
            FormMode::Create,
            format!("Create New {}", self.schema.title),
            fields,
        ));
        tracing::debug!("Opened create form for {}", self.schema.singular);
    }

    /// Open a form pre-filled from `record`.
    ///
    /// The domain key travels as a hidden field so the body still carries it.
    pub fn open_edit(&mut self, record: &Record) {
        let fields = self
            .schema
            .fields
            .iter()
            .map(|spec| match spec.role {
                FieldRole::Fixed(value) => FormField {
                    spec: spec.clone(),
                    value: value.to_string(),
                    hidden: true,
                },
                FieldRole::DomainKey => FormField {
                    spec: spec.clone(),
                    value: record.display_value(spec.name),
                    hidden: true,
                },
                FieldRole::Editable => FormField {
                    spec: spec.clone(),
                    value: record.display_value(spec.name),
                    hidden: false,
                },
            })
            .collect();
        self.form = Some(FormModel::new(
            FormMode::Edit {
                id: record.id().to_string(),
            },
            format!("Edit {}", self.schema.title),
            fields,
        ));
        tracing::debug!("Opened edit form for {} {}", self.schema.singular, record.id());
    }

    pub fn hide(&mut self) {
        self.form = None;
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.form
            .as_mut()
            .ok_or(FormError::NotOpen)?
            .set(name, value)
    }

    /// Validate the open form and produce what to send
    pub fn prepare_submit(&self) -> Result<(FormMode, Map<String, Value>), FormError> {
        let form = self.form.as_ref().ok_or(FormError::NotOpen)?;
        form.validate()?;
        Ok((form.mode().clone(), form.to_body()))
    }
}
