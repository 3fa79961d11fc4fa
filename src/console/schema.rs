//! # Entity Schemas
//!
//! Describes each managed entity once: its endpoint name, its form fields and
//! which of them appear as table columns. Every other component is generic
//! over an [`EntitySchema`].

/// Input type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    Text,
}

/// How a field takes part in create and edit forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRole {
    /// Business key: editable on create, carried read-only on edit
    DomainKey,
    /// Editable in both forms
    Editable,
    /// Never shown, always submitted with this value
    Fixed(&'static str),
}

/// A single field of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub role: FieldRole,
    pub listed: bool,
    pub required: bool,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            role: FieldRole::Editable,
            listed: true,
            required: true,
        }
    }

    fn domain_key(mut self) -> Self {
        self.role = FieldRole::DomainKey;
        self
    }

    fn fixed(mut self, value: &'static str) -> Self {
        self.role = FieldRole::Fixed(value);
        self.listed = false;
        self
    }

    pub fn is_domain_key(&self) -> bool {
        self.role == FieldRole::DomainKey
    }

}

/// Schema of one managed entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    /// Singular name, e.g. `aisle`
    pub singular: &'static str,
    /// Collection name used in endpoints and list envelopes, e.g. `aisles`
    pub plural: &'static str,
    /// Human title, e.g. `Aisle`
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields rendered as table columns, in order
    pub fn columns(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.listed)
    }

    pub fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete this {}?", self.singular)
    }

    pub fn aisles() -> Self {
        Self {
            singular: "aisle",
            plural: "aisles",
            title: "Aisle",
            fields: vec![
                FieldSpec::new("aisle_id", "Aisle ID", FieldKind::Number).domain_key(),
                FieldSpec::new("aisle", "Aisle Name", FieldKind::Text),
            ],
        }
    }

    pub fn departments() -> Self {
        Self {
            singular: "department",
            plural: "departments",
            title: "Department",
            fields: vec![
                FieldSpec::new("department_id", "Department ID", FieldKind::Number).domain_key(),
                FieldSpec::new("department", "Department Name", FieldKind::Text),
            ],
        }
    }

    pub fn products() -> Self {
        Self {
            singular: "product",
            plural: "products",
            title: "Product",
            fields: vec![
                FieldSpec::new("product_id", "Product ID", FieldKind::Number).domain_key(),
                FieldSpec::new("product_name", "Product Name", FieldKind::Text),
                FieldSpec::new("aisle_id", "Aisle ID", FieldKind::Number),
                FieldSpec::new("department_id", "Department ID", FieldKind::Number),
            ],
        }
    }

    pub fn orders() -> Self {
        Self {
            singular: "order",
            plural: "orders",
            title: "Order",
            fields: vec![
                FieldSpec::new("order_id", "Order ID", FieldKind::Number).domain_key(),
                FieldSpec::new("user_id", "User ID", FieldKind::Number),
                FieldSpec::new("order_number", "Order Number", FieldKind::Number),
                FieldSpec::new("order_dow", "Order DOW", FieldKind::Number),
                FieldSpec::new("order_hour_of_day", "Order Hour", FieldKind::Number),
                FieldSpec::new("days_since_prior_order", "Days Since Prior", FieldKind::Number),
                // The API requires eval_set on create and the console always writes "test".
                FieldSpec::new("eval_set", "Eval Set", FieldKind::Text).fixed("test"),
            ],
        }
    }
}

/// Resolves entity names to schemas
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: Vec<EntitySchema>,
}

impl SchemaRegistry {
    /// Registry holding the four built-in entities
    pub fn builtin() -> Self {
        Self {
            schemas: vec![
                EntitySchema::aisles(),
                EntitySchema::departments(),
                EntitySchema::products(),
                EntitySchema::orders(),
            ],
        }
    }

    /// Look up by plural or singular name, ignoring case
    pub fn get(&self, name: &str) -> Option<&EntitySchema> {
        let name = name.trim().to_ascii_lowercase();
        self.schemas
            .iter()
            .find(|s| s.plural == name || s.singular == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schemas.iter().map(|s| s.plural)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
