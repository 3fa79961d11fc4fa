//! # Table Model
//!
//! Holds the rows of the most recent successful list load. Rows are replaced
//! wholesale on every load; nothing is patched incrementally.

use super::record::Record;

/// Action offered on every table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActionKind {
    Edit,
    Delete,
}

impl RowActionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }
}

/// A row action bound to the record id it operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub kind: RowActionKind,
    pub id: String,
}

#[derive(Debug, Clone, Default)]
pub struct TableModel {
    rows: Vec<Record>,
}

impl TableModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all rows with a freshly loaded list
    pub fn replace_rows(&mut self, rows: Vec<Record>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Record at a 1-based row number
    pub fn row(&self, number: usize) -> Option<&Record> {
        number.checked_sub(1).and_then(|index| self.rows.get(index))
    }

    /// Actions for a 1-based row number
    pub fn row_actions(&self, number: usize) -> Vec<RowAction> {
        self.row(number)
            .map(|record| {
                [RowActionKind::Edit, RowActionKind::Delete]
                    .into_iter()
                    .map(|kind| RowAction {
                        kind,
                        id: record.id().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
