//! # Models
//!
//! Plain view-model state for the console. Models hold data only; they never
//! talk to the network or the terminal.

pub mod form_model;
pub mod record;
pub mod status_line;
pub mod table_model;

pub use form_model::{FormError, FormField, FormMode, FormModel};
pub use record::{Record, RecordError};
pub use status_line::{Severity, StatusLine};
pub use table_model::{RowAction, RowActionKind, TableModel};
