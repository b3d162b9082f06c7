//! Table model and per-column type inference.

pub(crate) mod inference;
mod table;
mod types;
mod value;

pub use table::{Column, ColumnSummary, Table};
pub use types::ColumnType;
pub use value::CellValue;
