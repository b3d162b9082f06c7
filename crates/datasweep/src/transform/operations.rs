//! Cleaning operations that can be applied to a table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cleaning operation, invoked on explicit user action.
///
/// Every operation maps a table to a new table and may be applied any number
/// of times in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningOp {
    /// Remove rows that repeat an earlier row across all columns.
    #[serde(alias = "drop_duplicates")]
    DropDuplicateRows,

    /// Replace missing cells in numeric columns with the column mean.
    #[serde(alias = "fill_missing")]
    FillMissingNumericWithColumnMean,

    /// Lowercase column names and replace spaces with underscores.
    #[serde(alias = "lowercase_and_underscore_column_names", alias = "standardize_names")]
    StandardizeColumnNames,
}

impl CleaningOp {
    /// Every operation, in the order the controls are usually laid out.
    pub const ALL: [CleaningOp; 3] = [
        CleaningOp::DropDuplicateRows,
        CleaningOp::FillMissingNumericWithColumnMean,
        CleaningOp::StandardizeColumnNames,
    ];

    /// Get a human-readable label for the operation.
    pub fn label(&self) -> &'static str {
        match self {
            CleaningOp::DropDuplicateRows => "Remove duplicates",
            CleaningOp::FillMissingNumericWithColumnMean => "Fill missing values",
            CleaningOp::StandardizeColumnNames => "Standardize column names",
        }
    }
}

impl fmt::Display for CleaningOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A column renamed by [`CleaningOp::StandardizeColumnNames`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    pub from: String,
    pub to: String,
}

/// What a single cleaning operation changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningChange {
    /// Operation that was applied.
    pub operation: CleaningOp,

    /// Description of the change, suitable as a success message.
    pub description: String,

    /// Rows removed, cells filled or columns renamed.
    pub values_changed: usize,

    /// Renamed columns, for name standardization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub renames: Vec<ColumnRename>,
}

/// Result of applying a sequence of cleaning operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Number of operations applied.
    pub operations_applied: usize,

    /// Total values changed across all operations.
    pub values_changed: usize,

    /// Detailed changes for each operation, in order.
    pub changes: Vec<CleaningChange>,
}

impl CleaningReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a change to the report.
    pub fn add_change(&mut self, change: CleaningChange) {
        self.operations_applied += 1;
        self.values_changed += change.values_changed;
        self.changes.push(change);
    }
}
