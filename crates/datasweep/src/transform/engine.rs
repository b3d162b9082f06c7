//! Transformation engine that applies cleaning operations to tables.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::schema::{CellValue, Column, ColumnType, Table};

use super::operations::{CleaningChange, CleaningOp, CleaningReport, ColumnRename};

/// Engine for applying cleaning operations.
///
/// Each operation consumes a table and returns the cleaned table together
/// with a description of what changed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformEngine;

impl TransformEngine {
    /// Create a new transform engine.
    pub fn new() -> Self {
        Self
    }

    /// Apply operations in order.
    pub fn apply_all(&self, ops: &[CleaningOp], table: Table) -> (Table, CleaningReport) {
        let mut report = CleaningReport::new();
        let mut table = table;
        for &op in ops {
            let (next, change) = self.apply(op, table);
            report.add_change(change);
            table = next;
        }
        (table, report)
    }

    /// Apply a single operation.
    pub fn apply(&self, op: CleaningOp, table: Table) -> (Table, CleaningChange) {
        let (table, change) = match op {
            CleaningOp::DropDuplicateRows => self.drop_duplicate_rows(table),
            CleaningOp::FillMissingNumericWithColumnMean => self.fill_missing_with_mean(table),
            CleaningOp::StandardizeColumnNames => self.standardize_column_names(table),
        };
        debug!(operation = ?op, changed = change.values_changed, "{}", change.description);
        (table, change)
    }

    /// Keep the first occurrence of every distinct row, in original order.
    fn drop_duplicate_rows(&self, table: Table) -> (Table, CleaningChange) {
        let keep: Vec<bool> = {
            let mut seen: HashSet<Vec<&CellValue>> = HashSet::with_capacity(table.row_count());
            table.rows().map(|row| seen.insert(row)).collect()
        };

        let kept = keep.iter().filter(|&&k| k).count();
        let removed = table.row_count() - kept;

        let columns = table
            .into_columns()
            .into_iter()
            .map(|(name, column)| {
                let values = column
                    .values
                    .into_iter()
                    .zip(&keep)
                    .filter_map(|(value, &k)| k.then_some(value))
                    .collect();
                (name, Column::new(column.dtype, values))
            })
            .collect();

        let change = CleaningChange {
            operation: CleaningOp::DropDuplicateRows,
            description: format!("Removed {} duplicate row(s)", removed),
            values_changed: removed,
            renames: Vec::new(),
        };
        (Table::from_parts(columns, kept), change)
    }

    /// Fill missing cells of numeric columns with the mean of the present ones.
    ///
    /// Columns without any present value are left untouched. Filled integer
    /// columns become float columns.
    fn fill_missing_with_mean(&self, mut table: Table) -> (Table, CleaningChange) {
        let mut filled = 0;
        let mut touched = Vec::new();

        for (name, column) in table.columns_mut() {
            if !column.dtype.is_numeric() || column.missing_count() == 0 {
                continue;
            }
            let Some(mean) = column.mean() else {
                continue;
            };

            if column.dtype == ColumnType::Integer {
                column.dtype = ColumnType::Float;
                for value in column.values.iter_mut() {
                    if let CellValue::Integer(i) = value {
                        *value = CellValue::Float(*i as f64);
                    }
                }
            }

            for value in column.values.iter_mut().filter(|v| v.is_missing()) {
                *value = CellValue::Float(mean);
                filled += 1;
            }
            touched.push(name.clone());
        }

        let description = if touched.is_empty() {
            "No missing numeric values to fill".to_string()
        } else {
            format!(
                "Filled {} missing value(s) with column means in {}",
                filled,
                quoted_list(&touched)
            )
        };

        let change = CleaningChange {
            operation: CleaningOp::FillMissingNumericWithColumnMean,
            description,
            values_changed: filled,
            renames: Vec::new(),
        };
        (table, change)
    }

    /// Lowercase names and replace spaces with underscores.
    ///
    /// The first column to claim a name keeps it. Later columns that would
    /// collide get the smallest free `_2`, `_3`, ... suffix.
    fn standardize_column_names(&self, table: Table) -> (Table, CleaningChange) {
        let row_count = table.row_count();
        let mut taken: HashSet<String> = HashSet::new();
        let mut renames = Vec::new();
        let mut columns = IndexMap::new();

        for (name, column) in table.into_columns() {
            let base = standardize_name(&name);
            let mut candidate = base.clone();
            let mut suffix = 2;
            while taken.contains(&candidate) {
                candidate = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            taken.insert(candidate.clone());

            if candidate != name {
                renames.push(ColumnRename {
                    from: name,
                    to: candidate.clone(),
                });
            }
            columns.insert(candidate, column);
        }

        let description = if renames.is_empty() {
            "Column names already standardized".to_string()
        } else {
            format!("Renamed {} column(s)", renames.len())
        };

        let change = CleaningChange {
            operation: CleaningOp::StandardizeColumnNames,
            description,
            values_changed: renames.len(),
            renames,
        };
        (Table::from_parts(columns, row_count), change)
    }
}

/// Lowercase form of a column name with spaces replaced by underscores.
pub fn standardize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{}'", n))
        .collect::<Vec<_>>()
        .join(", ")
}
