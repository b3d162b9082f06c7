//! In-memory table: ordered, uniquely named, typed columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::ColumnType;
use super::value::CellValue;
use crate::error::{Result, SweepError};

/// A single typed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Inferred type shared by every non-missing cell.
    pub dtype: ColumnType,
    /// Cell values in row order.
    pub values: Vec<CellValue>,
}

impl Column {
    /// Create a column from its type and values.
    pub fn new(dtype: ColumnType, values: Vec<CellValue>) -> Self {
        Self { dtype, values }
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Arithmetic mean of the non-missing numeric cells, if there are any.
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .values
            .iter()
            .filter_map(CellValue::as_f64)
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}

/// Summary of one column, for previews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: ColumnType,
    pub missing: usize,
}

/// Parsed tabular data.
///
/// Columns keep their insertion order and names are unique. The row count is
/// stored on the table so a projection to zero columns still knows how many
/// rows it came from.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    columns: IndexMap<String, Column>,
    row_count: usize,
}

impl Table {
    /// Create an empty table with the given number of rows and no columns.
    pub fn with_row_count(row_count: usize) -> Self {
        Self {
            columns: IndexMap::new(),
            row_count,
        }
    }

    /// Assemble a table whose columns are already known to hold `row_count`
    /// values each.
    pub(crate) fn from_parts(columns: IndexMap<String, Column>, row_count: usize) -> Self {
        debug_assert!(columns.values().all(|c| c.values.len() == row_count));
        Self { columns, row_count }
    }

    /// Build a table from named columns.
    ///
    /// Fails if a name repeats or the columns differ in length.
    pub fn from_columns(
        columns: impl IntoIterator<Item = (String, Column)>,
    ) -> Result<Self> {
        let mut iter = columns.into_iter().peekable();
        let row_count = iter.peek().map(|(_, c)| c.values.len()).unwrap_or(0);
        let mut table = Self::with_row_count(row_count);
        for (name, column) in iter {
            table.push_column(name, column)?;
        }
        Ok(table)
    }

    /// Append a column at the end.
    pub fn push_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        if column.values.len() != self.row_count {
            return Err(SweepError::InvalidTable(format!(
                "column '{}' has {} values, table has {} rows",
                name,
                column.values.len(),
                self.row_count
            )));
        }
        if self.columns.contains_key(&name) {
            return Err(SweepError::InvalidTable(format!(
                "duplicate column name '{}'",
                name
            )));
        }
        self.columns.insert(name, column);
        Ok(())
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Iterate over `(name, column)` pairs in order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn columns_mut(&mut self) -> impl Iterator<Item = (&String, &mut Column)> {
        self.columns.iter_mut()
    }

    pub(crate) fn into_columns(self) -> IndexMap<String, Column> {
        self.columns
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.columns.get_index(col).and_then(|(_, c)| c.values.get(row))
    }

    /// Get a row as cell references, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.values().map(|c| &c.values[index]).collect())
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.row_count).filter_map(move |i| self.row(i))
    }

    /// First `n` rows, cloned.
    pub fn head(&self, n: usize) -> Vec<Vec<CellValue>> {
        self.rows()
            .take(n)
            .map(|row| row.into_iter().cloned().collect())
            .collect()
    }

    /// Per-column type and missing counts.
    pub fn summary(&self) -> Vec<ColumnSummary> {
        self.columns
            .iter()
            .map(|(name, column)| ColumnSummary {
                name: name.clone(),
                dtype: column.dtype,
                missing: column.missing_count(),
            })
            .collect()
    }

    /// Project onto the given columns, in the given order.
    ///
    /// Names repeated in `names` are kept once, at their first position. An
    /// empty selection keeps the row count and drops every column.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let mut selected = Table::with_row_count(self.row_count);
        for name in names {
            let name = name.as_ref();
            if selected.columns.contains_key(name) {
                continue;
            }
            let column = self
                .columns
                .get(name)
                .ok_or_else(|| SweepError::ColumnNotFound(name.to_string()))?;
            selected.columns.insert(name.to_string(), column.clone());
        }
        Ok(selected)
    }

    /// Numeric columns, in order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns().filter(|(_, c)| c.dtype.is_numeric())
    }
}
