//! Numeric slice handed to a chart renderer.

use serde::{Deserialize, Serialize};

use crate::schema::Table;

/// Maximum number of numeric columns fed to a chart.
pub const MAX_CHART_COLUMNS: usize = 2;

/// The first numeric columns of a table, row by row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericSlice {
    /// Names of the charted columns, in table order.
    pub columns: Vec<String>,
    /// One entry per table row; `None` marks a missing value.
    pub rows: Vec<Vec<Option<f64>>>,
}

impl NumericSlice {
    /// Take the first [`MAX_CHART_COLUMNS`] numeric columns of `table`.
    ///
    /// Returns fewer columns when the table has fewer numeric columns. With
    /// none at all the slice is empty.
    pub fn from_table(table: &Table) -> Self {
        let picked: Vec<_> = table.numeric_columns().take(MAX_CHART_COLUMNS).collect();
        if picked.is_empty() {
            return Self::default();
        }

        let rows = (0..table.row_count())
            .map(|i| picked.iter().map(|(_, c)| c.values[i].as_f64()).collect())
            .collect();

        Self {
            columns: picked.iter().map(|(name, _)| name.to_string()).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
