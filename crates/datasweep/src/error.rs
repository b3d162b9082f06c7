//! Error types for the Data Sweep library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not one the pipeline can read.
    #[error("Unsupported file type: {}", describe_extension(.0))]
    UnsupportedFormat(String),

    /// Columns that cannot form a table: ragged lengths or a repeated name.
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from the spreadsheet reader.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    /// Empty file or no header to build a table from.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A selected or referenced column does not exist.
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// Failure while encoding a table for export.
    #[error("Encode error: {0}")]
    Encode(String),
}

impl From<rust_xlsxwriter::XlsxError> for SweepError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        SweepError::Encode(err.to_string())
    }
}

fn describe_extension(ext: &str) -> &str {
    if ext.is_empty() { "(no extension)" } else { ext }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, SweepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_names_extension() {
        let err = SweepError::UnsupportedFormat(".txt".to_string());
        assert_eq!(err.to_string(), "Unsupported file type: .txt");

        let err = SweepError::UnsupportedFormat(String::new());
        assert_eq!(err.to_string(), "Unsupported file type: (no extension)");
    }
}
