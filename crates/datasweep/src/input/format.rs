//! File format sniffing by extension.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};

/// Extensions accepted by the pipeline, without the leading dot.
///
/// Upload collaborators can use this as a filter hint; the pipeline still
/// validates every file name itself.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "xlsx"];

/// Media type of a spreadsheet (`.xlsx`) download.
pub const XLSX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A tabular file format the pipeline can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    /// Comma-separated values.
    #[serde(rename = "csv")]
    Csv,
    /// Office Open XML workbook.
    #[serde(rename = "xlsx", alias = "spreadsheet", alias = "excel")]
    Spreadsheet,
}

impl FileFormat {
    /// Determine the format from a file name's extension (case-insensitive).
    ///
    /// Content is never inspected. Anything other than `.csv` or `.xlsx` is
    /// [`SweepError::UnsupportedFormat`] carrying the extension as written,
    /// with its leading dot.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let ext = extension_of(name);
        match ext.to_ascii_lowercase().as_str() {
            ".csv" => Ok(FileFormat::Csv),
            ".xlsx" => Ok(FileFormat::Spreadsheet),
            _ => Err(SweepError::UnsupportedFormat(ext)),
        }
    }

    /// Canonical extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Spreadsheet => "xlsx",
        }
    }

    /// Media type used when offering a file of this format for download.
    pub fn media_type(&self) -> &'static str {
        match self {
            FileFormat::Csv => "text/csv",
            FileFormat::Spreadsheet => XLSX_MEDIA_TYPE,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Extension of a file name including the leading dot, or an empty string.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_known_extensions() {
        assert_eq!(FileFormat::from_file_name("data.csv").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_file_name("DATA.CSV").unwrap(), FileFormat::Csv);
        assert_eq!(
            FileFormat::from_file_name("report.Xlsx").unwrap(),
            FileFormat::Spreadsheet
        );
    }

    #[test]
    fn test_sniff_unsupported_reports_actual_extension() {
        let err = FileFormat::from_file_name("notes.TXT").unwrap_err();
        assert!(matches!(&err, SweepError::UnsupportedFormat(ext) if ext == ".TXT"));
        assert_eq!(err.to_string(), "Unsupported file type: .TXT");

        let err = FileFormat::from_file_name("book.xls").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type: .xls");
    }

    #[test]
    fn test_sniff_without_extension() {
        let err = FileFormat::from_file_name("Makefile").unwrap_err();
        assert!(matches!(&err, SweepError::UnsupportedFormat(ext) if ext.is_empty()));
    }

    #[test]
    fn test_media_types() {
        assert_eq!(FileFormat::Csv.media_type(), "text/csv");
        assert_eq!(FileFormat::Spreadsheet.media_type(), XLSX_MEDIA_TYPE);
    }

    #[test]
    fn test_serde_names() {
        let fmt: FileFormat = serde_json::from_str("\"xlsx\"").unwrap();
        assert_eq!(fmt, FileFormat::Spreadsheet);
        let fmt: FileFormat = serde_json::from_str("\"excel\"").unwrap();
        assert_eq!(fmt, FileFormat::Spreadsheet);
        assert_eq!(serde_json::to_string(&FileFormat::Csv).unwrap(), "\"csv\"");
        assert!(serde_json::from_str::<FileFormat>("\"parquet\"").is_err());
    }
}
