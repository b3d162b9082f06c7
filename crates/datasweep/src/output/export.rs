//! Export results offered for download.

use std::path::Path;

use crate::error::Result;
use crate::input::FileFormat;
use crate::schema::Table;

use super::encoder::encode;

/// An encoded table ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Encoded file contents.
    pub bytes: Vec<u8>,
    /// Source stem with the target format's extension.
    pub file_name: String,
    /// Media type for the download.
    pub media_type: &'static str,
    /// Target format.
    pub format: FileFormat,
}

/// Encode `table` as `format`, naming it after `source_name`.
pub fn export(table: &Table, source_name: &str, format: FileFormat) -> Result<ExportResult> {
    let bytes = encode(table, format)?;
    Ok(ExportResult {
        bytes,
        file_name: export_file_name(source_name, format),
        media_type: format.media_type(),
        format,
    })
}

/// Replace the extension of `source_name` with the format's canonical one.
pub fn export_file_name(source_name: &str, format: FileFormat) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_name.to_string());
    format!("{}.{}", stem, format.extension())
}
