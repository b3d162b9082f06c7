//! Uploaded file and source metadata.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::format::{extension_of, FileFormat};
use crate::error::{Result, SweepError};

/// An uploaded file: raw bytes plus the name it was uploaded under.
///
/// Immutable once created; the pipeline only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create an uploaded file from its name and contents.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, keeping only its file name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| SweepError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Extension derived from the name, with its leading dot.
    pub fn extension(&self) -> String {
        extension_of(&self.name)
    }

    /// Name without its extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }
}

/// Metadata about a parsed upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name as uploaded.
    pub file: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format.
    pub format: FileFormat,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
}

impl SourceMetadata {
    /// Create metadata for a file that has been parsed.
    pub fn new(file: &UploadedFile, format: FileFormat, row_count: usize, column_count: usize) -> Self {
        Self {
            file: file.name().to_string(),
            size_bytes: file.size_bytes(),
            format,
            row_count,
            column_count,
        }
    }

    /// File size in KiB, as shown next to the file name.
    pub fn size_kib(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}
