//! Upload handling: format sniffing and parsing.

mod format;
mod parser;
mod source;
mod spreadsheet;

pub use format::{extension_of, FileFormat, ACCEPTED_EXTENSIONS, XLSX_MEDIA_TYPE};
pub use parser::{Parser, ParserConfig};
pub use source::{SourceMetadata, UploadedFile};
