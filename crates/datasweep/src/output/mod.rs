//! Encoding tables for download.

mod encoder;
mod export;

pub use encoder::{encode, encode_csv, encode_xlsx};
pub use export::{export, export_file_name, ExportResult};
