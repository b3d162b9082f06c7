//! Data Sweep: clean and convert uploaded CSV and spreadsheet files.
//!
//! Every uploaded file goes through the same linear, stateless pipeline:
//! format sniffing by extension, parsing into a typed [`Table`], optional
//! cleaning operations, column selection, an optional numeric slice for
//! charting, and re-encoding as CSV or `.xlsx` for download.
//!
//! # Example
//!
//! ```
//! use datasweep::{CleaningOp, FileFormat, Pipeline, RunPlan, UploadedFile};
//!
//! let file = UploadedFile::new("people.csv", "Name,Age\nAlice,30\nAlice,30\nBob,\n");
//! let plan = RunPlan::new()
//!     .clean(CleaningOp::DropDuplicateRows)
//!     .clean(CleaningOp::FillMissingNumericWithColumnMean)
//!     .export(FileFormat::Csv);
//!
//! let outcome = Pipeline::new().run(&file, &plan).unwrap();
//! let export = outcome.export.unwrap();
//! assert_eq!(export.file_name, "people.csv");
//! assert_eq!(String::from_utf8(export.bytes).unwrap(), "Name,Age\nAlice,30.0\nBob,30.0\n");
//! ```

pub mod error;
pub mod input;
pub mod output;
pub mod schema;
pub mod transform;
pub mod visualize;

mod pipeline;

pub use crate::pipeline::{
    FileOutcome, Intent, LoadedFile, Pipeline, Preview, RunOutcome, RunPlan, SweepConfig,
    DEFAULT_PREVIEW_ROWS,
};
pub use error::{Result, SweepError};
pub use input::{FileFormat, Parser, ParserConfig, SourceMetadata, UploadedFile, ACCEPTED_EXTENSIONS};
pub use output::ExportResult;
pub use schema::{CellValue, Column, ColumnSummary, ColumnType, Table};
pub use transform::{CleaningChange, CleaningOp, CleaningReport, TransformEngine};
pub use visualize::NumericSlice;
