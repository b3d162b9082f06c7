//! Cleaning operations and the engine that applies them.

mod engine;
mod operations;

pub use engine::{standardize_name, TransformEngine};
pub use operations::{CleaningChange, CleaningOp, CleaningReport, ColumnRename};
