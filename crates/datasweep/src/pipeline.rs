//! Pipeline configuration, user intents and the per-file run.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::input::{FileFormat, Parser, ParserConfig, SourceMetadata, UploadedFile};
use crate::output::{self, ExportResult};
use crate::schema::{CellValue, ColumnSummary, Table};
use crate::transform::{CleaningOp, CleaningReport, TransformEngine};
use crate::visualize::NumericSlice;

/// Rows shown in a preview by default.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Configuration for a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Rows included in previews.
    pub preview_rows: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl SweepConfig {
    /// Set the parser configuration.
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Set the number of preview rows.
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }
}

/// A discrete user action against one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Intent {
    /// Apply a cleaning operation.
    Clean(CleaningOp),
    /// Keep only these columns, in this order.
    SelectColumns(Vec<String>),
    /// Produce the numeric slice for charting.
    Visualize,
    /// Encode the result for download.
    Export(FileFormat),
}

/// Everything to do with one file, folded from its intents.
///
/// Stages always run in the same order: cleaning operations (in the order
/// they were requested), column selection, visualization, export. The
/// visualization therefore reflects cleaned data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunPlan {
    /// Cleaning operations, in order.
    pub cleaning: Vec<CleaningOp>,
    /// Column selection; `None` keeps every column.
    pub columns: Option<Vec<String>>,
    /// Whether to produce the numeric slice.
    pub visualize: bool,
    /// Export target, if any.
    pub export: Option<FileFormat>,
}

impl RunPlan {
    /// Create an empty plan: parse and preview only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cleaning operation.
    pub fn clean(mut self, op: CleaningOp) -> Self {
        self.cleaning.push(op);
        self
    }

    /// Replace the column selection.
    pub fn select_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Request the numeric slice.
    pub fn visualize(mut self) -> Self {
        self.visualize = true;
        self
    }

    /// Request an export.
    pub fn export(mut self, format: FileFormat) -> Self {
        self.export = Some(format);
        self
    }

    /// Record one intent. A later selection or export replaces an earlier one.
    pub fn push(&mut self, intent: Intent) {
        match intent {
            Intent::Clean(op) => self.cleaning.push(op),
            Intent::SelectColumns(columns) => self.columns = Some(columns),
            Intent::Visualize => self.visualize = true,
            Intent::Export(format) => self.export = Some(format),
        }
    }
}

impl FromIterator<Intent> for RunPlan {
    fn from_iter<I: IntoIterator<Item = Intent>>(iter: I) -> Self {
        let mut plan = RunPlan::new();
        for intent in iter {
            plan.push(intent);
        }
        plan
    }
}

/// The first rows of a table together with its column summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub columns: Vec<ColumnSummary>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Preview {
    pub fn of(table: &Table, rows: usize) -> Self {
        Self {
            columns: table.summary(),
            rows: table.head(rows),
        }
    }
}

/// A parsed upload.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFile {
    pub metadata: SourceMetadata,
    pub table: Table,
}

/// Everything produced by one run over one file.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Metadata about the upload as parsed.
    pub metadata: SourceMetadata,
    /// Preview of the parsed table, before cleaning.
    pub preview: Preview,
    /// Changes made by each cleaning operation.
    pub cleaning: CleaningReport,
    /// Table after cleaning and column selection.
    pub table: Table,
    /// Numeric slice, if visualization was requested.
    pub chart: Option<NumericSlice>,
    /// Encoded download, if an export was requested.
    pub export: Option<ExportResult>,
}

/// Outcome of one file in a batch.
#[derive(Debug)]
pub struct FileOutcome {
    /// File name as uploaded.
    pub file: String,
    pub result: Result<RunOutcome>,
}

/// The tabular pipeline.
///
/// Holds configuration only; no state carries over between files or runs.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: SweepConfig,
    parser: Parser,
    engine: TransformEngine,
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(SweepConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: SweepConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self {
            config,
            parser,
            engine: TransformEngine::new(),
        }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Sniff and parse an upload.
    pub fn load(&self, file: &UploadedFile) -> Result<LoadedFile> {
        let format = FileFormat::from_file_name(file.name())?;
        let table = self.parser.parse(file.bytes(), format)?;
        let metadata = SourceMetadata::new(file, format, table.row_count(), table.column_count());
        info!(
            file = %file.name(),
            rows = metadata.row_count,
            columns = metadata.column_count,
            "loaded file"
        );
        Ok(LoadedFile { metadata, table })
    }

    /// Preview of a loaded table, using the configured row count.
    pub fn preview(&self, table: &Table) -> Preview {
        Preview::of(table, self.config.preview_rows)
    }

    /// Run every stage of `plan` over one file.
    pub fn run(&self, file: &UploadedFile, plan: &RunPlan) -> Result<RunOutcome> {
        let LoadedFile { metadata, table } = self.load(file)?;
        let preview = self.preview(&table);

        let (table, cleaning) = self.engine.apply_all(&plan.cleaning, table);

        let table = match &plan.columns {
            Some(columns) => table.select(columns.as_slice())?,
            None => table,
        };

        let chart = plan.visualize.then(|| NumericSlice::from_table(&table));

        let export = match plan.export {
            Some(format) => Some(output::export(&table, file.name(), format)?),
            None => None,
        };

        Ok(RunOutcome {
            metadata,
            preview,
            cleaning,
            table,
            chart,
            export,
        })
    }

    /// Run `plan` over each file in upload order.
    ///
    /// Every file gets its own result; a failure never stops the others.
    pub fn run_batch<'a>(
        &self,
        files: impl IntoIterator<Item = &'a UploadedFile>,
        plan: &RunPlan,
    ) -> Vec<FileOutcome> {
        files
            .into_iter()
            .map(|file| {
                let result = self.run(file, plan);
                if let Err(ref e) = result {
                    warn!(file = %file.name(), error = %e, "skipping file");
                }
                FileOutcome {
                    file: file.name().to_string(),
                    result,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweepError;

    #[test]
    fn test_plan_from_intents() {
        let plan: RunPlan = vec![
            Intent::Clean(CleaningOp::DropDuplicateRows),
            Intent::SelectColumns(vec!["a".into()]),
            Intent::Clean(CleaningOp::StandardizeColumnNames),
            Intent::SelectColumns(vec!["b".into()]),
            Intent::Export(FileFormat::Csv),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            plan.cleaning,
            vec![CleaningOp::DropDuplicateRows, CleaningOp::StandardizeColumnNames]
        );
        assert_eq!(plan.columns, Some(vec!["b".to_string()]));
        assert!(!plan.visualize);
        assert_eq!(plan.export, Some(FileFormat::Csv));
    }

    #[test]
    fn test_plan_json() {
        let plan: RunPlan = serde_json::from_str(
            r#"{"cleaning": ["drop_duplicates", "fill_missing"], "visualize": true, "export": "xlsx"}"#,
        )
        .unwrap();
        assert_eq!(plan.cleaning.len(), 2);
        assert!(plan.visualize);
        assert_eq!(plan.columns, None);
        assert_eq!(plan.export, Some(FileFormat::Spreadsheet));
    }

    #[test]
    fn test_intent_json() {
        let intent: Intent =
            serde_json::from_str(r#"{"type": "clean", "value": "standardize_column_names"}"#).unwrap();
        assert_eq!(intent, Intent::Clean(CleaningOp::StandardizeColumnNames));
        let intent: Intent = serde_json::from_str(r#"{"type": "visualize"}"#).unwrap();
        assert_eq!(intent, Intent::Visualize);
    }

    #[test]
    fn test_run_unsupported_file() {
        let file = UploadedFile::new("notes.txt", b"a,b\n1,2\n".to_vec());
        let err = Pipeline::new().run(&file, &RunPlan::new()).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type: .txt");
    }

    #[test]
    fn test_preview_rows_configurable() {
        let pipeline = Pipeline::with_config(SweepConfig::default().with_preview_rows(2));
        let file = UploadedFile::new("d.csv", b"n\n1\n2\n3\n".to_vec());
        let outcome = pipeline.run(&file, &RunPlan::new()).unwrap();
        assert_eq!(outcome.preview.rows.len(), 2);
        assert_eq!(outcome.table.row_count(), 3);
    }

    #[test]
    fn test_selection_after_cleaning_uses_new_names() {
        let file = UploadedFile::new("d.csv", b"First Name,Age\nAl,3\n".to_vec());
        let plan = RunPlan::new()
            .clean(CleaningOp::StandardizeColumnNames)
            .select_columns(["age"]);
        let outcome = Pipeline::new().run(&file, &plan).unwrap();
        assert_eq!(outcome.table.column_names(), vec!["age"]);

        let plan = RunPlan::new()
            .clean(CleaningOp::StandardizeColumnNames)
            .select_columns(["Age"]);
        let err = Pipeline::new().run(&file, &plan).unwrap_err();
        assert!(matches!(err, SweepError::ColumnNotFound(_)));
    }
}
