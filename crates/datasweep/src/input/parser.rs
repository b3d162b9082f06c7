//! CSV and spreadsheet parsing into a [`Table`].

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::format::FileFormat;
use super::spreadsheet;
use crate::error::{Result, SweepError};
use crate::schema::inference::infer_text_column;
use crate::schema::{CellValue, Column, ColumnType, Table};

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// CSV field delimiter.
    pub delimiter: u8,
    /// CSV quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// Parses uploaded bytes into tables.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse bytes of the given format.
    ///
    /// The first row is the header. Any malformed input fails the whole
    /// parse; no partial table is produced.
    pub fn parse(&self, bytes: &[u8], format: FileFormat) -> Result<Table> {
        let table = match format {
            FileFormat::Csv => self.parse_csv(bytes)?,
            FileFormat::Spreadsheet => spreadsheet::read_first_sheet(bytes)?,
        };
        debug!(
            format = %format,
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed table"
        );
        Ok(table)
    }

    /// Parse comma-delimited bytes.
    fn parse_csv(&self, bytes: &[u8]) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(true)
            .flexible(false)
            .from_reader(bytes);

        let raw_headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if raw_headers.is_empty() {
            return Err(SweepError::EmptyData("No columns found".to_string()));
        }
        let headers = normalize_headers(raw_headers);

        // Columnar buffers, one per header
        let mut fields: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for result in reader.records() {
            let record = result?;
            for (column, value) in fields.iter_mut().zip(record.iter()) {
                column.push(value.to_string());
            }
        }

        build_table(headers, fields.iter().map(|f| infer_text_column(f)))
    }
}

/// Assemble inferred columns under their header names.
pub(crate) fn build_table(
    headers: Vec<String>,
    columns: impl Iterator<Item = (ColumnType, Vec<CellValue>)>,
) -> Result<Table> {
    Table::from_columns(
        headers
            .into_iter()
            .zip(columns)
            .map(|(name, (dtype, values))| (name, Column::new(dtype, values))),
    )
}

/// Make header names usable as unique column names.
///
/// Blank names become `Unnamed: <position>`. Repeats get `.1`, `.2`, ... in
/// order of appearance, skipping any suffix that is already taken.
pub(crate) fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(raw.len());

    for (position, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", position)
        } else {
            name
        };

        let mut candidate = base.clone();
        while used.contains(&candidate) {
            let counter = counters.entry(base.clone()).or_insert(0);
            *counter += 1;
            candidate = format!("{}.{}", base, counter);
        }

        used.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}
