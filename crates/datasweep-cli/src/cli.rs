//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use datasweep::{FileFormat, ParserConfig, SweepConfig, DEFAULT_PREVIEW_ROWS};
use std::path::PathBuf;

/// Data Sweep: clean and convert CSV and spreadsheet files
#[derive(Parser)]
#[command(name = "datasweep")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// CSV field delimiter (a single character, or "tab")
    #[arg(long, global = true, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Number of rows shown in previews
    #[arg(long, global = true, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,
}

impl Cli {
    /// Pipeline configuration from the global flags.
    pub fn sweep_config(&self) -> SweepConfig {
        SweepConfig::default()
            .with_parser(ParserConfig {
                delimiter: self.delimiter,
                ..ParserConfig::default()
            })
            .with_preview_rows(self.preview_rows)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show metadata, inferred column types and a preview of each file
    Inspect {
        /// Paths to the data files (CSV/XLSX)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clean files and export them as CSV or XLSX
    ///
    /// Cleaning runs in a fixed order: duplicates, missing values, then
    /// column names. Column selection applies to the cleaned names.
    Convert {
        /// Paths to the data files (CSV/XLSX)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Export format
        #[arg(short, long, default_value = "csv")]
        to: ExportFormat,

        /// Remove rows that repeat an earlier row
        #[arg(long)]
        drop_duplicates: bool,

        /// Fill missing numeric values with the column mean
        #[arg(long)]
        fill_missing: bool,

        /// Lowercase column names and replace spaces with underscores
        #[arg(long)]
        standardize_names: bool,

        /// Keep only these columns, in this order (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Print the numeric columns that would be charted
        #[arg(long)]
        visualize: bool,

        /// Directory to write exports to (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Serve the HTTP API
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// Maximum upload size in megabytes
        #[arg(long, default_value = "200")]
        max_upload_mb: usize,
    },
}

/// Export format accepted on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            _ => Err(format!("Unknown format: {}. Use csv or xlsx.", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

impl From<ExportFormat> for FileFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Csv => FileFormat::Csv,
            ExportFormat::Xlsx => FileFormat::Spreadsheet,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    if s.eq_ignore_ascii_case("tab") || s == "\\t" {
        return Ok(b'\t');
    }
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("Delimiter must be a single ASCII character, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_flags() {
        let cli = Cli::parse_from([
            "datasweep",
            "convert",
            "a.csv",
            "b.xlsx",
            "--to",
            "xlsx",
            "--drop-duplicates",
            "--columns",
            "name,age",
            "--delimiter",
            ";",
        ]);

        assert_eq!(cli.delimiter, b';');
        match cli.command {
            Commands::Convert {
                files,
                to,
                drop_duplicates,
                fill_missing,
                columns,
                ..
            } => {
                assert_eq!(files.len(), 2);
                assert_eq!(to, ExportFormat::Xlsx);
                assert!(drop_duplicates);
                assert!(!fill_missing);
                assert_eq!(columns, Some(vec!["name".to_string(), "age".to_string()]));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_unknown_export_format_rejected() {
        let result = Cli::try_parse_from(["datasweep", "convert", "a.csv", "--to", "parquet"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("|"), Ok(b'|'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_sweep_config_from_flags() {
        let cli = Cli::parse_from(["datasweep", "inspect", "a.csv", "--preview-rows", "2"]);
        let config = cli.sweep_config();
        assert_eq!(config.preview_rows, 2);
        assert_eq!(config.parser.delimiter, b',');
    }
}
