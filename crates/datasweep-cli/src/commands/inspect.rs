//! Inspect command - show metadata, schema and a preview of each file.

use std::path::PathBuf;

use colored::Colorize;
use datasweep::{Pipeline, Preview, SourceMetadata, SweepConfig, UploadedFile};
use serde::Serialize;

use super::report_failure;

/// What `inspect --json` prints for one file.
#[derive(Serialize)]
struct InspectReport {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<SourceMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<Preview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(
    files: Vec<PathBuf>,
    json: bool,
    config: SweepConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::with_config(config);
    let mut reports = Vec::with_capacity(files.len());

    for path in &files {
        let file = path.display().to_string();
        let report = match UploadedFile::from_path(path).and_then(|upload| pipeline.load(&upload)) {
            Ok(loaded) => InspectReport {
                file,
                preview: Some(pipeline.preview(&loaded.table)),
                metadata: Some(loaded.metadata),
                error: None,
            },
            Err(e) => InspectReport {
                file,
                metadata: None,
                preview: None,
                error: Some(e.to_string()),
            },
        };
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    let failures = reports.iter().filter(|r| r.error.is_some()).count();
    if failures > 0 {
        return Err(format!("{} of {} file(s) could not be read", failures, files.len()).into());
    }

    Ok(())
}

fn print_report(report: &InspectReport) {
    let (Some(metadata), Some(preview)) = (&report.metadata, &report.preview) else {
        if let Some(ref error) = report.error {
            report_failure(&report.file, error);
        }
        return;
    };

    println!(
        "{} {} ({:.1} KiB, {})",
        "Inspecting".cyan().bold(),
        report.file.white(),
        metadata.size_kib(),
        metadata.format
    );
    println!(
        "{} rows x {} columns",
        metadata.row_count.to_string().white().bold(),
        metadata.column_count.to_string().white().bold()
    );

    println!();
    println!("{}", "Schema:".yellow().bold());
    for column in &preview.columns {
        let missing = if column.missing > 0 {
            format!("{} missing", column.missing).yellow()
        } else {
            "complete".green()
        };
        println!("  {:20} {:10} {}", column.name, column.dtype.to_string(), missing);
    }

    println!();
    println!(
        "{} (first {} rows)",
        "Preview:".yellow().bold(),
        preview.rows.len()
    );
    let header: Vec<&str> = preview.columns.iter().map(|c| c.name.as_str()).collect();
    println!("  {}", header.join(" | ").bold());
    for row in &preview.rows {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("  {}", cells.join(" | "));
    }
    println!();
}
