//! Convert command - clean files and export them as CSV or XLSX.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use colored::Colorize;
use datasweep::{CleaningOp, Intent, Pipeline, RunOutcome, RunPlan, SweepConfig, UploadedFile};

use super::report_failure;
use crate::cli::ExportFormat;

/// Flags of the convert command.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub to: ExportFormat,
    pub drop_duplicates: bool,
    pub fill_missing: bool,
    pub standardize_names: bool,
    pub columns: Option<Vec<String>>,
    pub visualize: bool,
    pub output_dir: Option<PathBuf>,
}

impl ConvertOptions {
    /// Intents captured from the flags, folded into a plan.
    pub fn plan(&self) -> RunPlan {
        let mut intents = Vec::new();
        if self.drop_duplicates {
            intents.push(Intent::Clean(CleaningOp::DropDuplicateRows));
        }
        if self.fill_missing {
            intents.push(Intent::Clean(CleaningOp::FillMissingNumericWithColumnMean));
        }
        if self.standardize_names {
            intents.push(Intent::Clean(CleaningOp::StandardizeColumnNames));
        }
        if let Some(ref columns) = self.columns {
            // `--columns ""` selects nothing
            let columns = columns.iter().filter(|c| !c.is_empty()).cloned().collect();
            intents.push(Intent::SelectColumns(columns));
        }
        if self.visualize {
            intents.push(Intent::Visualize);
        }
        intents.push(Intent::Export(self.to.into()));
        intents.into_iter().collect()
    }
}

pub fn run(
    files: Vec<PathBuf>,
    options: ConvertOptions,
    config: SweepConfig,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&output_dir)?;

    let plan = options.plan();
    let pipeline = Pipeline::with_config(config);

    let mut failures = 0;
    let mut written = HashSet::new();
    let mut sources = Vec::with_capacity(files.len());
    let mut uploads = Vec::with_capacity(files.len());
    for path in &files {
        match UploadedFile::from_path(path) {
            Ok(upload) => {
                sources.push(path.as_path());
                uploads.push(upload);
            }
            Err(e) => {
                report_failure(&path.display().to_string(), &e);
                failures += 1;
            }
        }
    }

    println!(
        "{} {} file(s) to {}",
        "Converting".cyan().bold(),
        uploads.len().to_string().white().bold(),
        options.to
    );

    for (source, outcome) in sources.into_iter().zip(pipeline.run_batch(&uploads, &plan)) {
        let saved = outcome
            .result
            .map_err(Box::<dyn std::error::Error>::from)
            .and_then(|run| save_export(&run, source, &output_dir, &mut written).map(|dest| (run, dest)));

        match saved {
            Ok((run, dest)) => print_outcome(&outcome.file, &run, &dest, verbose),
            Err(e) => {
                report_failure(&outcome.file, &e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} file(s) failed", failures, files.len()).into());
    }

    Ok(())
}

/// Write the export next to the others in `output_dir`.
///
/// `written` holds the destinations already used in this run; a second file
/// mapping to one of them fails instead of replacing it.
fn save_export(
    run: &RunOutcome,
    source: &Path,
    output_dir: &Path,
    written: &mut HashSet<PathBuf>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let export = run.export.as_ref().ok_or("no export was produced")?;
    let dest = output_dir.join(&export.file_name);

    if written.contains(&dest) {
        return Err(format!(
            "{} was already written by another input in this run",
            dest.display()
        )
        .into());
    }

    if is_same_file(&dest, source) {
        return Err(format!(
            "refusing to overwrite input file {}; pass --output-dir",
            source.display()
        )
        .into());
    }

    std::fs::write(&dest, &export.bytes)?;
    written.insert(dest.clone());
    Ok(dest)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn print_outcome(file: &str, run: &RunOutcome, dest: &Path, verbose: bool) {
    println!();
    println!("{}", file.white().bold());

    for change in &run.cleaning.changes {
        println!("  {}: {}", change.operation.label().cyan(), change.description);
        if verbose {
            for rename in &change.renames {
                println!("    {} -> {}", rename.from, rename.to);
            }
        }
    }

    if let Some(ref chart) = run.chart {
        if chart.is_empty() {
            println!("  {}", "No numeric columns to chart".yellow());
        } else {
            println!(
                "  Chart: {} ({} points)",
                chart.columns.join(", "),
                chart.rows.len()
            );
        }
    }

    println!(
        "{} {} ({} rows x {} columns)",
        "Saved to".green().bold(),
        dest.display().to_string().white(),
        run.table.row_count(),
        run.table.column_count()
    );
}
