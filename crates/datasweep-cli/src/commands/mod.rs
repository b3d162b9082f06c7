//! CLI command implementations.

pub mod convert;
pub mod inspect;
pub mod serve;

use std::fmt::Display;

use colored::Colorize;

/// Report a file that could not be processed. Other files carry on.
fn report_failure(file: &str, err: &dyn Display) {
    eprintln!("{} {}: {}", "Failed".red().bold(), file, err);
}
