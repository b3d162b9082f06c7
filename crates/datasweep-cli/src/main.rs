//! Data Sweep CLI - clean and convert CSV and spreadsheet files.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, &cli.log_level);
    let config = cli.sweep_config();

    let result = match cli.command {
        Commands::Inspect { files, json } => commands::inspect::run(files, json, config),

        Commands::Convert {
            files,
            to,
            drop_duplicates,
            fill_missing,
            standardize_names,
            columns,
            visualize,
            output_dir,
        } => {
            let options = commands::convert::ConvertOptions {
                to,
                drop_duplicates,
                fill_missing,
                standardize_names,
                columns,
                visualize,
                output_dir,
            };
            commands::convert::run(files, options, config, cli.verbose)
        }

        Commands::Serve {
            port,
            max_upload_mb,
        } => commands::serve::run(port, max_upload_mb, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the global tracing subscriber. `RUST_LOG` takes precedence.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
