//! Serve command - run the HTTP API.

use colored::Colorize;
use datasweep::{SweepConfig, ACCEPTED_EXTENSIONS};

use crate::server::{
    app::{self, ServerConfig},
    state::AppState,
};

pub fn run(
    port: u16,
    max_upload_mb: usize,
    config: SweepConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config);
    let server = ServerConfig {
        port,
        max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
    };

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting Data Sweep server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Accepted files: {}", ACCEPTED_EXTENSIONS.join(", "));
    println!("  Upload limit: {} MB", max_upload_mb);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, server))
}
