//! Application state for the web server.

use std::sync::Arc;

use datasweep::{Pipeline, SweepConfig};

/// Shared application state.
///
/// The pipeline holds configuration only, so requests never observe each
/// other.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: SweepConfig) -> Self {
        Self {
            pipeline: Arc::new(Pipeline::with_config(config)),
        }
    }
}
