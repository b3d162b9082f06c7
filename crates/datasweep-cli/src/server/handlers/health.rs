//! Health check handler.

use axum::Json;
use datasweep::ACCEPTED_EXTENSIONS;
use serde::Serialize;

/// Response for the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Extensions the upload widget should offer.
    pub accepted_extensions: Vec<&'static str>,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        accepted_extensions: ACCEPTED_EXTENSIONS.to_vec(),
    })
}
