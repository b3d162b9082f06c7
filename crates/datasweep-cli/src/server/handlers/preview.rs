//! Data preview handler.

use axum::{
    extract::{Multipart, State},
    Json,
};
use datasweep::{Preview, SourceMetadata};
use serde::Serialize;

use super::blocking;
use super::form::UploadForm;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Preview of one uploaded file, or why it could not be read.
#[derive(Serialize)]
pub struct FilePreview {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SourceMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Preview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for the preview endpoint.
#[derive(Serialize)]
pub struct PreviewResponse {
    pub files: Vec<FilePreview>,
}

/// POST /api/preview
pub async fn preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PreviewResponse>, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let pipeline = state.pipeline.clone();

    let files = blocking(move || {
        form.files
            .iter()
            .map(|upload| match pipeline.load(upload) {
                Ok(loaded) => FilePreview {
                    file: upload.name().to_string(),
                    preview: Some(pipeline.preview(&loaded.table)),
                    metadata: Some(loaded.metadata),
                    error: None,
                },
                Err(e) => FilePreview {
                    file: upload.name().to_string(),
                    metadata: None,
                    preview: None,
                    error: Some(e.to_string()),
                },
            })
            .collect::<Vec<_>>()
    })
    .await?;

    Ok(Json(PreviewResponse { files }))
}
