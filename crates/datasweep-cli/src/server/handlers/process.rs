//! Processing and download handlers.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use datasweep::{
    CleaningReport, ColumnSummary, ExportResult, FileFormat, FileOutcome, NumericSlice,
    RunOutcome, SourceMetadata, UploadedFile,
};
use serde::Serialize;

use super::blocking;
use super::form::UploadForm;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// An export embedded in a JSON response.
#[derive(Serialize)]
pub struct EncodedExport {
    pub file_name: String,
    pub media_type: &'static str,
    pub format: FileFormat,
    /// File contents, base64 encoded.
    pub data: String,
}

impl From<&ExportResult> for EncodedExport {
    fn from(export: &ExportResult) -> Self {
        Self {
            file_name: export.file_name.clone(),
            media_type: export.media_type,
            format: export.format,
            data: STANDARD.encode(&export.bytes),
        }
    }
}

/// Summary of one processed file.
#[derive(Serialize)]
pub struct ProcessedFile {
    pub metadata: SourceMetadata,
    pub cleaning: CleaningReport,
    /// Schema of the final table.
    pub columns: Vec<ColumnSummary>,
    pub row_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<NumericSlice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<EncodedExport>,
}

impl From<&RunOutcome> for ProcessedFile {
    fn from(run: &RunOutcome) -> Self {
        Self {
            metadata: run.metadata.clone(),
            cleaning: run.cleaning.clone(),
            columns: run.table.summary(),
            row_count: run.table.row_count(),
            chart: run.chart.clone(),
            export: run.export.as_ref().map(EncodedExport::from),
        }
    }
}

/// Result for one file: its summary or its error message.
#[derive(Serialize)]
pub struct ProcessResult {
    pub file: String,
    #[serde(flatten)]
    pub outcome: Option<ProcessedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<FileOutcome> for ProcessResult {
    fn from(outcome: FileOutcome) -> Self {
        match outcome.result {
            Ok(ref run) => ProcessResult {
                file: outcome.file,
                outcome: Some(ProcessedFile::from(run)),
                error: None,
            },
            Err(ref e) => ProcessResult {
                error: Some(e.to_string()),
                file: outcome.file,
                outcome: None,
            },
        }
    }
}

/// Response for the process endpoint.
#[derive(Serialize)]
pub struct ProcessResponse {
    pub files: Vec<ProcessResult>,
}

/// POST /api/process
///
/// Runs the plan over every uploaded file. A failing file is reported in
/// its own entry and never affects the others.
pub async fn process(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    let UploadForm { files, plan } = UploadForm::read(multipart).await?;
    let pipeline = state.pipeline.clone();

    let files = blocking(move || {
        pipeline
            .run_batch(&files, &plan)
            .into_iter()
            .map(ProcessResult::from)
            .collect::<Vec<_>>()
    })
    .await?;

    Ok(Json(ProcessResponse { files }))
}

/// POST /api/export
///
/// Runs the plan over a single file and returns the encoded table as a
/// download.
pub async fn export(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let UploadForm { files, plan } = UploadForm::read(multipart).await?;

    if plan.export.is_none() {
        return Err(ApiError::BadRequest("Plan has no export format".into()));
    }
    let [file]: [UploadedFile; 1] = files
        .try_into()
        .map_err(|_| ApiError::BadRequest("Export takes exactly one file".into()))?;

    let pipeline = state.pipeline.clone();
    let run = blocking(move || pipeline.run(&file, &plan)).await??;
    let Some(export) = run.export else {
        return Err(ApiError::BadRequest("Plan has no export format".into()));
    };

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export.file_name.replace('"', "'")
    );
    Ok((
        [
            (header::CONTENT_TYPE, export.media_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    )
        .into_response())
}
