//! Multipart upload form shared by the file handlers.

use axum::extract::Multipart;
use datasweep::{RunPlan, UploadedFile};

use crate::server::error::ApiError;

/// Files and plan posted by the client.
///
/// Every `file` part becomes one upload, in the order sent. An optional
/// `plan` part holds the run plan as JSON.
pub struct UploadForm {
    pub files: Vec<UploadedFile>,
    pub plan: RunPlan,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut files = Vec::new();
        let mut plan = RunPlan::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let file_name = field
                        .file_name()
                        .map(str::to_string)
                        .ok_or_else(|| ApiError::BadRequest("file part has no file name".into()))?;
                    let bytes = field.bytes().await?;
                    files.push(UploadedFile::new(file_name, bytes.to_vec()));
                }
                "plan" => {
                    let text = field.text().await?;
                    plan = serde_json::from_str(&text)
                        .map_err(|e| ApiError::BadRequest(format!("Invalid plan: {}", e)))?;
                }
                _ => {}
            }
        }

        if files.is_empty() {
            return Err(ApiError::BadRequest("No file uploaded".into()));
        }

        Ok(Self { files, plan })
    }
}
