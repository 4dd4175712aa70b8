//! Single-file multipart upload.

use axum::extract::Multipart;

use crate::config::UPLOAD_FIELD_NAME;
use crate::errors::{AppError, AppResult};

/// File taken from the `file` field of a multipart body
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Read the first `file` part. Other parts are ignored.
pub async fn read_upload(mut multipart: Multipart) -> AppResult<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::bad_request("Uploaded file has no name"))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("Failed to read upload: {}", e)))?;

        return Ok(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::bad_request(format!(
        "Missing multipart field '{}'",
        UPLOAD_FIELD_NAME
    )))
}
