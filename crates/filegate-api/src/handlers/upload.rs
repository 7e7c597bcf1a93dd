//! Upload handler: the one operation with branching error semantics.
//!
//! A policy rejection becomes a structured 403 with a remediation hint; a
//! duplicate key becomes a success-shaped `already_exists` response carrying
//! a signed URL for the existing object; everything else is a raw 500.
//! Signed-URL failures after a successful write never abort the response.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use filegate_core::models::UploadResponse;
use filegate_core::AppError;
use filegate_storage::StorageError;

use crate::error::HttpAppError;
use crate::handlers::links::sign_or_none;
use crate::state::AppState;
use crate::utils::upload::{
    extract_multipart_file, request_base_url, resolve_content_type, validate_file_size,
};

const POLICY_DENIED_MESSAGE: &str = "Upload blocked by the storage bucket's access policy (403).";
const POLICY_DENIED_ACTION: &str =
    "Provide STORAGE_SERVICE_KEY to the gateway or configure the bucket to allow public uploads.";

/// Upload a file. The multipart filename is the object key, verbatim.
#[tracing::instrument(skip(state, headers, multipart), fields(operation = "upload"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let (data, filename, declared_type) = extract_multipart_file(multipart).await?;
    validate_file_size(data.len(), state.config.max_file_size_bytes)?;

    let content_type = resolve_content_type(declared_type.as_deref(), &filename);
    let size = data.len();

    tracing::debug!(
        key = %filename,
        content_type = %content_type,
        size_bytes = size,
        "Forwarding upload to storage service"
    );

    if let Err(e) = state.stores.writer.upload(&filename, &content_type, data).await {
        return match e {
            StorageError::PermissionDenied(_) => Err(AppError::PolicyDenied {
                message: POLICY_DENIED_MESSAGE.to_string(),
                action: POLICY_DENIED_ACTION.to_string(),
            }
            .into()),
            StorageError::AlreadyExists(_) => {
                // Duplicate is not an error: hand back a signed URL for the
                // object that is already there.
                let preview_url = sign_or_none(&state.stores.writer, &filename).await;
                tracing::info!(key = %filename, "Object already exists; returning signed URL");
                Ok(Json(UploadResponse {
                    message: "already_exists".to_string(),
                    path: None,
                    preview_url,
                    download_url: None,
                }))
            }
            other => Err(AppError::Storage(other.to_string()).into()),
        };
    }

    let preview_url = sign_or_none(&state.stores.writer, &filename).await;
    let download_url = format!(
        "{}/download?path={}",
        request_base_url(&state.config, &headers),
        urlencoding::encode(&filename)
    );

    Ok(Json(UploadResponse {
        message: "uploaded".to_string(),
        path: Some(filename),
        preview_url,
        download_url: Some(download_url),
    }))
}
