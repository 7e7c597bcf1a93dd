//! Signed-URL handlers: `/preview` and `/download_link`.
//!
//! Both run the same signing call against the writer-tier client; only the
//! response field name differs.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    Json,
};
use filegate_core::models::{DownloadLinkResponse, PreviewResponse};
use filegate_core::{constants, AppError};
use filegate_storage::ObjectStore;

use crate::error::HttpAppError;
use crate::handlers::PathQuery;
use crate::state::AppState;

/// Return a signed preview URL for a stored object.
#[tracing::instrument(skip(state), fields(operation = "preview", path = %query.path))]
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PreviewResponse>, HttpAppError> {
    let preview_url = signed_url_for(&state, &query.path).await?;
    Ok(Json(PreviewResponse { preview_url }))
}

/// Return a signed download URL for a stored object.
#[tracing::instrument(skip(state), fields(operation = "download_link", path = %query.path))]
pub async fn download_link(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<DownloadLinkResponse>, HttpAppError> {
    let download_url = signed_url_for(&state, &query.path).await?;
    Ok(Json(DownloadLinkResponse { download_url }))
}

async fn signed_url_for(state: &AppState, path: &str) -> Result<String, HttpAppError> {
    state
        .stores
        .writer
        .create_signed_url(path, Duration::from_secs(constants::SIGNED_URL_TTL_SECS))
        .await
        .map_err(|e| AppError::Storage(e.to_string()).into())
}

/// Signing with the soft-failure contract used by upload: a failed signing
/// call degrades to `None` instead of aborting the parent operation.
pub(crate) async fn sign_or_none(store: &Arc<dyn ObjectStore>, key: &str) -> Option<String> {
    match store
        .create_signed_url(key, Duration::from_secs(constants::SIGNED_URL_TTL_SECS))
        .await
    {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(
                error = %e,
                key = %key,
                "Signed URL generation failed; continuing without preview URL"
            );
            None
        }
    }
}
