//! Download handler: proxy object bytes through the gateway.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
};
use futures::StreamExt;
use filegate_core::AppError;
use filegate_storage::ObjectBody;

use crate::error::HttpAppError;
use crate::handlers::PathQuery;
use crate::state::AppState;
use crate::utils::upload::{basename, guess_media_type};

/// Fetch the object at `path` and serve it as an attachment.
///
/// Always uses the standard-tier client. A stream-shaped body is forwarded
/// without buffering; a buffered body is wrapped directly. Every failure —
/// missing object, network error, permission — surfaces uniformly as a 500
/// with the raw error text, unlike upload's classified branches.
#[tracing::instrument(skip(state), fields(operation = "download", path = %query.path))]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Response, HttpAppError> {
    let object = state
        .stores
        .reader
        .download(&query.path)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let media_type = guess_media_type(&query.path);
    let filename = basename(&query.path);

    let body = match object {
        ObjectBody::Buffered(bytes) => Body::from(bytes),
        ObjectBody::Stream(stream) => {
            let io_stream = stream.map(|result| {
                result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
            });
            Body::from_stream(io_stream)
        }
    };

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, media_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(body)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(response)
}
