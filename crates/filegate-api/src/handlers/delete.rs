//! Delete handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use filegate_core::models::DeleteResponse;
use filegate_core::AppError;

use crate::error::HttpAppError;
use crate::handlers::PathQuery;
use crate::state::AppState;

/// Remove the object at `path` with the standard-tier client. The service's
/// raw acknowledgement payload is passed through under `result`; a missing
/// object surfaces as a 500, not a silent success.
#[tracing::instrument(skip(state), fields(operation = "delete", path = %query.path))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<DeleteResponse>, HttpAppError> {
    let result = state
        .stores
        .reader
        .remove(&query.path)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    tracing::info!(path = %query.path, "Object deleted");

    Ok(Json(DeleteResponse {
        status: "ok".to_string(),
        result,
    }))
}
