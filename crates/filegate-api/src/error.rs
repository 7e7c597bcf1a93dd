//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; errors become the gateway's
//! wire contract here: `{detail}` for hard failures, a structured
//! `{error, message, action}` body for the upload policy rejection.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use filegate_core::{AppError, LogLevel};
use serde::Serialize;

/// Hard-failure body. `detail` carries the external service's error text
/// verbatim — this is the contract, not an oversight.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Policy-rejection body for the upload 403: the cause plus the remediation.
#[derive(Debug, Serialize)]
pub struct PolicyErrorResponse {
    pub error: String,
    pub message: String,
    pub action: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from
/// filegate-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.0);

        match self.0 {
            AppError::PolicyDenied { message, action } => (
                status,
                Json(PolicyErrorResponse {
                    error: "upload_failed".to_string(),
                    message,
                    action,
                }),
            )
                .into_response(),
            other => (
                status,
                Json(ErrorResponse {
                    detail: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_renders_as_500_detail() {
        let response =
            HttpAppError(AppError::Storage("Upload failed: boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn policy_denial_renders_as_403() {
        let response = HttpAppError(AppError::PolicyDenied {
            message: "blocked".to_string(),
            action: "set the service key".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn invalid_input_renders_as_400() {
        let response =
            HttpAppError(AppError::InvalidInput("No file provided".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn policy_body_shape() {
        let body = PolicyErrorResponse {
            error: "upload_failed".to_string(),
            message: "Upload blocked by the storage bucket's access policy (403).".to_string(),
            action: "Provide STORAGE_SERVICE_KEY to the gateway.".to_string(),
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json.get("error").and_then(|v| v.as_str()), Some("upload_failed"));
        assert!(json.get("message").is_some());
        assert!(json.get("action").is_some());
    }

    #[test]
    fn detail_body_shape() {
        let body = ErrorResponse {
            detail: "Object not found: x.txt".to_string(),
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(
            json.get("detail").and_then(|v| v.as_str()),
            Some("Object not found: x.txt")
        );
    }
}
