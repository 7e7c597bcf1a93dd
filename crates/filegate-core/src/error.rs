//! Error types module
//!
//! Unified error type for the gateway. Each variant knows its HTTP status,
//! type name, and log level; the api crate converts it into the wire
//! response.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for actionable client-side or policy issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Write rejected by the storage service's access policy. Rendered as a
    /// structured 403 with a remediation hint instead of the plain `{detail}`
    /// body.
    #[error("{message}")]
    PolicyDenied { message: String, action: String },

    /// Failure reported by the storage service. The text is forwarded to the
    /// caller verbatim in `{detail}`.
    #[error("{0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::PolicyDenied { .. } => 403,
            AppError::Storage(_) => 500,
            AppError::InvalidInput(_) => 400,
            AppError::PayloadTooLarge(_) => 413,
            AppError::Internal(_) => 500,
        }
    }

    /// Get the error type name for log fields
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::PolicyDenied { .. } => "PolicyDenied",
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Internal(_) => "Internal",
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::PolicyDenied { .. } => LogLevel::Warn,
            AppError::InvalidInput(_) | AppError::PayloadTooLarge(_) => LogLevel::Debug,
            AppError::Storage(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }
}
