//! Storage abstraction trait
//!
//! This module defines the `ObjectStore` trait the gateway consumes, the
//! tagged error kinds handlers branch on, and the single function that
//! classifies write failures reported by the external service.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors.
///
/// Write rejections from the external service are classified into
/// `PermissionDenied` / `AlreadyExists` by [`classify_write_failure`];
/// handlers branch on the kind and never inspect message text themselves.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Signing failed: {0}")]
    SignFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Downloaded object body: an in-memory buffer or a byte stream.
///
/// The hosted client hands back a stream, which the download handler forwards
/// without buffering; in-memory doubles return `Buffered`.
pub enum ObjectBody {
    Buffered(Bytes),
    Stream(Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>),
}

impl std::fmt::Debug for ObjectBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectBody::Buffered(bytes) => f.debug_tuple("Buffered").field(bytes).finish(),
            ObjectBody::Stream(_) => f.debug_tuple("Stream").finish(),
        }
    }
}

/// Storage abstraction trait
///
/// One implementation is bound to one credential; the gateway holds two
/// handles (see [`GatewayStores`](crate::tiers::GatewayStores)). Keys are the
/// caller-supplied object paths, used verbatim.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `data` under `key`, attaching `content_type` as object metadata.
    /// The metadata is required so browsers render previews (e.g. PDFs)
    /// instead of forcing a download.
    async fn upload(&self, key: &str, content_type: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Fetch the object at `key`.
    async fn download(&self, key: &str) -> StorageResult<ObjectBody>;

    /// Request a time-limited signed URL for `key` from the service.
    async fn create_signed_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Remove the object at `key`, returning the service's raw
    /// acknowledgement payload.
    async fn remove(&self, key: &str) -> StorageResult<serde_json::Value>;
}

const PERMISSION_MARKERS: [&str; 3] = ["row-level security", "Unauthorized", "403"];
const DUPLICATE_MARKERS: [&str; 3] = ["Duplicate", "already exists", "409"];

/// Classify a write failure reported by the external service.
///
/// The HTTP status is authoritative when it is one of the two interesting
/// codes. The substring fallback exists because the service reports some
/// policy failures under a generic status, and its wording is not a stable
/// contract — matching is case-sensitive and pinned down by the tests below
/// so a wording change surfaces as a test failure, not a silent
/// misclassification.
pub fn classify_write_failure(status: Option<u16>, body: &str) -> StorageError {
    match status {
        Some(401) | Some(403) => return StorageError::PermissionDenied(body.to_string()),
        Some(409) => return StorageError::AlreadyExists(body.to_string()),
        _ => {}
    }

    if PERMISSION_MARKERS.iter().any(|m| body.contains(m)) {
        StorageError::PermissionDenied(body.to_string())
    } else if DUPLICATE_MARKERS.iter().any(|m| body.contains(m)) {
        StorageError::AlreadyExists(body.to_string())
    } else {
        StorageError::UploadFailed(body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_403_wins_over_body() {
        let err = classify_write_failure(Some(403), "anything at all");
        assert!(matches!(err, StorageError::PermissionDenied(_)));
    }

    #[test]
    fn status_401_is_permission() {
        let err = classify_write_failure(Some(401), "");
        assert!(matches!(err, StorageError::PermissionDenied(_)));
    }

    #[test]
    fn status_409_is_duplicate() {
        let err = classify_write_failure(Some(409), "The resource already exists");
        assert!(matches!(err, StorageError::AlreadyExists(_)));
    }

    #[test]
    fn row_level_security_body_is_permission() {
        let err = classify_write_failure(
            Some(400),
            "new row violates row-level security policy for table \"objects\"",
        );
        assert!(matches!(err, StorageError::PermissionDenied(_)));
    }

    #[test]
    fn unauthorized_body_is_permission() {
        let err = classify_write_failure(None, "Unauthorized");
        assert!(matches!(err, StorageError::PermissionDenied(_)));
    }

    #[test]
    fn duplicate_body_is_duplicate() {
        let err = classify_write_failure(Some(400), "Duplicate");
        assert!(matches!(err, StorageError::AlreadyExists(_)));

        let err = classify_write_failure(None, "the key already exists in the bucket");
        assert!(matches!(err, StorageError::AlreadyExists(_)));
    }

    #[test]
    fn permission_markers_take_priority_over_duplicate_markers() {
        // Both marker families present: permission is checked first.
        let err = classify_write_failure(None, "Unauthorized: Duplicate");
        assert!(matches!(err, StorageError::PermissionDenied(_)));
    }

    #[test]
    fn matching_is_case_sensitive() {
        // "duplicate" (lowercase) is not a marker; falls through to the
        // generic kind.
        let err = classify_write_failure(Some(400), "duplicate entry");
        assert!(matches!(err, StorageError::UploadFailed(_)));
    }

    #[test]
    fn unrecognized_failure_keeps_raw_text() {
        let err = classify_write_failure(Some(500), "backend exploded");
        match err {
            StorageError::UploadFailed(msg) => assert_eq!(msg, "backend exploded"),
            other => panic!("Expected UploadFailed, got {:?}", other),
        }
    }
}
