//! Wire models for the gateway's HTTP surface.
//!
//! Shared between the api handlers and the api client so the response
//! contract lives in one place.

use serde::{Deserialize, Serialize};

/// Body of a successful upload, or of the duplicate-tolerant
/// `already_exists` outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// `"uploaded"` or `"already_exists"`.
    pub message: String,
    /// Object key; absent on the `already_exists` outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Signed preview URL. Null when signing failed; the upload itself still
    /// succeeded.
    #[serde(default)]
    pub preview_url: Option<String>,
    /// Gateway download URL (`{base}/download?path={key}`); absent on the
    /// `already_exists` outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub preview_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadLinkResponse {
    pub download_url: String,
}

/// Body of a successful delete: fixed `"ok"` status plus the service's raw
/// acknowledgement payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: String,
    pub result: serde_json::Value,
}
