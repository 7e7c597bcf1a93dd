//! HTTP client for the hosted object-storage service.
//!
//! One instance is bound to one credential; tier selection happens in
//! [tiers](crate::tiers). Wire layout: object bytes live under
//! `{base}/object/{bucket}/{key}`, signing under
//! `{base}/object/sign/{bucket}/{key}`, and removal is a DELETE on the bucket
//! with the keys in the request body.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;

use crate::signed_url::extract_signed_url;
use crate::traits::{classify_write_failure, ObjectBody, ObjectStore, StorageError, StorageResult};

const HTTP_TIMEOUT_SECS: u64 = 60;

/// Client for one credential tier of the external storage service.
#[derive(Clone)]
pub struct HostedBucket {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
    api_key: String,
}

impl HostedBucket {
    /// Create a client for `bucket` on the service at `base_url`, bound to
    /// `api_key`. The key decides the credential tier; the client itself is
    /// tier-agnostic.
    pub fn new(base_url: &str, bucket: &str, api_key: &str) -> StorageResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                StorageError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(HostedBucket {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/object/{}/{}", self.base_url, self.bucket, encode_key(key))
    }

    fn sign_request_url(&self, key: &str) -> String {
        format!(
            "{}/object/sign/{}/{}",
            self.base_url,
            self.bucket,
            encode_key(key)
        )
    }

    /// Resolve a possibly-relative URL from a signing response against the
    /// service base.
    fn absolutize(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }
}

/// Percent-encode a key for use in a URL path, keeping `/` separators intact.
/// Keys are stored verbatim; encoding is transport-only.
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl ObjectStore for HostedBucket {
    async fn upload(&self, key: &str, content_type: &str, data: Vec<u8>) -> StorageResult<()> {
        let size = data.len();
        let start = std::time::Instant::now();

        let response = self
            .http
            .post(self.object_url(key))
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                key = %key,
                status = status.as_u16(),
                body = %body,
                "Object upload rejected by storage service"
            );
            return Err(classify_write_failure(Some(status.as_u16()), &body));
        }

        tracing::info!(
            key = %key,
            size_bytes = size,
            content_type = %content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object upload successful"
        );

        Ok(())
    }

    async fn download(&self, key: &str) -> StorageResult<ObjectBody> {
        let response = self
            .http
            .get(self.object_url(key))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(StorageError::NotFound(key.to_string()));
            }
            return Err(StorageError::DownloadFailed(format!(
                "{}: {}",
                status.as_u16(),
                body
            )));
        }

        tracing::debug!(key = %key, "Streaming object from storage service");

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| StorageError::DownloadFailed(e.to_string())));

        Ok(ObjectBody::Stream(Box::pin(stream)))
    }

    async fn create_signed_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let response = self
            .http
            .post(self.sign_request_url(key))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "expiresIn": expires_in.as_secs() }))
            .send()
            .await
            .map_err(|e| StorageError::SignFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::SignFailed(format!(
                "{}: {}",
                status.as_u16(),
                body
            )));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StorageError::SignFailed(e.to_string()))?;

        let url = extract_signed_url(&value).ok_or_else(|| {
            StorageError::SignFailed("Signing response carried no URL".to_string())
        })?;

        tracing::debug!(key = %key, expires_secs = expires_in.as_secs(), "Signed URL issued");

        Ok(self.absolutize(&url))
    }

    async fn remove(&self, key: &str) -> StorageResult<serde_json::Value> {
        let start = std::time::Instant::now();

        let response = self
            .http
            .delete(format!("{}/object/{}", self.base_url, self.bucket))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "prefixes": [key] }))
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(StorageError::NotFound(key.to_string()));
            }
            return Err(StorageError::DeleteFailed(format!(
                "{}: {}",
                status.as_u16(),
                body
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StorageError::DeleteFailed(e.to_string()))?;

        tracing::info!(
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object removal acknowledged"
        );

        Ok(payload)
    }
}
