//! HTTP client for the Filegate gateway.
//!
//! Provides a minimal client with generic request helpers and domain methods
//! for the five gateway operations. The CLI uses this client directly.
//! Response types come from `filegate_core::models` so the wire contract
//! lives in one place.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

// Response types are re-exported so CLI code can name them without a direct
// filegate-core dependency.
pub use filegate_core::models::{
    DeleteResponse, DownloadLinkResponse, PreviewResponse, UploadResponse,
};

/// HTTP client for the Filegate gateway.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: FILEGATE_URL (or API_URL).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("FILEGATE_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:4000".to_string());

        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn into_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Gateway request failed with status {}: {}",
                status,
                error_text
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse response as JSON")
    }

    /// Upload a local file. `key` overrides the remote object key and
    /// defaults to the file's basename.
    pub async fn upload(&self, file_path: &str, key: Option<&str>) -> Result<UploadResponse> {
        let path = std::path::Path::new(file_path);
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", file_path))?;

        let remote = match key {
            Some(k) => k.to_string(),
            None => path
                .file_name()
                .and_then(|n| n.to_str())
                .map(String::from)
                .context("Cannot derive a remote key from the file path; pass --key")?,
        };

        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(data).file_name(remote),
        );

        let response = self
            .client
            .post(self.build_url("/upload"))
            .multipart(form)
            .send()
            .await
            .context("Failed to send request")?;

        Self::into_json(response).await
    }

    /// Download object bytes.
    pub async fn download(&self, path: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.build_url("/download"))
            .query(&[("path", path)])
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Gateway request failed with status {}: {}",
                status,
                error_text
            ));
        }

        Ok(response
            .bytes()
            .await
            .context("Failed to read response body")?
            .to_vec())
    }

    /// Get a signed preview URL.
    pub async fn preview(&self, path: &str) -> Result<PreviewResponse> {
        let response = self
            .client
            .get(self.build_url("/preview"))
            .query(&[("path", path)])
            .send()
            .await
            .context("Failed to send request")?;

        Self::into_json(response).await
    }

    /// Get a signed download URL.
    pub async fn download_link(&self, path: &str) -> Result<DownloadLinkResponse> {
        let response = self
            .client
            .get(self.build_url("/download_link"))
            .query(&[("path", path)])
            .send()
            .await
            .context("Failed to send request")?;

        Self::into_json(response).await
    }

    /// Delete an object.
    pub async fn delete(&self, path: &str) -> Result<DeleteResponse> {
        let response = self
            .client
            .delete(self.build_url("/delete"))
            .query(&[("path", path)])
            .send()
            .await
            .context("Failed to send request")?;

        Self::into_json(response).await
    }
}
