//! HTTP handlers for the gateway's five operations plus health probes.

pub mod delete;
pub mod download;
pub mod health;
pub mod links;
pub mod upload;

use serde::Deserialize;

/// Query parameter shared by the path-addressed operations.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    /// Object key, used verbatim against the storage service.
    pub path: String,
}
