//! Credential-tier selection.
//!
//! The gateway holds two tiers: the standard key (always configured) and an
//! optional elevated service key. The choice is made once at process start.
//! The writer handle carries every mutating and signing call; the reader
//! handle carries plain byte downloads and deletes regardless of which tier
//! is configured.

use std::sync::Arc;

use filegate_core::{constants, Config};

use crate::hosted::HostedBucket;
use crate::traits::{ObjectStore, StorageResult};

/// Immutable, process-lifetime store handles for the two credential tiers.
/// Safe for unrestricted concurrent use.
#[derive(Clone)]
pub struct GatewayStores {
    pub reader: Arc<dyn ObjectStore>,
    pub writer: Arc<dyn ObjectStore>,
    pub elevated: bool,
}

impl GatewayStores {
    pub fn new(reader: Arc<dyn ObjectStore>, writer: Arc<dyn ObjectStore>, elevated: bool) -> Self {
        GatewayStores {
            reader,
            writer,
            elevated,
        }
    }

    /// Tier label for logs and health reporting.
    pub fn tier(&self) -> &'static str {
        if self.elevated {
            "elevated"
        } else {
            "standard"
        }
    }
}

/// Build the store pair from configuration.
///
/// When `STORAGE_SERVICE_KEY` is present the writer gets its own elevated
/// client; otherwise both handles share the standard client.
pub fn create_stores(config: &Config) -> StorageResult<GatewayStores> {
    let reader: Arc<dyn ObjectStore> = Arc::new(HostedBucket::new(
        &config.storage_url,
        constants::BUCKET,
        &config.storage_api_key,
    )?);

    let (writer, elevated) = match config.storage_service_key.as_deref() {
        Some(service_key) => {
            let writer: Arc<dyn ObjectStore> = Arc::new(HostedBucket::new(
                &config.storage_url,
                constants::BUCKET,
                service_key,
            )?);
            (writer, true)
        }
        None => (reader.clone(), false),
    };

    let stores = GatewayStores::new(reader, writer, elevated);
    tracing::info!(
        tier = stores.tier(),
        bucket = constants::BUCKET,
        "Storage clients initialized"
    );

    Ok(stores)
}
