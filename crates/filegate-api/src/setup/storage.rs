//! Storage setup and initialization

use anyhow::Result;
use filegate_core::Config;
use filegate_storage::{create_stores, GatewayStores};

/// Build the two-tier storage client handles from configuration.
pub fn setup_storage(config: &Config) -> Result<GatewayStores> {
    tracing::info!("Initializing storage clients...");
    let stores = create_stores(config)?;
    tracing::info!(tier = stores.tier(), "Storage clients initialized successfully");
    Ok(stores)
}
