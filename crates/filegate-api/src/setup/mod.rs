//! Application setup and initialization
//!
//! All application initialization logic lives here rather than in main.rs,
//! so tests can assemble the same router over a different store.

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use filegate_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Telemetry first so setup itself is traced
    crate::telemetry::init_telemetry();

    // Validate configuration - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;
    tracing::info!("Configuration loaded and validated successfully");

    // Setup storage client handles
    let stores = storage::setup_storage(&config)?;

    let state = Arc::new(AppState {
        stores,
        config: config.clone(),
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
