//! Application state.
//!
//! The state is an explicitly constructed, immutable object handed to every
//! handler — the storage client handles and configuration are built once at
//! startup and never mutated.

use filegate_core::Config;
use filegate_storage::GatewayStores;

/// Main application state: the two-tier storage handles plus configuration.
#[derive(Clone)]
pub struct AppState {
    pub stores: GatewayStores,
    pub config: Config,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
