//! Test helpers: build the gateway router over an in-memory store.
//!
//! Run from the workspace root: `cargo test -p filegate-api`.

pub mod storage;

use std::sync::Arc;

use axum_test::TestServer;
use filegate_api::setup::routes;
use filegate_api::state::AppState;
use filegate_core::Config;
use filegate_storage::GatewayStores;

use self::storage::{MemoryStore, StoreBehavior};

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        request_timeout_secs: 5,
        storage_url: "http://localhost:54321/storage/v1".to_string(),
        storage_api_key: "anon-key".to_string(),
        storage_service_key: None,
        public_base_url: Some("http://gateway.test".to_string()),
        max_file_size_bytes: 1024 * 1024,
    }
}

/// Build a test server whose reader and writer share one in-memory store
/// with the given failure behavior.
pub fn setup_test_server_with(behavior: StoreBehavior, config: Config) -> TestServer {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::with_behavior(behavior));
    let stores = GatewayStores::new(store.clone(), store, false);
    let state = Arc::new(AppState {
        stores,
        config: config.clone(),
    });

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}

pub fn setup_test_server() -> TestServer {
    setup_test_server_with(StoreBehavior::default(), test_config())
}

/// Raw multipart body with a single `file` field. `content_type: None` omits
/// the part's Content-Type header so the gateway has to guess.
pub fn multipart_body(
    filename: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> (String, Vec<u8>) {
    let boundary = "filegate-test-boundary";
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    if let Some(ct) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", ct).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    (
        format!("multipart/form-data; boundary={}", boundary),
        body,
    )
}

/// Multipart body whose single field is not named `file`.
pub fn multipart_body_wrong_field(data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "filegate-test-boundary";
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"attachment\"; filename=\"x.txt\"\r\n\r\n",
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    (
        format!("multipart/form-data; boundary={}", boundary),
        body,
    )
}
