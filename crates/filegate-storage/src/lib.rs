//! Filegate Storage Library
//!
//! Storage-collaborator abstraction for the gateway: the `ObjectStore` trait,
//! the hosted HTTP client for the external object-storage service, write
//! failure classification, signed-URL normalization, and credential-tier
//! selection.

pub mod hosted;
pub mod signed_url;
pub mod tiers;
pub mod traits;

// Re-export commonly used types
pub use hosted::HostedBucket;
pub use tiers::{create_stores, GatewayStores};
pub use traits::{classify_write_failure, ObjectBody, ObjectStore, StorageError, StorageResult};
