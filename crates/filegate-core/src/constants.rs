//! Fixed gateway constants.

/// Storage container all gateway objects live in. Bucket lifecycle and access
/// policy belong to the external service; the gateway never creates or lists
/// buckets.
pub const BUCKET: &str = "files";

/// Lifetime of signed URLs requested from the external service, in seconds.
/// Expiry enforcement happens on the service side; the gateway does not track
/// it.
pub const SIGNED_URL_TTL_SECS: u64 = 3600;
