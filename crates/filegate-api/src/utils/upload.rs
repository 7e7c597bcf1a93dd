//! Common utilities for the upload and download handlers

use axum::extract::Multipart;
use axum::http::{header, HeaderMap};
use filegate_core::{AppError, Config};

/// Extract file data, filename, and declared content type from the multipart
/// form. Only one field named "file" is accepted; multiple file fields are
/// rejected.
///
/// The filename becomes the storage object key verbatim — no sanitization,
/// no normalization — so a missing filename is an error, not a default.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
) -> Result<(Vec<u8>, String, Option<String>), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            if file_data.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                ));
            }
            filename = field.file_name().map(|s: &str| s.to_string());
            content_type = field.content_type().map(|s: &str| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

            file_data = Some(data.to_vec());
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;
    let filename = filename
        .ok_or_else(|| AppError::InvalidInput("File field carries no filename".to_string()))?;

    Ok((file_data, filename, content_type))
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Content type for an upload: caller-declared when present, else guessed
/// from the filename extension, else the generic binary type.
pub fn resolve_content_type(declared: Option<&str>, filename: &str) -> String {
    match declared {
        Some(ct) if !ct.is_empty() => ct.to_string(),
        _ => guess_media_type(filename),
    }
}

/// Guess a media type from a path's extension, falling back to the generic
/// binary type for unrecognized extensions.
pub fn guess_media_type(path: &str) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}

/// Strip any directory-like prefix from a path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Base URL for gateway-relative links: the configured override when set,
/// else derived from the request's Host header. Host-derived URLs assume
/// plain http; deployments behind TLS set PUBLIC_BASE_URL.
pub fn request_base_url(config: &Config, headers: &HeaderMap) -> String {
    if let Some(base) = &config.public_base_url {
        return base.clone();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("http://{}", host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn test_config(public_base_url: Option<&str>) -> Config {
        Config {
            server_port: 4000,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            request_timeout_secs: 60,
            storage_url: "http://localhost:54321/storage/v1".to_string(),
            storage_api_key: "anon-key".to_string(),
            storage_service_key: None,
            public_base_url: public_base_url.map(String::from),
            max_file_size_bytes: 1024,
        }
    }

    #[test]
    fn basename_strips_directory_prefixes() {
        assert_eq!(basename("docs/report.pdf"), "report.pdf");
        assert_eq!(basename("a/b/c.txt"), "c.txt");
        assert_eq!(basename("plain.txt"), "plain.txt");
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        assert_eq!(guess_media_type("blob.unknownext"), "application/octet-stream");
        assert_eq!(guess_media_type("no_extension"), "application/octet-stream");
    }

    #[test]
    fn known_extensions_are_guessed() {
        assert_eq!(guess_media_type("report.pdf"), "application/pdf");
        assert_eq!(guess_media_type("photo.png"), "image/png");
    }

    #[test]
    fn declared_content_type_wins() {
        assert_eq!(
            resolve_content_type(Some("application/pdf"), "file.png"),
            "application/pdf"
        );
        assert_eq!(resolve_content_type(None, "file.png"), "image/png");
        assert_eq!(
            resolve_content_type(None, "file.unknownext"),
            "application/octet-stream"
        );
    }

    #[test]
    fn file_size_limit_enforced() {
        assert!(validate_file_size(10, 1024).is_ok());
        assert!(matches!(
            validate_file_size(2048, 1024),
            Err(AppError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn configured_base_url_wins_over_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("proxy.internal:9000"));

        let config = test_config(Some("https://files.example.com"));
        assert_eq!(request_base_url(&config, &headers), "https://files.example.com");

        let config = test_config(None);
        assert_eq!(
            request_base_url(&config, &headers),
            "http://proxy.internal:9000"
        );
    }

    #[test]
    fn missing_host_header_falls_back_to_localhost() {
        let config = test_config(None);
        assert_eq!(request_base_url(&config, &HeaderMap::new()), "http://localhost");
    }
}
