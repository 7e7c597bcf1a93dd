//! Configuration module
//!
//! Environment-sourced configuration, read once at startup and validated
//! before the server binds.

use std::env;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MAX_FILE_SIZE_MB: usize = 50;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Application configuration.
///
/// `STORAGE_URL` and `STORAGE_API_KEY` are required; the process refuses to
/// start without them. `STORAGE_SERVICE_KEY` is the optional elevated
/// credential, preferred for every write and signing call when present.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub request_timeout_secs: u64,
    /// Base URL of the external storage service's object API.
    pub storage_url: String,
    /// Standard credential. Always used for plain byte downloads and delete.
    pub storage_api_key: String,
    /// Elevated credential. Enables the policy-denial fallback path.
    pub storage_service_key: Option<String>,
    /// Overrides Host-header derivation when building `download_url`.
    pub public_base_url: Option<String>,
    pub max_file_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            storage_url: env::var("STORAGE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .map_err(|_| anyhow::anyhow!("STORAGE_URL must be set"))?,
            storage_api_key: env::var("STORAGE_API_KEY")
                .map_err(|_| anyhow::anyhow!("STORAGE_API_KEY must be set"))?,
            storage_service_key: env::var("STORAGE_SERVICE_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .map(|s| s.trim_end_matches('/').to_string()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if !self.storage_url.starts_with("http://") && !self.storage_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "STORAGE_URL must be an http(s) URL, got '{}'",
                self.storage_url
            ));
        }

        if self.storage_api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("STORAGE_API_KEY must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 4000,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            request_timeout_secs: 60,
            storage_url: "https://storage.example.com/storage/v1".to_string(),
            storage_api_key: "anon-key".to_string(),
            storage_service_key: None,
            public_base_url: None,
            max_file_size_bytes: 50 * 1024 * 1024,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn production_rejects_wildcard_cors() {
        let mut config = test_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());

        config.cors_origins = vec!["https://app.example.com".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn storage_url_must_be_http() {
        let mut config = test_config();
        config.storage_url = "storage.example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_api_key_rejected() {
        let mut config = test_config();
        config.storage_api_key = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
