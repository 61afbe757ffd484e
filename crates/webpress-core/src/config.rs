//! Configuration module
//!
//! `Config` is built once at startup from the environment and passed to every
//! component that needs it. Nothing here is process-global.

use std::env;
use std::path::PathBuf;

use crate::constants::MAX_FILES_PER_REQUEST;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_OUTPUT_DIR: &str = "converted";
const MAX_FILE_SIZE_MB: usize = 10;
/// Headroom for multipart boundaries and part headers on top of the file payloads.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Directory converted images are written to and served from
    pub output_dir: PathBuf,
    /// Public origin used to build result URLs (no trailing slash)
    pub public_base_url: String,
    pub max_file_size_bytes: usize,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let output_dir = PathBuf::from(
            lookup("OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
        );

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", server_port))
            .trim_end_matches('/')
            .to_string();

        let max_file_size_mb = match lookup("MAX_FILE_SIZE_MB") {
            Some(size) => size
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_FILE_SIZE_MB must be a valid number"))?,
            None => MAX_FILE_SIZE_MB,
        };

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port,
            output_dir,
            public_base_url,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            cors_origins,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("OUTPUT_DIR must not be empty"));
        }

        if !(self.public_base_url.starts_with("http://")
            || self.public_base_url.starts_with("https://"))
        {
            return Err(anyhow::anyhow!(
                "PUBLIC_BASE_URL must start with http:// or https:// (got '{}')",
                self.public_base_url
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Base URL under which converted images are reachable.
    pub fn images_base_url(&self) -> String {
        format!(
            "{}{}",
            self.public_base_url,
            crate::constants::IMAGES_ROUTE_PREFIX
        )
    }

    /// Largest request body accepted for an upload.
    ///
    /// Room is left for one file past the batch limit, so a batch that is too
    /// large in count is reported as such instead of tripping the body cap.
    pub fn max_request_body_bytes(&self) -> usize {
        self.max_file_size_bytes
            .saturating_mul(MAX_FILES_PER_REQUEST + 1)
            .saturating_add(MULTIPART_OVERHEAD_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.output_dir, PathBuf::from("converted"));
        assert_eq!(config.public_base_url, "http://localhost:3000");
        assert_eq!(config.images_base_url(), "http://localhost:3000/images");
        assert_eq!(config.max_file_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("OUTPUT_DIR", "/var/lib/webpress"),
            ("PUBLIC_BASE_URL", "https://img.example.com/"),
            ("MAX_FILE_SIZE_MB", "2"),
            ("CORS_ORIGINS", "https://a.example.com, https://b.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.output_dir, PathBuf::from("/var/lib/webpress"));
        assert_eq!(config.images_base_url(), "https://img.example.com/images");
        assert_eq!(config.max_file_size_bytes, 2 * 1024 * 1024);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(
            config.max_request_body_bytes(),
            2 * 1024 * 1024 * 21 + 1024 * 1024
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
    }

    #[test]
    fn test_invalid_max_file_size_rejected() {
        for value in ["ten", "-1", "1.5", ""] {
            let result = Config::from_lookup(lookup_from(&[("MAX_FILE_SIZE_MB", value)]));
            assert!(result.is_err(), "MAX_FILE_SIZE_MB={:?} should be rejected", value);
        }
    }

    #[test]
    fn test_validation_failures() {
        assert!(Config::from_lookup(lookup_from(&[("MAX_FILE_SIZE_MB", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("OUTPUT_DIR", "")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("PUBLIC_BASE_URL", "localhost")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("ENVIRONMENT", "production")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://app.example.com"),
        ]))
        .is_ok());
    }
}
