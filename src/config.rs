//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. Components never read the process environment ad hoc; they receive
//! an explicitly constructed [`Config`].
//!
//! ## Required Variables
//!
//! - `COMMERCE_API_BASE` - Base URL of the commerce REST backend
//! - `CONTENT_API_BASE` - Base URL of the WordPress-style content backend
//! - `AFFILIATE_API_BASE` - Base URL of the merchant-resolution API
//! - `REVALIDATE_SECRET` - Shared secret for the revalidation webhook
//!
//! ## Optional Variables
//!
//! - `AFFILIATE_NETWORK_ID` - Affiliate network id; when unset, link
//!   rewriting passes URLs through unmodified
//! - `AFFILIATE_CLICK_DOMAIN` - Affiliate click domain
//!   (default: `click.linksynergy.com`)
//! - `SITE_BASE_URL` - Public base URL used in feeds and sitemaps
//!   (default: `http://localhost:3000`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `FETCH_TIMEOUT_SECONDS` - Per-request upstream timeout (default: 5)
//! - `CACHE_TTL_SECONDS` - TTL for cached rendered content and merchant
//!   lookups (default: 3600)
//! - `CACHE_ENABLED` - Set to `false`/`0` to disable the in-memory cache

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub commerce_api_base: String,
    pub content_api_base: String,
    pub affiliate_api_base: String,
    /// Affiliate network id. `None` disables deep-link rewriting; anchors
    /// pass through unchanged.
    pub affiliate_network_id: Option<String>,
    /// Hostname of the affiliate network's click/redirect endpoint.
    /// Anchors already pointing here are never re-resolved.
    pub affiliate_click_domain: String,
    pub site_base_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Timeout in seconds applied to every outbound fetch (merchant
    /// resolution, OGP fetch, backend data fetch).
    pub fetch_timeout_seconds: u64,
    /// TTL in seconds for cached rendered article HTML and merchant lookups.
    pub cache_ttl_seconds: u64,
    pub cache_enabled: bool,
    /// Shared secret accepted by `POST /revalidate`.
    pub revalidate_secret: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required backend URL or the webhook secret is
    /// missing.
    pub fn from_env() -> Result<Self> {
        let commerce_api_base =
            env::var("COMMERCE_API_BASE").context("COMMERCE_API_BASE must be set")?;
        let content_api_base =
            env::var("CONTENT_API_BASE").context("CONTENT_API_BASE must be set")?;
        let affiliate_api_base =
            env::var("AFFILIATE_API_BASE").context("AFFILIATE_API_BASE must be set")?;

        let affiliate_network_id = env::var("AFFILIATE_NETWORK_ID")
            .ok()
            .filter(|v| !v.is_empty());

        let affiliate_click_domain = env::var("AFFILIATE_CLICK_DOMAIN")
            .unwrap_or_else(|_| "click.linksynergy.com".to_string());

        let site_base_url =
            env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let fetch_timeout_seconds = env::var("FETCH_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let cache_ttl_seconds = env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let cache_enabled = env::var("CACHE_ENABLED")
            .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
            .unwrap_or(true);

        let revalidate_secret =
            env::var("REVALIDATE_SECRET").context("REVALIDATE_SECRET must be set")?;

        Ok(Self {
            commerce_api_base,
            content_api_base,
            affiliate_api_base,
            affiliate_network_id,
            affiliate_click_domain,
            site_base_url,
            listen_addr,
            log_level,
            log_format,
            fetch_timeout_seconds,
            cache_ttl_seconds,
            cache_enabled,
            revalidate_secret,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any backend base URL is not http(s)
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not in `host:port` form
    /// - Timeout or TTL values are out of range
    /// - `revalidate_secret` is empty
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("COMMERCE_API_BASE", &self.commerce_api_base),
            ("CONTENT_API_BASE", &self.content_api_base),
            ("AFFILIATE_API_BASE", &self.affiliate_api_base),
            ("SITE_BASE_URL", &self.site_base_url),
        ] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                anyhow::bail!(
                    "{} must start with 'http://' or 'https://', got '{}'",
                    name,
                    value
                );
            }
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.fetch_timeout_seconds == 0 || self.fetch_timeout_seconds > 120 {
            anyhow::bail!(
                "FETCH_TIMEOUT_SECONDS must be between 1 and 120, got {}",
                self.fetch_timeout_seconds
            );
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than 0");
        }

        if self.affiliate_click_domain.is_empty() || self.affiliate_click_domain.contains('/') {
            anyhow::bail!(
                "AFFILIATE_CLICK_DOMAIN must be a bare hostname, got '{}'",
                self.affiliate_click_domain
            );
        }

        if self.revalidate_secret.is_empty() {
            anyhow::bail!("REVALIDATE_SECRET must not be empty");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Commerce API: {}", self.commerce_api_base);
        tracing::info!("  Content API: {}", self.content_api_base);
        tracing::info!("  Affiliate API: {}", self.affiliate_api_base);

        if let Some(ref network_id) = self.affiliate_network_id {
            tracing::info!(
                "  Affiliate rewriting: enabled (network {}, click domain {})",
                network_id,
                self.affiliate_click_domain
            );
        } else {
            tracing::info!("  Affiliate rewriting: disabled (no network id)");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Fetch timeout: {}s", self.fetch_timeout_seconds);
        tracing::info!(
            "  Cache: {} (TTL {}s)",
            if self.cache_enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.cache_ttl_seconds
        );
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn base_config() -> Config {
        Config {
            commerce_api_base: "https://api.example.com".to_string(),
            content_api_base: "https://cms.example.com/wp-json/wp/v2".to_string(),
            affiliate_api_base: "https://api.example.com".to_string(),
            affiliate_network_id: Some("R9f1WByH5RE".to_string()),
            affiliate_click_domain: "click.linksynergy.com".to_string(),
            site_base_url: "https://shop.example.com".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            fetch_timeout_seconds: 5,
            cache_ttl_seconds: 3600,
            cache_enabled: true,
            revalidate_secret: "test-secret".to_string(),
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = base_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        config.commerce_api_base = "ftp://api.example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_timeout_bounds() {
        let mut config = base_config();

        config.fetch_timeout_seconds = 0;
        assert!(config.validate().is_err());

        config.fetch_timeout_seconds = 121;
        assert!(config.validate().is_err());

        config.fetch_timeout_seconds = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_click_domain() {
        let mut config = base_config();

        config.affiliate_click_domain = "click.linksynergy.com/deeplink".to_string();
        assert!(config.validate().is_err());

        config.affiliate_click_domain = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_secret() {
        let mut config = base_config();
        config.revalidate_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_requires_backends() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("COMMERCE_API_BASE");
            env::remove_var("CONTENT_API_BASE");
            env::remove_var("AFFILIATE_API_BASE");
            env::remove_var("REVALIDATE_SECRET");
        }

        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("COMMERCE_API_BASE", "https://api.example.com");
            env::set_var("CONTENT_API_BASE", "https://cms.example.com");
            env::set_var("AFFILIATE_API_BASE", "https://api.example.com");
            env::set_var("REVALIDATE_SECRET", "s3cret");
            env::remove_var("AFFILIATE_NETWORK_ID");
            env::remove_var("AFFILIATE_CLICK_DOMAIN");
            env::remove_var("FETCH_TIMEOUT_SECONDS");
            env::remove_var("CACHE_ENABLED");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.affiliate_click_domain, "click.linksynergy.com");
        assert_eq!(config.fetch_timeout_seconds, 5);
        assert_eq!(config.cache_ttl_seconds, 3600);
        assert!(config.cache_enabled);
        assert!(config.affiliate_network_id.is_none());

        // Cleanup
        unsafe {
            env::remove_var("COMMERCE_API_BASE");
            env::remove_var("CONTENT_API_BASE");
            env::remove_var("AFFILIATE_API_BASE");
            env::remove_var("REVALIDATE_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_empty_network_id_treated_as_unset() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("COMMERCE_API_BASE", "https://api.example.com");
            env::set_var("CONTENT_API_BASE", "https://cms.example.com");
            env::set_var("AFFILIATE_API_BASE", "https://api.example.com");
            env::set_var("REVALIDATE_SECRET", "s3cret");
            env::set_var("AFFILIATE_NETWORK_ID", "");
        }

        let config = Config::from_env().unwrap();
        assert!(config.affiliate_network_id.is_none());

        // Cleanup
        unsafe {
            env::remove_var("COMMERCE_API_BASE");
            env::remove_var("CONTENT_API_BASE");
            env::remove_var("AFFILIATE_API_BASE");
            env::remove_var("REVALIDATE_SECRET");
            env::remove_var("AFFILIATE_NETWORK_ID");
        }
    }
}
