//! Shared HTTP client construction.

use anyhow::{Context, Result};
use std::time::Duration;

/// User-Agent sent on all outbound requests.
const USER_AGENT: &str = concat!("storefront/", env!("CARGO_PKG_VERSION"));

/// Maximum redirects followed when fetching third-party pages.
const MAX_REDIRECTS: usize = 5;

/// Builds the shared reqwest client used by all gateways.
///
/// The timeout applies per request and covers connect, transfer, and
/// redirects; a hung upstream can therefore never stall a page render
/// beyond this bound.
///
/// # Errors
///
/// Returns an error if the TLS backend fails to initialize.
pub fn build_client(timeout_seconds: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .context("Failed to build HTTP client")
}
