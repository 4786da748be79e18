//! Gateway trait for fetching arbitrary external pages.

use crate::error::AppError;
use async_trait::async_trait;

/// Gateway interface for downloading third-party pages as raw bytes.
///
/// The transport must NOT decode the body: the OGP fetcher needs the
/// original bytes so it can re-decode them once a `<meta>` charset
/// declaration is known.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::PageClient`] - reqwest implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Downloads `url` and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on transport failures, non-2xx
    /// responses, non-HTML content, or oversized bodies.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, AppError>;
}
