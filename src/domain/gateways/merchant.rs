//! Gateway trait for affiliate merchant resolution.

use crate::domain::entities::MerchantRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Gateway interface for the merchant-resolution API.
///
/// The boundary is explicit about failure modes: a domain with no known
/// affiliate program is `Ok(None)`; a transport failure, non-2xx status, or
/// malformed body is an `Err`. Callers decide the fallback (the rewriter
/// degrades either outcome to "leave the link unmodified").
///
/// # Implementations
///
/// - [`crate::infrastructure::http::MerchantResolver`] - reqwest implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MerchantGateway: Send + Sync {
    /// Resolves a bare domain name (hostname only, no scheme or path) to a
    /// merchant record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` when the domain is in the merchant dataset
    /// - `Ok(None)` on upstream 404 ("no affiliate program known")
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on any other non-2xx status, JSON
    /// parse failure, or network failure.
    async fn resolve(&self, domain: &str) -> Result<Option<MerchantRecord>, AppError>;
}
