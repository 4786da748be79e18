//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching string values keyed by path or lookup key.
///
/// Used for two things: rendered article HTML (keyed by request path) and
/// merchant-resolution memoization (keyed by `merchant:{domain}`). Cache
/// failures must degrade to a fresh computation, never disrupt a request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - in-process map with TTL
/// - [`crate::infrastructure::cache::NullCache`] - no-op implementation for disabled caching
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Retrieves a cached value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss or expired entry
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value with optional TTL override in seconds.
    ///
    /// Implementations should log errors and return `Ok(())` where possible
    /// to avoid disrupting the request flow.
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Removes a cached entry. Used by the revalidation webhook.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is usable.
    ///
    /// Used by the health check endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
