//! Gateway trait for the commerce backend.

use crate::domain::entities::{Category, Maker, Product, ProductPage};
use crate::error::AppError;
use async_trait::async_trait;

/// Query parameters for a product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub page: u32,
    pub page_size: u32,
    pub category: Option<i64>,
    pub maker: Option<i64>,
    /// Free-text search term.
    pub query: Option<String>,
}

impl ProductQuery {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }
}

/// Gateway interface for the commerce REST backend.
///
/// List endpoints return `{ count, results }` shaped pages; single-entity
/// lookups return `Ok(None)` when the backend answers 404.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::CommerceClient`] - reqwest implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommerceGateway: Send + Sync {
    /// Lists products with pagination, filters, and free-text search.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] when the backend is unreachable or
    /// responds with malformed JSON.
    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, AppError>;

    /// Fetches a single product.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(product))` if found
    /// - `Ok(None)` on upstream 404
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on transport or decode failures.
    async fn get_product(&self, id: i64) -> Result<Option<Product>, AppError>;

    /// Lists all product categories.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on transport or decode failures.
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;

    /// Lists all makers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on transport or decode failures.
    async fn list_makers(&self) -> Result<Vec<Maker>, AppError>;
}
