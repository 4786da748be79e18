//! Gateway trait for the WordPress-style content backend.

use crate::domain::entities::{Post, PostPage, Term};
use crate::error::AppError;
use async_trait::async_trait;

/// Query parameters for a post listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostQuery {
    pub page: u32,
    pub per_page: u32,
    pub category: Option<i64>,
    pub tag: Option<i64>,
}

impl PostQuery {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            ..Self::default()
        }
    }
}

/// Gateway interface for the content REST backend.
///
/// Posts are fetched with `_embed` so featured media arrives inline.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::ContentClient`] - reqwest implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// Lists posts with pagination and taxonomy filters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] when the backend is unreachable or
    /// responds with malformed JSON.
    async fn list_posts(&self, query: PostQuery) -> Result<PostPage, AppError>;

    /// Fetches a single post by slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(post))` if found
    /// - `Ok(None)` when no post matches the slug
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on transport or decode failures.
    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, AppError>;

    /// Lists content categories.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on transport or decode failures.
    async fn list_categories(&self) -> Result<Vec<Term>, AppError>;

    /// Lists content tags.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on transport or decode failures.
    async fn list_tags(&self) -> Result<Vec<Term>, AppError>;
}
