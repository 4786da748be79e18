//! Query-string parameter parsing for the storefront pages.

use crate::domain::gateways::{PostQuery, ProductQuery};
use crate::error::AppError;
use serde::Deserialize;
use serde_json::json;
use serde_with::{serde_as, DisplayFromStr};

const DEFAULT_PAGE_SIZE: u32 = 24;
const MAX_PAGE_SIZE: u32 = 100;
const DEFAULT_POSTS_PER_PAGE: u32 = 10;

/// Pagination and filter parameters for product listings.
///
/// Uses `serde_with` to parse numbers out of query strings.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub category: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub maker: Option<i64>,

    /// Free-text search term.
    #[serde(default)]
    pub query: Option<String>,
}

impl ProductListParams {
    /// Validates the parameters and builds a gateway query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the page is zero or the page
    /// size is out of range.
    pub fn to_query(&self) -> Result<ProductQuery, AppError> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::bad_request(
                format!("Page size must be between 1 and {MAX_PAGE_SIZE}"),
                json!({ "page_size": page_size }),
            ));
        }

        Ok(ProductQuery {
            page,
            page_size,
            category: self.category,
            maker: self.maker,
            query: self
                .query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
        })
    }
}

/// Pagination parameters for the blog listing.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PostListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub category: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub tag: Option<i64>,
}

impl PostListParams {
    /// Validates the parameters and builds a gateway query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the page is zero.
    pub fn to_query(&self) -> Result<PostQuery, AppError> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        Ok(PostQuery {
            page,
            per_page: DEFAULT_POSTS_PER_PAGE,
            category: self.category,
            tag: self.tag,
        })
    }
}

/// Parameters for the revalidation webhook.
///
/// Both fields are optional at the extraction layer so the handler can
/// answer a missing secret with 401 rather than a deserialization 400.
#[derive(Debug, Default, Deserialize)]
pub struct RevalidateParams {
    #[serde(default)]
    pub secret: Option<String>,
    /// Request path whose cached rendering should be dropped; the handler
    /// falls back to the blog index when omitted.
    #[serde(default)]
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_defaults() {
        let query = ProductListParams::default().to_query().unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
        assert!(query.query.is_none());
        assert!(query.category.is_none());
    }

    #[test]
    fn test_product_page_zero_is_error() {
        let params = ProductListParams {
            page: Some(0),
            ..Default::default()
        };
        assert!(params.to_query().is_err());
    }

    #[test]
    fn test_product_page_size_bounds() {
        let params = ProductListParams {
            page_size: Some(MAX_PAGE_SIZE + 1),
            ..Default::default()
        };
        assert!(params.to_query().is_err());

        let params = ProductListParams {
            page_size: Some(MAX_PAGE_SIZE),
            ..Default::default()
        };
        assert!(params.to_query().is_ok());
    }

    #[test]
    fn test_blank_search_term_is_dropped() {
        let params = ProductListParams {
            query: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(params.to_query().unwrap().query.is_none());
    }

    #[test]
    fn test_query_string_numbers_parse() {
        let params: ProductListParams =
            serde_urlencoded::from_str("page=2&page_size=48&category=7&query=camera").unwrap();
        let query = params.to_query().unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.page_size, 48);
        assert_eq!(query.category, Some(7));
        assert_eq!(query.query.as_deref(), Some("camera"));
    }

    #[test]
    fn test_post_defaults() {
        let query = PostListParams::default().to_query().unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, DEFAULT_POSTS_PER_PAGE);
    }
}
