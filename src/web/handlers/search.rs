//! Product search page.

use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::ProductListTemplate;
use crate::web::query::ProductListParams;
use axum::extract::{Query, State};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Renders search results over the product catalog.
///
/// An empty search term renders an empty result page rather than an error.
///
/// # Endpoint
///
/// `GET /search?query=&page=`
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<ProductListTemplate, AppError> {
    let query = params.to_query()?;

    let heading = match query.query {
        Some(ref term) => format!("Search: {term}"),
        None => "Search".to_string(),
    };
    let base_href = match query.query {
        Some(ref term) => format!(
            "/search?query={}",
            utf8_percent_encode(term, NON_ALPHANUMERIC)
        ),
        None => "/search".to_string(),
    };

    let page = state.catalog.products(query).await?;
    Ok(ProductListTemplate::from_page(heading, page, &base_href))
}
