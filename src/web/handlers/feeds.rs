//! RSS and sitemap endpoints.

use crate::error::AppError;
use crate::state::AppState;
use crate::web::feeds;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde_json::json;

const RSS_ITEMS: u32 = 20;

fn xml_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], body).into_response()
}

fn render_error(e: std::io::Error) -> AppError {
    AppError::internal("Feed generation failed", json!({ "reason": e.to_string() }))
}

/// Serves the RSS feed of recently added products.
///
/// # Endpoint
///
/// `GET /feed.xml`
pub async fn feed_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let products = state.catalog.recent_products(RSS_ITEMS).await?;
    let xml = feeds::render_rss(&state.site_base_url, &products).map_err(render_error)?;
    Ok(xml_response(xml))
}

/// Serves the sitemap index.
///
/// # Endpoint
///
/// `GET /sitemap.xml`
pub async fn sitemap_index_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let count = state.catalog.product_count().await?;
    let xml = feeds::render_sitemap_index(&state.site_base_url, count).map_err(render_error)?;
    Ok(xml_response(xml))
}

/// Serves one product sub-sitemap.
///
/// The path parameter is the full file name (`products-{n}.xml`); anything
/// else is a 404.
///
/// # Endpoint
///
/// `GET /sitemaps/{file}`
pub async fn product_sitemap_handler(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, AppError> {
    let n: u32 = file
        .strip_prefix("products-")
        .and_then(|rest| rest.strip_suffix(".xml"))
        .and_then(|n| n.parse().ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::not_found("No such sitemap", json!({ "file": file })))?;

    let products = state.catalog.sitemap_chunk(n).await?;
    let xml =
        feeds::render_product_sitemap(&state.site_base_url, &products).map_err(render_error)?;
    Ok(xml_response(xml))
}
