//! Product listing and detail handlers.

use crate::domain::entities::{Product, ProductPage};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::query::ProductListParams;
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};

/// Template shared by every paginated product listing: the catalog page,
/// category and maker pages, and search results.
#[derive(Template, WebTemplate)]
#[template(path = "products.html")]
pub struct ProductListTemplate {
    pub heading: String,
    pub items: Vec<Product>,
    pub page: u32,
    pub total_pages: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl ProductListTemplate {
    /// Builds the listing template, deriving pagination links from the page
    /// path and any extra query parameters (already URL-encoded).
    pub fn from_page(heading: impl Into<String>, page: ProductPage, base_href: &str) -> Self {
        let joiner = if base_href.contains('?') { '&' } else { '?' };
        let prev_href = page
            .has_prev()
            .then(|| format!("{}{}page={}", base_href, joiner, page.page - 1));
        let next_href = page
            .has_next()
            .then(|| format!("{}{}page={}", base_href, joiner, page.page + 1));

        Self {
            heading: heading.into(),
            page: page.page,
            total_pages: page.total_pages(),
            items: page.items,
            prev_href,
            next_href,
        }
    }
}

/// Template for the product detail page.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub product: Product,
}

/// Renders the paginated product catalog.
///
/// # Endpoint
///
/// `GET /products?page=&page_size=&category=&maker=&query=`
pub async fn products_handler(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<ProductListTemplate, AppError> {
    let query = params.to_query()?;
    let page = state.catalog.products(query).await?;
    Ok(ProductListTemplate::from_page("Products", page, "/products"))
}

/// Renders one product's detail page.
///
/// # Endpoint
///
/// `GET /products/{id}`
pub async fn product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ProductTemplate, AppError> {
    let product = state.catalog.product(id).await?;
    Ok(ProductTemplate { product })
}
