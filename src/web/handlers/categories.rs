//! Category listing and category product pages.

use crate::domain::entities::Category;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::ProductListTemplate;
use crate::web::query::ProductListParams;
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde_json::json;

/// Template for the category index.
#[derive(Template, WebTemplate)]
#[template(path = "categories.html")]
pub struct CategoriesTemplate {
    pub categories: Vec<Category>,
}

/// Renders the category index.
///
/// # Endpoint
///
/// `GET /categories`
pub async fn categories_handler(
    State(state): State<AppState>,
) -> Result<CategoriesTemplate, AppError> {
    let categories = state.catalog.categories().await?;
    Ok(CategoriesTemplate { categories })
}

/// Renders the products of one category.
///
/// # Endpoint
///
/// `GET /categories/{id}?page=`
pub async fn category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<ProductListParams>,
) -> Result<ProductListTemplate, AppError> {
    let categories = state.catalog.categories().await?;
    let category = categories
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::not_found("Category not found", json!({ "id": id })))?;

    let mut query = params.to_query()?;
    query.category = Some(id);

    let page = state.catalog.products(query).await?;
    Ok(ProductListTemplate::from_page(
        category.name,
        page,
        &format!("/categories/{id}"),
    ))
}
