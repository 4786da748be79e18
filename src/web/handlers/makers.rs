//! Maker listing and maker product pages.

use crate::domain::entities::Maker;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::ProductListTemplate;
use crate::web::query::ProductListParams;
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde_json::json;

/// Template for the maker index.
#[derive(Template, WebTemplate)]
#[template(path = "makers.html")]
pub struct MakersTemplate {
    pub makers: Vec<Maker>,
}

/// Renders the maker index.
///
/// # Endpoint
///
/// `GET /makers`
pub async fn makers_handler(State(state): State<AppState>) -> Result<MakersTemplate, AppError> {
    let makers = state.catalog.makers().await?;
    Ok(MakersTemplate { makers })
}

/// Renders the products of one maker.
///
/// # Endpoint
///
/// `GET /makers/{id}?page=`
pub async fn maker_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<ProductListParams>,
) -> Result<ProductListTemplate, AppError> {
    let makers = state.catalog.makers().await?;
    let maker = makers
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| AppError::not_found("Maker not found", json!({ "id": id })))?;

    let mut query = params.to_query()?;
    query.maker = Some(id);

    let page = state.catalog.products(query).await?;
    Ok(ProductListTemplate::from_page(
        maker.name,
        page,
        &format!("/makers/{id}"),
    ))
}
