//! Front page handler.

use crate::domain::entities::{Post, Product};
use crate::domain::gateways::PostQuery;
use crate::error::AppError;
use crate::state::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

const RECENT_PRODUCTS: u32 = 8;
const RECENT_POSTS: u32 = 5;

/// Template for the front page.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<Product>,
    pub posts: Vec<Post>,
}

/// Renders the front page with recent products and blog posts.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler(State(state): State<AppState>) -> Result<HomeTemplate, AppError> {
    let (products, posts) = tokio::join!(
        state.catalog.recent_products(RECENT_PRODUCTS),
        state.blog.posts(PostQuery::page(1, RECENT_POSTS)),
    );

    Ok(HomeTemplate {
        products: products?,
        posts: posts?.items,
    })
}
