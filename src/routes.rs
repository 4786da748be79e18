//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                        - Front page
//! - `GET  /products`                - Product catalog (paginated)
//! - `GET  /products/{id}`           - Product detail
//! - `GET  /categories`              - Category index
//! - `GET  /categories/{id}`         - Products in one category
//! - `GET  /makers`                  - Maker index
//! - `GET  /makers/{id}`             - Products of one maker
//! - `GET  /search`                  - Product search
//! - `GET  /blog`                    - Blog index
//! - `GET  /blog/{slug}`             - Article (rewritten, card-rendered)
//! - `GET  /feed.xml`                - RSS feed of recent products
//! - `GET  /sitemap.xml`             - Sitemap index
//! - `GET  /sitemaps/{file}`         - Product sub-sitemaps
//! - `GET  /health`                  - Health check
//! - `POST /revalidate`              - Cache invalidation webhook
//! - `/static/*`                     - Static assets

use crate::state::AppState;
use crate::web::handlers::{
    blog_handler, categories_handler, category_handler, feed_handler, health_handler,
    home_handler, maker_handler, makers_handler, post_handler, product_handler,
    product_sitemap_handler, products_handler, revalidate_handler, search_handler,
    sitemap_index_handler,
};
use crate::web::middleware::tracing;
use axum::routing::{get, post};
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(home_handler))
        .route("/products", get(products_handler))
        .route("/products/{id}", get(product_handler))
        .route("/categories", get(categories_handler))
        .route("/categories/{id}", get(category_handler))
        .route("/makers", get(makers_handler))
        .route("/makers/{id}", get(maker_handler))
        .route("/search", get(search_handler))
        .route("/blog", get(blog_handler))
        .route("/blog/{slug}", get(post_handler))
        .route("/feed.xml", get(feed_handler))
        .route("/sitemap.xml", get(sitemap_index_handler))
        .route("/sitemaps/{file}", get(product_sitemap_handler))
        .route("/health", get(health_handler))
        .route("/revalidate", post(revalidate_handler))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
