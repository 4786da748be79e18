//! Blog listing and article handlers.

use crate::domain::entities::{Post, PostPage};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::cards;
use crate::web::query::PostListParams;
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use serde_json::json;

/// Template for the blog index.
#[derive(Template, WebTemplate)]
#[template(path = "blog.html")]
pub struct BlogTemplate {
    pub posts: Vec<Post>,
    pub page: u32,
    pub total_pages: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl BlogTemplate {
    fn from_page(page: PostPage) -> Self {
        let prev_href = page
            .has_prev()
            .then(|| format!("/blog?page={}", page.page - 1));
        let next_href = page
            .has_next()
            .then(|| format!("/blog?page={}", page.page + 1));

        Self {
            page: page.page,
            total_pages: page.total_pages(),
            posts: page.items,
            prev_href,
            next_href,
        }
    }
}

/// Template for one article page.
#[derive(Template)]
#[template(path = "post.html")]
struct PostTemplate {
    title: String,
    published: Option<String>,
    /// Rewritten article HTML with cards spliced in; rendered unescaped.
    body: String,
}

/// Renders the blog index.
///
/// # Endpoint
///
/// `GET /blog?page=&category=&tag=`
pub async fn blog_handler(
    State(state): State<AppState>,
    Query(params): Query<PostListParams>,
) -> Result<BlogTemplate, AppError> {
    let query = params.to_query()?;
    let page = state.blog.posts(query).await?;
    Ok(BlogTemplate::from_page(page))
}

/// Renders one article.
///
/// The fully rendered page is cached keyed by request path, so repeated
/// views skip the rewrite pipeline and its upstream lookups entirely until
/// the entry expires or the revalidation webhook drops it.
///
/// # Endpoint
///
/// `GET /blog/{slug}`
pub async fn post_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let cache_key = format!("/blog/{slug}");

    if let Ok(Some(cached)) = state.cache.get(&cache_key).await {
        return Ok(Html(cached).into_response());
    }

    let article = state
        .blog
        .article(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Post not found", json!({ "slug": slug })))?;

    let body = cards::substitute_cards(&article.content.html, &article.cards);

    let page = PostTemplate {
        title: article.post.title.clone(),
        published: article
            .post
            .published_at
            .map(|dt| dt.format("%Y-%m-%d").to_string()),
        body,
    };
    let html = page
        .render()
        .map_err(|e| AppError::internal("Template render failed", json!({ "reason": e.to_string() })))?;

    if let Err(e) = state.cache.set(&cache_key, &html, None).await {
        tracing::warn!(key = %cache_key, error = %e, "Failed to cache rendered article");
    }

    Ok(Html(html).into_response())
}
