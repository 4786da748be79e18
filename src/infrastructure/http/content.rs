//! Content backend gateway implementation (WordPress REST).
//!
//! Posts are fetched with `_embed` so featured media arrives inline; the
//! total result count comes from the `X-WP-Total` response header.

use crate::domain::entities::{Post, PostPage, Term};
use crate::domain::gateways::{ContentGateway, PostQuery};
use crate::error::{map_reqwest_error, AppError};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::json;

/// reqwest-backed [`ContentGateway`].
pub struct ContentClient {
    http: reqwest::Client,
    base: String,
}

#[derive(Debug, Deserialize)]
struct RenderedDto {
    rendered: String,
}

#[derive(Debug, Deserialize)]
struct MediaDto {
    #[serde(default)]
    source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedDto {
    #[serde(rename = "wp:featuredmedia", default)]
    featured_media: Option<Vec<MediaDto>>,
}

#[derive(Debug, Deserialize)]
struct PostDto {
    id: i64,
    slug: String,
    title: RenderedDto,
    excerpt: RenderedDto,
    content: RenderedDto,
    /// WordPress emits `date_gmt` as a naive timestamp in UTC.
    #[serde(default)]
    date_gmt: Option<String>,
    #[serde(default)]
    categories: Vec<i64>,
    #[serde(default)]
    tags: Vec<i64>,
    #[serde(rename = "_embedded", default)]
    embedded: Option<EmbeddedDto>,
}

#[derive(Debug, Deserialize)]
struct TermDto {
    id: i64,
    name: String,
    slug: String,
}

fn parse_wp_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

impl From<PostDto> for Post {
    fn from(dto: PostDto) -> Self {
        let featured_image = dto
            .embedded
            .and_then(|e| e.featured_media)
            .and_then(|media| media.into_iter().next())
            .and_then(|m| m.source_url);

        Post {
            id: dto.id,
            slug: dto.slug,
            title: dto.title.rendered,
            excerpt: dto.excerpt.rendered,
            content_html: dto.content.rendered,
            featured_image,
            published_at: dto.date_gmt.as_deref().and_then(parse_wp_date),
            category_ids: dto.categories,
            tag_ids: dto.tags,
        }
    }
}

impl From<TermDto> for Term {
    fn from(dto: TermDto) -> Self {
        Term {
            id: dto.id,
            name: dto.name,
            slug: dto.slug,
        }
    }
}

impl ContentClient {
    pub fn new(http: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_posts(
        &self,
        params: &[(&str, String)],
    ) -> Result<(u64, Vec<PostDto>), AppError> {
        let url = format!("{}/posts", self.base);

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| map_reqwest_error("content", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(
                "Content backend returned an error status",
                json!({ "url": url, "status": status.as_u16() }),
            ));
        }

        let total = response
            .headers()
            .get("X-WP-Total")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let posts: Vec<PostDto> = response.json().await.map_err(|e| {
            AppError::upstream(
                "Content backend returned malformed JSON",
                json!({ "url": url, "reason": e.to_string() }),
            )
        })?;

        let total = total.unwrap_or(posts.len() as u64);
        Ok((total, posts))
    }

    async fn fetch_terms(&self, endpoint: &str) -> Result<Vec<Term>, AppError> {
        let url = format!("{}/{}", self.base, endpoint);

        let response = self
            .http
            .get(&url)
            .query(&[("per_page", "100")])
            .send()
            .await
            .map_err(|e| map_reqwest_error("content", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(
                "Content backend returned an error status",
                json!({ "url": url, "status": status.as_u16() }),
            ));
        }

        let terms: Vec<TermDto> = response.json().await.map_err(|e| {
            AppError::upstream(
                "Content backend returned malformed JSON",
                json!({ "url": url, "reason": e.to_string() }),
            )
        })?;

        Ok(terms.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ContentGateway for ContentClient {
    async fn list_posts(&self, query: PostQuery) -> Result<PostPage, AppError> {
        let mut params = vec![
            ("_embed", "1".to_string()),
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        if let Some(category) = query.category {
            params.push(("categories", category.to_string()));
        }
        if let Some(tag) = query.tag {
            params.push(("tags", tag.to_string()));
        }

        let (total, posts) = self.fetch_posts(&params).await?;

        Ok(PostPage {
            total,
            page: query.page,
            per_page: query.per_page,
            items: posts.into_iter().map(Into::into).collect(),
        })
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, AppError> {
        let params = vec![("_embed", "1".to_string()), ("slug", slug.to_string())];

        let (_, mut posts) = self.fetch_posts(&params).await?;

        // Slugs are unique; the backend returns a list of 0 or 1.
        Ok(if posts.is_empty() {
            None
        } else {
            Some(posts.remove(0).into())
        })
    }

    async fn list_categories(&self) -> Result<Vec<Term>, AppError> {
        self.fetch_terms("categories").await
    }

    async fn list_tags(&self) -> Result<Vec<Term>, AppError> {
        self.fetch_terms("tags").await
    }
}
