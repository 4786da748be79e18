//! Blog content entities mapped from the WordPress-style backend.

use chrono::{DateTime, Utc};

/// A blog post.
///
/// `content_html` is the raw article body as delivered by the content
/// backend; it is passed through the link rewriter before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content_html: String,
    pub featured_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub category_ids: Vec<i64>,
    pub tag_ids: Vec<i64>,
}

impl Post {
    /// Site-relative path to the post page.
    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

/// A content taxonomy term (category or tag).
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// One page of a paginated post listing.
#[derive(Debug, Clone)]
pub struct PostPage {
    /// Total result count reported by the backend (`X-WP-Total`).
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub items: Vec<Post>,
}

impl PostPage {
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page as u64) as u32
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}
