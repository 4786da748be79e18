//! Blog article assembly: content fetch, link rewriting, card data.

use crate::application::services::{OgpService, RewriteService};
use crate::domain::entities::{OgpRecord, Post, PostPage, ProcessedContent, Term};
use crate::domain::gateways::{ContentGateway, MerchantGateway, PageFetcher, PostQuery};
use crate::error::AppError;
use std::sync::Arc;

/// Everything a card template needs for one placeholder target.
///
/// `ogp` is `None` when metadata could not be fetched; the template then
/// falls back to a bare link.
#[derive(Debug, Clone)]
pub struct LinkCardData {
    pub url: String,
    pub ogp: Option<OgpRecord>,
}

/// A fully assembled article ready for rendering.
#[derive(Debug, Clone)]
pub struct Article {
    pub post: Post,
    pub content: ProcessedContent,
    /// Card data in placeholder document order.
    pub cards: Vec<LinkCardData>,
}

/// Assembles blog pages from the content backend.
///
/// Listing pages pass through to the gateway. Article pages run the full
/// pipeline: rewrite the body, fetch card metadata for every placeholder
/// target concurrently, and point each card at its affiliate deep link
/// where one exists.
pub struct BlogService<C, M, F>
where
    C: ContentGateway,
    M: MerchantGateway,
    F: PageFetcher,
{
    content: Arc<C>,
    rewriter: Arc<RewriteService<M>>,
    ogp: Arc<OgpService<F>>,
}

impl<C, M, F> BlogService<C, M, F>
where
    C: ContentGateway,
    M: MerchantGateway,
    F: PageFetcher,
{
    pub fn new(content: Arc<C>, rewriter: Arc<RewriteService<M>>, ogp: Arc<OgpService<F>>) -> Self {
        Self {
            content,
            rewriter,
            ogp,
        }
    }

    pub async fn posts(&self, query: PostQuery) -> Result<PostPage, AppError> {
        self.content.list_posts(query).await
    }

    pub async fn categories(&self) -> Result<Vec<Term>, AppError> {
        self.content.list_categories().await
    }

    pub async fn tags(&self) -> Result<Vec<Term>, AppError> {
        self.content.list_tags().await
    }

    /// Fetches and assembles one article by slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(article))` with rewritten content and card data
    /// - `Ok(None)` when no post matches the slug
    ///
    /// # Errors
    ///
    /// Only content-backend failures surface as errors; card metadata and
    /// affiliate conversion failures degrade per card.
    pub async fn article(&self, slug: &str) -> Result<Option<Article>, AppError> {
        let Some(post) = self.content.get_post_by_slug(slug).await? else {
            return Ok(None);
        };

        let content = self.rewriter.process(&post.content_html).await;

        let card_futures = content.inline_card_urls.iter().map(|url| async {
            let mut ogp = self.ogp.fetch(url).await;
            if let Some(ref mut record) = ogp
                && let Some(deeplink) = self.rewriter.deeplink_for(url).await
            {
                record.link_url = deeplink;
            }
            LinkCardData {
                url: url.clone(),
                ogp,
            }
        });
        let cards = futures::future::join_all(card_futures).await;

        Ok(Some(Article {
            post,
            content,
            cards,
        }))
    }
}
