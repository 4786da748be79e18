//! Open Graph metadata extraction for link cards.

use crate::domain::entities::OgpRecord;
use crate::domain::gateways::PageFetcher;
use crate::utils::encoding::decode_html;
use scraper::{Html, Selector};
use std::sync::Arc;
use url::Url;

/// Fetches a page and extracts the metadata a link card needs.
///
/// Extraction is best-effort: a fetch or parse failure yields `None` and the
/// caller renders a bare link instead of a card.
pub struct OgpService<F: PageFetcher> {
    fetcher: Arc<F>,
}

impl<F: PageFetcher> OgpService<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    /// Fetches `url` and extracts its Open Graph metadata.
    pub async fn fetch(&self, url: &str) -> Option<OgpRecord> {
        let base = match Url::parse(url) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Invalid card target URL");
                return None;
            }
        };

        let bytes = match self.fetcher.fetch_bytes(url).await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Card page fetch failed");
                return None;
            }
        };

        let html = decode_html(&bytes);
        Some(extract_ogp(&html, &base))
    }
}

/// Reads one element's attribute through a selector, returning a trimmed
/// non-empty value.
fn select_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Extracts card metadata from a decoded HTML document.
///
/// Fallback chain per field: `og:title` then `<title>`, `og:description`
/// then the description meta tag, and any `icon`-flavored link relation
/// then `{origin}/favicon.ico`. Image and favicon URLs are resolved
/// against the page URL so relative references survive.
fn extract_ogp(html: &str, base: &Url) -> OgpRecord {
    let document = Html::parse_document(html);

    let og_title = Selector::parse(r#"meta[property="og:title"]"#).unwrap();
    let title_tag = Selector::parse("title").unwrap();
    let og_description = Selector::parse(r#"meta[property="og:description"]"#).unwrap();
    let meta_description = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let og_image = Selector::parse(r#"meta[property="og:image"]"#).unwrap();
    let icon_link = Selector::parse(r#"link[rel*="icon"]"#).unwrap();

    let title = select_attr(&document, &og_title, "content").or_else(|| {
        document
            .select(&title_tag)
            .map(|el| el.text().collect::<String>())
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty())
    });

    let description = select_attr(&document, &og_description, "content")
        .or_else(|| select_attr(&document, &meta_description, "content"));

    let image_url = select_attr(&document, &og_image, "content")
        .and_then(|raw| base.join(&raw).ok())
        .map(|u| u.to_string());

    let favicon_url = select_attr(&document, &icon_link, "href")
        .and_then(|raw| base.join(&raw).ok())
        .map(|u| u.to_string())
        .or_else(|| base.join("/favicon.ico").ok().map(|u| u.to_string()));

    let mut record = OgpRecord::empty(base.to_string());
    record.title = title;
    record.description = description;
    record.image_url = image_url;
    record.favicon_url = favicon_url;
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::MockPageFetcher;
    use crate::error::AppError;

    async fn fetch(body: &'static [u8], url: &str) -> Option<OgpRecord> {
        let mut fetcher = MockPageFetcher::new();
        fetcher
            .expect_fetch_bytes()
            .returning(move |_| Ok(body.to_vec()));
        OgpService::new(Arc::new(fetcher)).fetch(url).await
    }

    #[tokio::test]
    async fn test_full_ogp_page() {
        let body = br#"<html><head>
            <meta property="og:title" content="A Product">
            <meta property="og:description" content="Great stuff">
            <meta property="og:image" content="https://cdn.example/p.jpg">
            <link rel="icon" href="/icon.png">
            <title>fallback title</title>
        </head><body></body></html>"#;

        let record = fetch(body, "https://shop.example/item").await.unwrap();
        assert_eq!(record.title.as_deref(), Some("A Product"));
        assert_eq!(record.description.as_deref(), Some("Great stuff"));
        assert_eq!(record.image_url.as_deref(), Some("https://cdn.example/p.jpg"));
        assert_eq!(
            record.favicon_url.as_deref(),
            Some("https://shop.example/icon.png")
        );
        assert_eq!(record.site_url, "https://shop.example/item");
        assert_eq!(record.link_url, record.site_url);
    }

    #[tokio::test]
    async fn test_fallbacks_without_ogp_tags() {
        let body = br#"<html><head>
            <title> Plain Title </title>
            <meta name="description" content="plain description">
        </head><body></body></html>"#;

        let record = fetch(body, "https://shop.example/item").await.unwrap();
        assert_eq!(record.title.as_deref(), Some("Plain Title"));
        assert_eq!(record.description.as_deref(), Some("plain description"));
        assert!(record.image_url.is_none());
        assert_eq!(
            record.favicon_url.as_deref(),
            Some("https://shop.example/favicon.ico")
        );
    }

    #[tokio::test]
    async fn test_untitled_page_yields_empty_fields() {
        let record = fetch(b"<html><body>nothing here</body></html>", "https://x.example/")
            .await
            .unwrap();
        assert!(record.title.is_none());
        assert!(record.description.is_none());
    }

    #[tokio::test]
    async fn test_shift_jis_page_is_decoded() {
        let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode(
            r#"<html><head><meta charset="Shift_JIS"><meta property="og:title" content="ストア"></head></html>"#,
        );
        let body = encoded.into_owned();

        let mut fetcher = MockPageFetcher::new();
        fetcher
            .expect_fetch_bytes()
            .returning(move |_| Ok(body.clone()));

        let record = OgpService::new(Arc::new(fetcher))
            .fetch("https://jp.example/")
            .await
            .unwrap();
        assert_eq!(record.title.as_deref(), Some("ストア"));
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_none() {
        let mut fetcher = MockPageFetcher::new();
        fetcher
            .expect_fetch_bytes()
            .returning(|_| Err(AppError::upstream("down", serde_json::Value::Null)));

        let result = OgpService::new(Arc::new(fetcher))
            .fetch("https://down.example/")
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_invalid_url_yields_none() {
        let fetcher = MockPageFetcher::new();
        let result = OgpService::new(Arc::new(fetcher)).fetch("not a url").await;
        assert!(result.is_none());
    }
}
