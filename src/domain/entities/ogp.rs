//! Open Graph metadata and processed article content.

/// Open Graph metadata extracted from a fetched page.
///
/// `site_url` is the URL the preview was fetched from; `link_url` is where
/// the rendered card points. They start out equal and diverge once the
/// affiliate conversion replaces `link_url` with a deep link. Keeping both
/// avoids conflating "where the data came from" with "where the card goes".
#[derive(Debug, Clone, PartialEq)]
pub struct OgpRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub site_url: String,
    pub link_url: String,
    pub favicon_url: Option<String>,
}

impl OgpRecord {
    /// Creates an empty record for `site_url` with `link_url` initialized to
    /// the same value.
    pub fn empty(site_url: impl Into<String>) -> Self {
        let site_url = site_url.into();
        Self {
            title: None,
            description: None,
            image_url: None,
            link_url: site_url.clone(),
            site_url,
            favicon_url: None,
        }
    }
}

/// The output of rewriting one article body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedContent {
    /// The rewritten article HTML, with legacy card markup removed and
    /// placeholder elements normalized.
    pub html: String,
    /// Placeholder target URLs in document order, deduplicated.
    pub inline_card_urls: Vec<String>,
}
