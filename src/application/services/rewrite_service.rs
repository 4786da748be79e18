//! Article-body link rewriting.
//!
//! Rewriting happens in two passes. The first pass scans the HTML read-only
//! and collects every external anchor host plus every link-card placeholder
//! target. Merchant resolution then runs concurrently over the unique hosts,
//! bounded by a per-lookup timeout. The second pass streams the HTML through
//! a rewriter that swaps resolved anchors for deep links, strips legacy card
//! markup, and normalizes placeholders.
//!
//! Every failure path degrades: a resolver error or timeout leaves the
//! affected anchors untouched, and a rewrite failure returns the original
//! HTML. Rewriting never fails a page render.

use crate::application::services::AffiliateService;
use crate::domain::entities::ProcessedContent;
use crate::domain::gateways::MerchantGateway;
use crate::infrastructure::cache::PageCache;
use lol_html::{element, HtmlRewriter, Settings};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use url::Url;

/// Legacy card markup produced by earlier renderings of the same articles.
/// Matching elements are removed wholesale, inner anchors included.
const LEGACY_CARD_SELECTOR: &str = "div.blogcard, div.blog-card, div.linkcard";

/// Placeholder targets sometimes hold a full anchor tag instead of a bare
/// URL; the actual target is the nested `href` value.
static NESTED_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href\s*=\s*"([^"]+)""#).unwrap());

/// Memoized merchant lookups live under this cache prefix. An empty value
/// records a confirmed "no affiliate program" answer.
const MERCHANT_CACHE_PREFIX: &str = "merchant:";

/// Rewrites article HTML, converting external links into affiliate deep
/// links where a merchant program exists.
pub struct RewriteService<M: MerchantGateway> {
    merchants: Arc<M>,
    affiliate: AffiliateService,
    cache: Arc<dyn PageCache>,
    lookup_timeout: Duration,
}

/// Read-only scan results from the first pass.
struct Scan {
    /// Unique external anchor hosts, excluding the affiliate click domain.
    hosts: Vec<String>,
    /// Placeholder target URLs in document order, deduplicated.
    card_urls: Vec<String>,
}

/// Pulls the real target URL out of a placeholder's `data-original-href`.
///
/// Some upstream editors store an entire serialized anchor in the attribute;
/// in that case the nested `href` value wins.
fn extract_target_url(raw: &str) -> String {
    if let Some(caps) = NESTED_HREF_RE.captures(raw) {
        caps[1].to_string()
    } else {
        raw.trim().to_string()
    }
}

/// Parses an href and returns its host when it is an external http(s) URL.
fn external_host(href: &str) -> Option<String> {
    let url = Url::parse(href).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.host_str().map(|h| h.to_ascii_lowercase())
}

impl<M: MerchantGateway> RewriteService<M> {
    pub fn new(
        merchants: Arc<M>,
        affiliate: AffiliateService,
        cache: Arc<dyn PageCache>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            merchants,
            affiliate,
            cache,
            lookup_timeout,
        }
    }

    /// Rewrites one article body.
    ///
    /// Infallible by design: any upstream or parser failure degrades to the
    /// least-modified output that still renders.
    pub async fn process(&self, html: &str) -> ProcessedContent {
        let scan = self.scan(html);
        let merchants = self.resolve_all(&scan.hosts).await;

        let rewritten = match self.rewrite(html, &merchants) {
            Ok(out) => out,
            Err(e) => {
                tracing::error!(error = %e, "HTML rewrite failed, serving original content");
                html.to_string()
            }
        };

        ProcessedContent {
            html: rewritten,
            inline_card_urls: scan.card_urls,
        }
    }

    /// Resolves a single URL to its affiliate deep link, if the host has a
    /// known merchant program. Used for card link conversion.
    pub async fn deeplink_for(&self, url: &str) -> Option<String> {
        let host = external_host(url)?;
        if self.affiliate.is_click_domain(&host) {
            return None;
        }
        let merchant_id = self.resolve_merchant(&host).await?;
        Some(self.affiliate.build_deeplink(url, &merchant_id))
    }

    /// First pass: read-only scan for anchor hosts and placeholder targets.
    fn scan(&self, html: &str) -> Scan {
        let fragment = Html::parse_fragment(html);

        let anchor_sel = Selector::parse("a[href]").unwrap();
        let placeholder_sel = Selector::parse("[data-link-card-placeholder]").unwrap();

        let mut hosts = Vec::new();
        let mut seen_hosts = HashSet::new();
        for anchor in fragment.select(&anchor_sel) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Some(host) = external_host(href) else {
                continue;
            };
            if self.affiliate.is_click_domain(&host) {
                continue;
            }
            if seen_hosts.insert(host.clone()) {
                hosts.push(host);
            }
        }

        let mut card_urls = Vec::new();
        let mut seen_urls = HashSet::new();
        for placeholder in fragment.select(&placeholder_sel) {
            let Some(raw) = placeholder.value().attr("data-original-href") else {
                continue;
            };
            let target = extract_target_url(raw);
            if target.is_empty() {
                continue;
            }
            if seen_urls.insert(target.clone()) {
                card_urls.push(target);
            }
        }

        Scan { hosts, card_urls }
    }

    /// Resolves all scanned hosts concurrently.
    ///
    /// The resulting map only contains hosts with a usable merchant id;
    /// anchors whose host is absent pass through unmodified.
    async fn resolve_all(&self, hosts: &[String]) -> HashMap<String, String> {
        let lookups = hosts.iter().map(|host| async move {
            let merchant_id = self.resolve_merchant(host).await?;
            Some((host.clone(), merchant_id))
        });

        futures::future::join_all(lookups)
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Resolves one host to its merchant id, memoizing through the cache.
    ///
    /// A cached empty string means "resolved, no program": the negative
    /// answer is remembered so repeated renders of the same article do not
    /// re-query the affiliate API. Errors and timeouts are not cached.
    async fn resolve_merchant(&self, host: &str) -> Option<String> {
        let cache_key = format!("{MERCHANT_CACHE_PREFIX}{host}");

        if let Ok(Some(cached)) = self.cache.get(&cache_key).await {
            return if cached.is_empty() { None } else { Some(cached) };
        }

        let resolved = tokio::time::timeout(self.lookup_timeout, self.merchants.resolve(host)).await;

        match resolved {
            Ok(Ok(record)) => {
                let merchant_id = record.and_then(|r| r.merchant_id);
                let value = merchant_id.as_deref().unwrap_or("");
                if let Err(e) = self.cache.set(&cache_key, value, None).await {
                    tracing::warn!(host = %host, error = %e, "Failed to cache merchant lookup");
                }
                merchant_id
            }
            Ok(Err(e)) => {
                tracing::warn!(host = %host, error = %e, "Merchant resolution failed");
                None
            }
            Err(_) => {
                tracing::warn!(host = %host, timeout = ?self.lookup_timeout, "Merchant resolution timed out");
                None
            }
        }
    }

    /// Second pass: streaming rewrite.
    fn rewrite(
        &self,
        html: &str,
        merchants: &HashMap<String, String>,
    ) -> Result<String, lol_html::errors::RewritingError> {
        let mut output = Vec::new();

        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![
                    element!(LEGACY_CARD_SELECTOR, |el| {
                        el.remove();
                        Ok(())
                    }),
                    element!("[data-link-card-placeholder]", |el| {
                        if let Some(raw) = el.get_attribute("data-original-href") {
                            let target = extract_target_url(&raw);
                            if !target.is_empty() {
                                el.set_attribute("data-resolved-href", &target)?;
                            }
                            el.remove_attribute("data-original-href");
                        }
                        Ok(())
                    }),
                    element!("a[href]", |el| {
                        let Some(href) = el.get_attribute("href") else {
                            return Ok(());
                        };
                        if let Some(host) = external_host(&href)
                            && let Some(merchant_id) = merchants.get(&host)
                        {
                            let deeplink = self.affiliate.build_deeplink(&href, merchant_id);
                            el.set_attribute("href", &deeplink)?;
                            el.set_attribute("target", "_blank")?;
                            el.set_attribute("rel", "nofollow noreferrer")?;
                        }
                        Ok(())
                    }),
                ],
                ..Settings::default()
            },
            |chunk: &[u8]| output.extend_from_slice(chunk),
        );

        rewriter.write(html.as_bytes())?;
        rewriter.end()?;

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}
