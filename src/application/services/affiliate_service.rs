//! Affiliate deep-link construction.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Percent-encoding set for the `murl` redirect target: everything except
/// unreserved characters, mirroring `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds affiliate-network deep links.
///
/// Pure and total: when no network id is configured every input URL passes
/// through unchanged, so callers never branch on configuration.
#[derive(Debug, Clone)]
pub struct AffiliateService {
    network_id: Option<String>,
    click_domain: String,
}

impl AffiliateService {
    pub fn new(network_id: Option<String>, click_domain: impl Into<String>) -> Self {
        Self {
            network_id,
            click_domain: click_domain.into(),
        }
    }

    /// Constructs a tracking deep link for `original_url` and the given
    /// merchant id:
    ///
    /// `https://{click_domain}/deeplink?id={network}&mid={merchant}&murl={encoded url}`
    ///
    /// Returns `original_url` unchanged when no network id is configured.
    pub fn build_deeplink(&self, original_url: &str, merchant_id: &str) -> String {
        let Some(ref network_id) = self.network_id else {
            return original_url.to_string();
        };

        let murl = utf8_percent_encode(original_url, COMPONENT);
        format!(
            "https://{}/deeplink?id={}&mid={}&murl={}",
            self.click_domain, network_id, merchant_id, murl
        )
    }

    /// Whether `host` is the affiliate network's own click domain.
    ///
    /// Anchors already pointing there are never re-resolved, which makes
    /// rewriting idempotent under repeated passes.
    pub fn is_click_domain(&self, host: &str) -> bool {
        host.eq_ignore_ascii_case(&self.click_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AffiliateService {
        AffiliateService::new(Some("R9f1WByH5RE".to_string()), "click.linksynergy.com")
    }

    #[test]
    fn test_build_deeplink_vector() {
        let link = service().build_deeplink("https://example.com/item", "35909");
        assert_eq!(
            link,
            "https://click.linksynergy.com/deeplink?id=R9f1WByH5RE&mid=35909&murl=https%3A%2F%2Fexample.com%2Fitem"
        );
    }

    #[test]
    fn test_build_deeplink_encodes_query() {
        let link = service().build_deeplink("https://example.com/search?q=a b&x=1", "35909");
        assert!(link.ends_with("murl=https%3A%2F%2Fexample.com%2Fsearch%3Fq%3Da%20b%26x%3D1"));
    }

    #[test]
    fn test_unconfigured_network_passes_through() {
        let service = AffiliateService::new(None, "click.linksynergy.com");
        assert_eq!(
            service.build_deeplink("https://example.com/item", "35909"),
            "https://example.com/item"
        );
    }

    #[test]
    fn test_is_click_domain() {
        let service = service();
        assert!(service.is_click_domain("click.linksynergy.com"));
        assert!(service.is_click_domain("CLICK.LINKSYNERGY.COM"));
        assert!(!service.is_click_domain("example.com"));
    }
}
