//! Shared application state injected into all handlers.

use crate::application::services::{
    AffiliateService, BlogService, CatalogService, OgpService, RewriteService,
};
use crate::config::Config;
use crate::infrastructure::cache::{MemoryCache, NullCache, PageCache};
use crate::infrastructure::http::{
    build_client, CommerceClient, ContentClient, MerchantResolver, PageClient,
};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

/// Catalog service wired to the production gateways.
pub type Catalog = CatalogService<CommerceClient>;
/// Blog service wired to the production gateways.
pub type Blog = BlogService<ContentClient, MerchantResolver, PageClient>;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub blog: Arc<Blog>,
    pub cache: Arc<dyn PageCache>,
    /// Public base URL used for absolute links in feeds and sitemaps.
    pub site_base_url: String,
    /// Shared secret accepted by the revalidation webhook.
    pub revalidate_secret: String,
}

impl AppState {
    /// Wires all services from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the shared HTTP client fails to build.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = build_client(config.fetch_timeout_seconds)?;

        let cache: Arc<dyn PageCache> = if config.cache_enabled {
            Arc::new(MemoryCache::new(config.cache_ttl_seconds))
        } else {
            Arc::new(NullCache::new())
        };

        let affiliate = AffiliateService::new(
            config.affiliate_network_id.clone(),
            config.affiliate_click_domain.clone(),
        );

        let merchants = Arc::new(MerchantResolver::new(
            http.clone(),
            &config.affiliate_api_base,
        ));
        let rewriter = Arc::new(RewriteService::new(
            merchants,
            affiliate,
            cache.clone(),
            Duration::from_secs(config.fetch_timeout_seconds),
        ));
        let ogp = Arc::new(OgpService::new(Arc::new(PageClient::new(http.clone()))));

        let catalog = Arc::new(CatalogService::new(Arc::new(CommerceClient::new(
            http.clone(),
            &config.commerce_api_base,
        ))));
        let blog = Arc::new(BlogService::new(
            Arc::new(ContentClient::new(http, &config.content_api_base)),
            rewriter,
            ogp,
        ));

        Ok(Self {
            catalog,
            blog,
            cache,
            site_base_url: config.site_base_url.trim_end_matches('/').to_string(),
            revalidate_secret: config.revalidate_secret.clone(),
        })
    }
}
