//! Application services orchestrating gateways and domain logic.

mod affiliate_service;
mod blog_service;
mod catalog_service;
mod ogp_service;
mod rewrite_service;

pub use affiliate_service::AffiliateService;
pub use blog_service::{Article, BlogService, LinkCardData};
pub use catalog_service::{CatalogService, SITEMAP_PAGE_SIZE};
pub use ogp_service::OgpService;
pub use rewrite_service::RewriteService;
