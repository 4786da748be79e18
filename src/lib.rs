//! # Storefront
//!
//! A server-rendered e-commerce storefront with an affiliate blog front-end.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities and gateway traits
//! - **Application Layer** ([`application`]) - Link rewriting, card assembly,
//!   catalog and blog orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP gateways and caching
//! - **Web Layer** ([`web`]) - Axum handlers and Askama templates
//!
//! ## Features
//!
//! - Affiliate deep-link rewriting of article bodies
//! - Inline link cards built from Open Graph metadata
//! - Product catalog pages backed by a commerce REST API
//! - Blog pages backed by a WordPress-style REST API
//! - RSS feed and chunked product sitemaps
//! - Rendered-page caching with a revalidation webhook
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export COMMERCE_API_BASE="https://api.example.com"
//! export CONTENT_API_BASE="https://cms.example.com/wp-json/wp/v2"
//! export AFFILIATE_API_BASE="https://api.example.com"
//! export REVALIDATE_SECRET="change-me"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AffiliateService, BlogService, CatalogService, OgpService, RewriteService,
    };
    pub use crate::domain::entities::{OgpRecord, Post, Product, ProcessedContent};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
