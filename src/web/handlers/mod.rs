//! Request handlers for the storefront pages, feeds, and webhooks.

mod blog;
mod categories;
mod feeds;
mod health;
mod home;
mod makers;
mod products;
mod revalidate;
mod search;

pub use blog::{blog_handler, post_handler};
pub use categories::{categories_handler, category_handler};
pub use feeds::{feed_handler, product_sitemap_handler, sitemap_index_handler};
pub use health::health_handler;
pub use home::home_handler;
pub use makers::{maker_handler, makers_handler};
pub use products::{product_handler, products_handler, ProductListTemplate};
pub use revalidate::revalidate_handler;
pub use search::search_handler;
