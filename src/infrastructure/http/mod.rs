//! reqwest-based gateway implementations for the upstream services.

mod client;
mod commerce;
mod content;
mod merchant;
mod page;

pub use client::build_client;
pub use commerce::CommerceClient;
pub use content::ContentClient;
pub use merchant::MerchantResolver;
pub use page::PageClient;
