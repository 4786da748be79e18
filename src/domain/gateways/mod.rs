//! Gateway traits between the application layer and upstream services.
//!
//! Every external I/O boundary is a trait so services can be unit-tested
//! with `mockall` mocks and so transport details stay in the
//! infrastructure layer.

mod commerce;
mod content;
mod merchant;
mod page;

pub use commerce::{CommerceGateway, ProductQuery};
pub use content::{ContentGateway, PostQuery};
pub use merchant::MerchantGateway;
pub use page::PageFetcher;

#[cfg(test)]
pub use commerce::MockCommerceGateway;
#[cfg(test)]
pub use content::MockContentGateway;
#[cfg(test)]
pub use merchant::MockMerchantGateway;
#[cfg(test)]
pub use page::MockPageFetcher;
