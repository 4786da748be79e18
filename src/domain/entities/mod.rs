//! Core domain entities.

mod merchant;
mod ogp;
mod post;
mod product;

pub use merchant::MerchantRecord;
pub use ogp::{OgpRecord, ProcessedContent};
pub use post::{Post, PostPage, Term};
pub use product::{Category, Maker, Product, ProductPage};
