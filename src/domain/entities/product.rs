//! Catalog entities: products, categories, makers.

use chrono::{DateTime, Utc};

/// A product from the commerce backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<Category>,
    pub maker: Option<Maker>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Site-relative path to the product detail page.
    pub fn path(&self) -> String {
        format!("/products/{}", self.id)
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A product maker (brand).
#[derive(Debug, Clone, PartialEq)]
pub struct Maker {
    pub id: i64,
    pub name: String,
}

/// One page of a paginated product listing.
#[derive(Debug, Clone)]
pub struct ProductPage {
    /// Total result count reported by the backend.
    pub count: u64,
    pub page: u32,
    pub page_size: u32,
    pub items: Vec<Product>,
}

impl ProductPage {
    /// Number of pages needed for `count` items at the current page size.
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.count.div_ceil(self.page_size as u64) as u32
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}
