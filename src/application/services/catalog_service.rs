//! Catalog browsing over the commerce gateway.

use crate::domain::entities::{Category, Maker, Product, ProductPage};
use crate::domain::gateways::{CommerceGateway, ProductQuery};
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Products per product sub-sitemap.
pub const SITEMAP_PAGE_SIZE: u32 = 1000;

/// Read-side catalog operations backing the storefront pages and feeds.
pub struct CatalogService<G: CommerceGateway> {
    commerce: Arc<G>,
}

impl<G: CommerceGateway> CatalogService<G> {
    pub fn new(commerce: Arc<G>) -> Self {
        Self { commerce }
    }

    /// Most recently added products, newest first. Used by the front page
    /// and the RSS feed.
    pub async fn recent_products(&self, limit: u32) -> Result<Vec<Product>, AppError> {
        let page = self
            .commerce
            .list_products(ProductQuery::page(1, limit))
            .await?;
        Ok(page.items)
    }

    /// One page of the product listing, with optional filters and search.
    pub async fn products(&self, query: ProductQuery) -> Result<ProductPage, AppError> {
        self.commerce.list_products(query).await
    }

    /// A single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the backend has no such product.
    pub async fn product(&self, id: i64) -> Result<Product, AppError> {
        self.commerce
            .get_product(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found", json!({ "id": id })))
    }

    pub async fn categories(&self) -> Result<Vec<Category>, AppError> {
        self.commerce.list_categories().await
    }

    pub async fn makers(&self) -> Result<Vec<Maker>, AppError> {
        self.commerce.list_makers().await
    }

    /// Total number of products in the catalog.
    ///
    /// The sitemap index derives its sub-sitemap count from this, so a
    /// single-item listing request is enough.
    pub async fn product_count(&self) -> Result<u64, AppError> {
        let page = self.commerce.list_products(ProductQuery::page(1, 1)).await?;
        Ok(page.count)
    }

    /// The `n`-th (1-based) chunk of products for a product sub-sitemap.
    pub async fn sitemap_chunk(&self, n: u32) -> Result<Vec<Product>, AppError> {
        let page = self
            .commerce
            .list_products(ProductQuery::page(n, SITEMAP_PAGE_SIZE))
            .await?;
        Ok(page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::MockCommerceGateway;
    use mockall::predicate::eq;

    fn product(id: i64) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            description: None,
            price: Some(9.99),
            image_url: None,
            category: None,
            maker: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_product_found() {
        let mut commerce = MockCommerceGateway::new();
        commerce
            .expect_get_product()
            .with(eq(7))
            .returning(|id| Ok(Some(product(id))));

        let found = CatalogService::new(Arc::new(commerce)).product(7).await;
        assert_eq!(found.unwrap().id, 7);
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let mut commerce = MockCommerceGateway::new();
        commerce.expect_get_product().returning(|_| Ok(None));

        let result = CatalogService::new(Arc::new(commerce)).product(999).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_product_count_uses_single_item_page() {
        let mut commerce = MockCommerceGateway::new();
        commerce
            .expect_list_products()
            .with(eq(ProductQuery::page(1, 1)))
            .returning(|_| {
                Ok(ProductPage {
                    count: 2500,
                    page: 1,
                    page_size: 1,
                    items: vec![product(1)],
                })
            });

        let count = CatalogService::new(Arc::new(commerce))
            .product_count()
            .await
            .unwrap();
        assert_eq!(count, 2500);
    }

    #[tokio::test]
    async fn test_sitemap_chunk_requests_fixed_page_size() {
        let mut commerce = MockCommerceGateway::new();
        commerce
            .expect_list_products()
            .with(eq(ProductQuery::page(3, SITEMAP_PAGE_SIZE)))
            .returning(|_| {
                Ok(ProductPage {
                    count: 2500,
                    page: 3,
                    page_size: SITEMAP_PAGE_SIZE,
                    items: vec![product(2001)],
                })
            });

        let chunk = CatalogService::new(Arc::new(commerce))
            .sitemap_chunk(3)
            .await
            .unwrap();
        assert_eq!(chunk.len(), 1);
    }
}
