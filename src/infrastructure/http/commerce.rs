//! Commerce backend gateway implementation.
//!
//! Payloads are deserialized into explicit DTOs at the boundary and
//! converted to domain entities immediately; nothing downstream sees raw
//! JSON.

use crate::domain::entities::{Category, Maker, Product, ProductPage};
use crate::domain::gateways::{CommerceGateway, ProductQuery};
use crate::error::{map_reqwest_error, AppError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

/// reqwest-backed [`CommerceGateway`].
pub struct CommerceClient {
    http: reqwest::Client,
    base: String,
}

/// `{ count, results }` shaped list response.
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    count: u64,
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct CategoryDto {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct MakerDto {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ProductDto {
    id: i64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    category: Option<CategoryDto>,
    #[serde(default)]
    maker: Option<MakerDto>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Category {
            id: dto.id,
            name: dto.name,
        }
    }
}

impl From<MakerDto> for Maker {
    fn from(dto: MakerDto) -> Self {
        Maker {
            id: dto.id,
            name: dto.name,
        }
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Product {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            price: dto.price,
            image_url: dto.image_url,
            category: dto.category.map(Into::into),
            maker: dto.maker.map(Into::into),
            created_at: dto.created_at,
        }
    }
}

impl CommerceClient {
    pub fn new(http: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| map_reqwest_error("commerce", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(
                "Commerce backend returned an error status",
                json!({ "url": url, "status": status.as_u16() }),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::upstream(
                "Commerce backend returned malformed JSON",
                json!({ "url": url, "reason": e.to_string() }),
            )
        })
    }
}

#[async_trait]
impl CommerceGateway for CommerceClient {
    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, AppError> {
        let url = format!("{}/products/", self.base);

        let mut params = vec![
            ("page", query.page.to_string()),
            ("page_size", query.page_size.to_string()),
        ];
        if let Some(category) = query.category {
            params.push(("category", category.to_string()));
        }
        if let Some(maker) = query.maker {
            params.push(("maker", maker.to_string()));
        }
        if let Some(ref term) = query.query {
            params.push(("query", term.clone()));
        }

        let list: ListResponse<ProductDto> = self.get_json(&url, &params).await?;

        Ok(ProductPage {
            count: list.count,
            page: query.page,
            page_size: query.page_size,
            items: list.results.into_iter().map(Into::into).collect(),
        })
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, AppError> {
        let url = format!("{}/products/{}/", self.base, id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| map_reqwest_error("commerce", e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::upstream(
                "Commerce backend returned an error status",
                json!({ "url": url, "status": status.as_u16() }),
            ));
        }

        let dto: ProductDto = response.json().await.map_err(|e| {
            AppError::upstream(
                "Commerce backend returned malformed JSON",
                json!({ "url": url, "reason": e.to_string() }),
            )
        })?;

        Ok(Some(dto.into()))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let url = format!("{}/categories/", self.base);
        let list: ListResponse<CategoryDto> = self.get_json(&url, &[]).await?;
        Ok(list.results.into_iter().map(Into::into).collect())
    }

    async fn list_makers(&self) -> Result<Vec<Maker>, AppError> {
        let url = format!("{}/makers/", self.base);
        let list: ListResponse<MakerDto> = self.get_json(&url, &[]).await?;
        Ok(list.results.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_dto_maps_to_entity() {
        let dto: ProductDto = serde_json::from_value(json!({
            "id": 7,
            "name": "Mechanical Keyboard",
            "description": "Tenkeyless",
            "price": 129.0,
            "image_url": "https://cdn.example.com/kb.jpg",
            "category": { "id": 2, "name": "Keyboards" },
            "maker": { "id": 5, "name": "Acme" }
        }))
        .unwrap();

        let product: Product = dto.into();
        assert_eq!(product.id, 7);
        assert_eq!(product.category.as_ref().unwrap().name, "Keyboards");
        assert_eq!(product.maker.as_ref().unwrap().id, 5);
        assert_eq!(product.path(), "/products/7");
    }

    #[test]
    fn test_product_dto_tolerates_missing_optionals() {
        let dto: ProductDto = serde_json::from_value(json!({
            "id": 1,
            "name": "Bare"
        }))
        .unwrap();

        let product: Product = dto.into();
        assert!(product.description.is_none());
        assert!(product.category.is_none());
        assert!(product.created_at.is_none());
    }

    #[test]
    fn test_list_response_shape() {
        let list: ListResponse<CategoryDto> = serde_json::from_value(json!({
            "count": 2,
            "results": [
                { "id": 1, "name": "Keyboards" },
                { "id": 2, "name": "Mice" }
            ]
        }))
        .unwrap();

        assert_eq!(list.count, 2);
        assert_eq!(list.results.len(), 2);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = CommerceClient::new(reqwest::Client::new(), "https://api.example.com/");
        assert_eq!(client.base, "https://api.example.com");
    }
}
