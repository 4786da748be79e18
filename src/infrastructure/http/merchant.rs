//! Merchant-resolution gateway implementation.

use crate::domain::entities::MerchantRecord;
use crate::domain::gateways::MerchantGateway;
use crate::error::{map_reqwest_error, AppError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// reqwest-backed [`MerchantGateway`].
///
/// One HTTP lookup per call; no caching here. The rewrite service memoizes
/// lookups per domain through the page cache.
pub struct MerchantResolver {
    http: reqwest::Client,
    base: String,
}

#[derive(Debug, Deserialize)]
struct MerchantDto {
    #[serde(default)]
    merchant_id: Option<String>,
    merchant_name: String,
    domain_name: String,
}

impl From<MerchantDto> for MerchantRecord {
    fn from(dto: MerchantDto) -> Self {
        MerchantRecord {
            merchant_id: dto.merchant_id,
            merchant_name: dto.merchant_name,
            domain_name: dto.domain_name,
        }
    }
}

impl MerchantResolver {
    pub fn new(http: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MerchantGateway for MerchantResolver {
    async fn resolve(&self, domain: &str) -> Result<Option<MerchantRecord>, AppError> {
        let url = format!("{}/affiliate/mid-resolve/", self.base);

        let response = self
            .http
            .get(&url)
            .query(&[("domain", domain)])
            .send()
            .await
            .map_err(|e| map_reqwest_error("merchant resolution", e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // No affiliate program known for this domain.
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::upstream(
                "Merchant resolution returned an error status",
                json!({ "domain": domain, "status": status.as_u16() }),
            ));
        }

        let dto: MerchantDto = response.json().await.map_err(|e| {
            AppError::upstream(
                "Merchant resolution returned malformed JSON",
                json!({ "domain": domain, "reason": e.to_string() }),
            )
        })?;

        Ok(Some(dto.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merchant_dto_maps_to_record() {
        let dto: MerchantDto = serde_json::from_value(json!({
            "merchant_id": "35909",
            "merchant_name": "Example Store",
            "domain_name": "example.com"
        }))
        .unwrap();

        let record: MerchantRecord = dto.into();
        assert_eq!(record.merchant_id.as_deref(), Some("35909"));
        assert_eq!(record.domain_name, "example.com");
    }

    #[test]
    fn test_merchant_dto_without_id() {
        let dto: MerchantDto = serde_json::from_value(json!({
            "merchant_name": "No Program",
            "domain_name": "noprogram.example"
        }))
        .unwrap();

        let record: MerchantRecord = dto.into();
        assert!(record.merchant_id.is_none());
    }
}
