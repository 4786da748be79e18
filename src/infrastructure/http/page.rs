//! Raw page fetching for OGP extraction.

use crate::domain::gateways::PageFetcher;
use crate::error::{map_reqwest_error, AppError};
use async_trait::async_trait;
use serde_json::json;

/// Maximum response body size (1MB). Preview extraction only needs the
/// document head; anything larger is abandoned.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// reqwest-backed [`PageFetcher`].
///
/// Returns the body as raw bytes so the caller controls charset handling.
pub struct PageClient {
    http: reqwest::Client,
}

impl PageClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PageFetcher for PageClient {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error("page fetch", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(
                "Page fetch returned an error status",
                json!({ "url": url, "status": status.as_u16() }),
            ));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
            return Err(AppError::upstream(
                "Page is not HTML",
                json!({ "url": url, "content_type": content_type }),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error("page fetch", e))?;

        if bytes.len() > MAX_BODY_SIZE {
            return Err(AppError::upstream(
                "Page body too large",
                json!({ "url": url, "size": bytes.len() }),
            ));
        }

        Ok(bytes.to_vec())
    }
}
