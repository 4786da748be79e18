//! Health check endpoint.

use crate::domain::gateways::PostQuery;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub cache: CheckStatus,
    pub commerce: CheckStatus,
    pub content: CheckStatus,
}

#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
}

impl CheckStatus {
    fn from_ok(ok: bool) -> Self {
        Self {
            status: if ok { "ok" } else { "error" }.to_string(),
        }
    }
}

/// Returns service health status.
///
/// Upstream reachability is reported best-effort: the commerce and content
/// checks show up in the payload but do not fail the probe, since those are
/// third-party services whose transient outages already degrade per page.
/// Only an unusable cache backend turns the probe unhealthy.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: service healthy
/// - **503 Service Unavailable**: cache backend unusable
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (cache_ok, commerce, content) = tokio::join!(
        state.cache.health_check(),
        state.catalog.product_count(),
        state.blog.posts(PostQuery::page(1, 1)),
    );

    let response = HealthResponse {
        status: if cache_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            cache: CheckStatus::from_ok(cache_ok),
            commerce: CheckStatus::from_ok(commerce.is_ok()),
            content: CheckStatus::from_ok(content.is_ok()),
        },
    };

    if cache_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
