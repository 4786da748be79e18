//! Cache revalidation webhook.

use crate::error::AppError;
use crate::state::AppState;
use crate::web::query::RevalidateParams;
use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};

/// Path invalidated when the caller does not name one.
const DEFAULT_REVALIDATE_PATH: &str = "/blog";

/// Drops the cached rendering of one page.
///
/// Called by the content backend when an article is published or updated,
/// so edits become visible before the cache TTL would expire. The secret
/// comparison gates the endpoint before anything else; a missing or wrong
/// secret is a 401. `path` is optional and defaults to the blog index.
///
/// # Endpoint
///
/// `POST /revalidate?secret={secret}&path={path}`
pub async fn revalidate_handler(
    State(state): State<AppState>,
    Query(params): Query<RevalidateParams>,
) -> Result<Json<Value>, AppError> {
    if params.secret.as_deref() != Some(state.revalidate_secret.as_str()) {
        return Err(AppError::unauthorized("Invalid revalidation secret", json!({})));
    }

    let path = params.path.as_deref().unwrap_or(DEFAULT_REVALIDATE_PATH);
    if !path.starts_with('/') {
        return Err(AppError::bad_request(
            "Path must be absolute",
            json!({ "path": path }),
        ));
    }

    if let Err(e) = state.cache.invalidate(path).await {
        tracing::warn!(path = %path, error = %e, "Cache invalidation failed");
    }
    tracing::info!(path = %path, "Revalidated");

    Ok(Json(json!({ "revalidated": true, "path": path })))
}
