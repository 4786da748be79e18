//! Application error type shared across layers.
//!
//! Error taxonomy (see also the handler modules):
//!
//! - `NotFound` - a page's primary entity (product, post, category) does not
//!   exist upstream; rendered as a 404 page
//! - `Upstream` - the commerce/content/affiliate backend was unreachable or
//!   returned a malformed response; callers decide whether to degrade to an
//!   empty result or surface a 502 page
//! - `Validation` - bad request input (query parameters, webhook secret)
//! - `Internal` - everything else
//!
//! Failures in per-link or per-card processing never become an `AppError` at
//! the page level; they are logged and isolated inside the services.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    Upstream { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn upstream(message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Template for the error page.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    status: u16,
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, details) = match &self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Unauthorized { message, details }
            | AppError::Upstream { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, %details, "request failed");
        } else {
            tracing::debug!(%status, %message, %details, "request rejected");
        }

        let page = ErrorTemplate {
            status: status.as_u16(),
            message: &message,
        };

        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, message).into_response(),
        }
    }
}

/// Maps a reqwest transport error to an [`AppError::Upstream`].
pub fn map_reqwest_error(context: &str, e: reqwest::Error) -> AppError {
    AppError::upstream(
        format!("{context} request failed"),
        serde_json::json!({ "reason": e.to_string(), "timeout": e.is_timeout() }),
    )
}
