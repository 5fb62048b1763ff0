use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::time::Duration;

use crate::error::AppError;

/// JSON error returned by the HTTP layer:
/// `{ "error", "message", "status_code", "timestamp" }` plus `retry_after` on 429.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                error: status.canonical_reason().unwrap_or("Error").to_string(),
                message: message.into(),
                status_code: status.as_u16(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                retry_after: None,
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Rounded up to whole seconds, at least one.
    pub fn rate_limited(limit: usize, window: Duration, retry_after: Duration) -> Self {
        let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
        let mut err = Self::new(
            StatusCode::TOO_MANY_REQUESTS,
            format!("Too many requests. Limit: {} per {} seconds", limit, window.as_secs()),
        );
        err.body.error = "Rate Limit Exceeded".to_string();
        err.body.retry_after = Some(secs.max(1));
        err
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let retry_after = self.body.retry_after;
        let mut response = (self.status, Json(self.body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(msg) => Self::not_found(msg),
            AppError::Validation(msg) => Self::bad_request(msg),
            AppError::Timeout(msg) => Self::new(StatusCode::GATEWAY_TIMEOUT, msg),
            other => Self::internal(other.to_string()),
        }
    }
}
