//! HTTP error mapping.
//!
//! DESIGN
//! ======
//! Every service error implements [`ErrorCode`]: a grepable code and a
//! retryable flag. Routes convert service errors into [`ApiError`], which
//! renders as `{ "error", "code", "retryable" }` with the matching status.
//! Server-side failures are logged here and reported with a generic message
//! so database detail never reaches the caller.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use models::ErrorBody;

use crate::llm::types::LlmError;
use crate::rate_limit::RateLimitError;
use crate::services::ai::AiError;
use crate::services::auth::AuthError;
use crate::services::store::StoreError;

/// Grepable error code and retryable flag for structured error responses.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Error response produced by every API handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl ApiError {
    /// Wrap a coded error. 5xx statuses other than 502/503 hide the message.
    pub fn from_code(status: StatusCode, err: &impl ErrorCode) -> Self {
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = err.error_code(), error = %err, "request failed");
            "internal server error".to_owned()
        } else {
            err.to_string()
        };
        Self { status, code: err.error_code(), message, retryable: err.retryable() }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, code: "E_INVALID_INPUT", message: message.into(), retryable: false }
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "E_UNAUTHENTICATED",
            message: "authentication required".to_owned(),
            retryable: false,
        }
    }

    /// Log an internal failure and return an opaque 500.
    pub fn internal(err: &impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "internal error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "E_INTERNAL",
            message: "internal server error".to_owned(),
            retryable: false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.message, code: self.code.to_owned(), retryable: self.retryable };
        (self.status, Json(body)).into_response()
    }
}

// =============================================================================
// EXTRACTOR REJECTIONS
// =============================================================================

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

// =============================================================================
// SERVICE ERROR MAPPING
// =============================================================================

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match &err {
            StoreError::Invalid(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::from_code(status, &err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::Invalid(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::Hashing(_) => return Self::internal(&err),
            AuthError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::from_code(status, &err)
    }
}

impl From<RateLimitError> for ApiError {
    fn from(err: RateLimitError) -> Self {
        tracing::warn!(error = %err, "rate limit tripped");
        Self::from_code(StatusCode::TOO_MANY_REQUESTS, &err)
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        tracing::error!(error = %err, "llm call failed");
        let mut api = Self::from_code(StatusCode::BAD_GATEWAY, &err);
        api.message = "AI service request failed".to_owned();
        api
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Store(inner) => inner.into(),
            AiError::RateLimited(inner) => inner.into(),
            AiError::Llm(inner) => inner.into(),
            AiError::Invalid(_) => Self::from_code(StatusCode::BAD_REQUEST, &err),
            AiError::NotConfigured => Self::from_code(StatusCode::SERVICE_UNAVAILABLE, &err),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
