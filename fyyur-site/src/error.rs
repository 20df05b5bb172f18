//! Error types for fyyur-site
//!
//! Every failure leaves the store as it was and answers with one JSON body
//! carrying both a machine-readable error and the user-visible notice.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fyyur_common::Error;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::notice::Notice;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A lifecycle operation failed; `notice` is what the visitor sees
    #[error("{notice}")]
    Lifecycle {
        notice: String,
        #[source]
        source: Error,
    },

    /// fyyur-common error
    #[error("{0}")]
    Common(#[from] Error),
}

impl ApiError {
    fn status_and_code(err: &Error) -> (StatusCode, &'static str) {
        match err {
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            Error::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PERSISTENCE_FAILED"),
            Error::Io(_) | Error::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, notice) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), msg),
            ApiError::Lifecycle { notice, source } => {
                let (status, code) = Self::status_and_code(&source);
                (status, code, source.to_string(), notice)
            }
            ApiError::Common(err) => {
                let (status, code) = Self::status_and_code(&err);
                let msg = err.to_string();
                (status, code, msg.clone(), msg)
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            },
            "notice": Notice::error(notice),
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Attach the user-visible failure notice to a lifecycle step
pub trait NoticeExt<T> {
    fn or_notice(self, notice: impl Into<String>) -> ApiResult<T>;
}

impl<T> NoticeExt<T> for fyyur_common::Result<T> {
    fn or_notice(self, notice: impl Into<String>) -> ApiResult<T> {
        self.map_err(|source| {
            let notice = notice.into();
            warn!("{} ({})", notice, source);
            ApiError::Lifecycle { notice, source }
        })
    }
}
