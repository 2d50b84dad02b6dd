//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shopfront_commerce::CommerceError;
use shopfront_rules::RulesError;
use thiserror::Error;
use tracing::{debug, error};

/// Errors returned by request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Commerce(CommerceError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    /// Request body could not be decoded; `code` is the error reported for it.
    #[error("malformed request body: {detail}")]
    Malformed { code: &'static str, detail: String },

    #[error("internal error: {0}")]
    Internal(String),
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl From<CommerceError> for ApiError {
    fn from(err: CommerceError) -> Self {
        match err {
            CommerceError::Overflow => ApiError::Internal(err.to_string()),
            other => ApiError::Commerce(other),
        }
    }
}

impl ApiError {
    pub fn malformed(code: &'static str, detail: impl Into<String>) -> Self {
        ApiError::Malformed {
            code,
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Commerce(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Commerce(_) | ApiError::Rules(_) | ApiError::Malformed { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Commerce(err) => err.code(),
            ApiError::Rules(err) => err.code(),
            ApiError::Malformed { code, .. } => *code,
            ApiError::Internal(_) => "server_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            debug!(error = %self, code = self.code(), "request rejected");
        }
        (status, Json(ErrorBody { error: self.code() })).into_response()
    }
}
