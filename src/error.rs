//! HTTP error handling.
//!
//! Every failure of the wishlist endpoints is answered with status 400 and
//! `{"success": false, "message": ...}`. The variants only matter for logs.

use crate::wishlist::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// API-specific error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// No `Authorization` header
    #[error("Please login to continue")]
    MissingToken,

    /// Header present but the token is unusable
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token subject has no user document
    #[error("User not found")]
    UserNotFound,

    /// Request body missing or malformed
    #[error("{0}")]
    InvalidBody(String),

    /// Store layer error
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::InvalidToken(_) => "invalid_token",
            Self::UserNotFound => "user_not_found",
            Self::InvalidBody(_) => "invalid_body",
            Self::Store(err) => err.kind(),
        }
    }
}

/// Error envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        warn!(kind = self.kind(), error = %message, "Request rejected");

        let body = ErrorResponse {
            success: false,
            message,
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
