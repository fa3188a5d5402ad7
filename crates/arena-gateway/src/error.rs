//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use arena_core::ValidationError;

/// Everything a handler can fail with before results exist.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself is bad. Nothing was dispatched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The body could not be taken as sent (too large, wrong framing).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: e.to_string(),
                    details: None,
                },
            ),
            ApiError::Rejected { status, message } => (
                status,
                ErrorBody {
                    error: message,
                    details: None,
                },
            ),
            ApiError::Internal(details) => {
                error!(details = %details, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Internal server error".into(),
                        details: Some(details),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
