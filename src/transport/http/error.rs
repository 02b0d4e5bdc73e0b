use crate::app::trivia_service::TriviaError;
use crate::transport::http::types::ErrorResponse;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

/// Errors surfaced to HTTP clients. The detail string is logged, the client
/// only sees the status code and a fixed message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "Bad request",
            ApiError::NotFound(_) => "Not found",
            ApiError::MethodNotAllowed(_) => "Method not allowed",
            ApiError::Unprocessable(_) => "Unprocessable",
            ApiError::Internal(_) => "Internal server error",
        }
    }

    /// Wraps a body that failed to parse as JSON of the expected shape.
    pub fn unprocessable_json(err: JsonRejection, expected: &str) -> Self {
        ApiError::Unprocessable(format!("Invalid JSON body: {} (expected: {})", err, expected))
    }
}

impl From<TriviaError> for ApiError {
    fn from(err: TriviaError) -> Self {
        match err {
            TriviaError::NotFound(msg) => ApiError::NotFound(msg),
            TriviaError::InvalidCategory(msg) | TriviaError::Unprocessable(msg) => {
                ApiError::Unprocessable(msg)
            }
            TriviaError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(http.status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(http.status = status.as_u16(), error = %self, "request rejected");
        }

        let body = Json(ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: self.message().to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
