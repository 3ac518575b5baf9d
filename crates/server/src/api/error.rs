//! JSON error responses for API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cinedex_core::QueryError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Error body returned for every failed API request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    pub path: String,
}

/// Handler error carrying the status, a client-safe message and the
/// request path.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    path: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, path)
    }

    pub fn not_found(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, path)
    }

    /// Map a query failure to its response.
    ///
    /// Upstream and internal causes are logged here and never sent to the
    /// client.
    pub fn from_query(err: QueryError, path: &str) -> Self {
        match err {
            QueryError::Validation(message) => Self::bad_request(message, path),
            QueryError::NotFound(message) => Self::not_found(message, path),
            QueryError::Upstream { message, source } => {
                error!(path, error = %source, "{}", message);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, path)
            }
            QueryError::Internal(message) => {
                error!(path, error = %message, "Internal error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    path,
                )
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: self.status.as_u16(),
            message: self.message,
            path: self.path,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedex_core::StoreError;

    #[test]
    fn test_validation_is_bad_request() {
        let err = ApiError::from_query(
            QueryError::Validation("size must be > 0".to_string()),
            "/api/v1/movies",
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "size must be > 0");
    }

    #[test]
    fn test_not_found() {
        let err = ApiError::from_query(
            QueryError::NotFound("No movies found".to_string()),
            "/api/v1/movies/year/2022",
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upstream_hides_cause() {
        let err = ApiError::from_query(
            QueryError::upstream(
                "Failed to fetch movies",
                StoreError::Database("no such table: movies".to_string()),
            ),
            "/api/v1/movies",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Failed to fetch movies");
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err = ApiError::from_query(
            QueryError::Internal("catalog task panicked".to_string()),
            "/api/v1/movies/7",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Internal server error");
    }
}
