//! Application error type.
//!
//! Every handler returns `Result<_, AppError>`. Client failures render as
//! `{"status": "failed", "message": ...}`; server failures are logged and
//! rendered as `{"status": "error", "message": "Internal server error"}` so
//! database or I/O details never leak to the caller.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow::anyhow!(message))
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    /// Shorthand for the 400 responses that carry a fixed message.
    pub fn failed(message: &str) -> Self {
        Self::bad_request(anyhow::anyhow!(message.to_string()))
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "request failed");

            let body = Json(json!({
                "status": "error",
                "message": INTERNAL_ERROR_MESSAGE,
            }));
            return (self.status, body).into_response();
        }

        let body = Json(json!({
            "status": "failed",
            "message": self.error.to_string(),
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_client_error_renders_failed_envelope() {
        let (status, body) = body_json(AppError::failed("Invalid ID")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "failed");
        assert_eq!(body["message"], "Invalid ID");
    }

    #[tokio::test]
    async fn test_server_error_hides_cause() {
        let (status, body) =
            body_json(AppError::internal(anyhow::anyhow!("connection refused"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_conflict_status() {
        let (status, body) = body_json(AppError::conflict(anyhow::anyhow!("Duplicate data"))).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Duplicate data");
    }

    #[test]
    fn test_from_io_error_is_internal() {
        let err: AppError = std::io::Error::other("disk full").into();
        assert!(err.is_server_error());
    }

    #[test]
    fn test_unauthorized_status() {
        let err = AppError::unauthorized("Invalid token".to_string());
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), "Invalid token");
    }
}
