/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers can return it directly.
 *
 * # Response Format
 *
 * JSON-style errors:
 * ```json
 * { "message": "User not found" }
 * ```
 * Text-style errors carry the bare message as `text/plain`.
 */

use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::backend::error::types::{BackendError, BodyStyle};

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let message = self.message();
        match self.body_style() {
            BodyStyle::Text => (status, message).into_response(),
            BodyStyle::Json => (status, Json(json!({ "message": message }))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::{header::CONTENT_TYPE, StatusCode};

    #[tokio::test]
    async fn test_text_response() {
        let response = BackendError::not_found_text("User not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"User not found");
    }

    #[tokio::test]
    async fn test_json_response() {
        let response = BackendError::unauthorized("Password is invalid").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "message": "Password is invalid" }));
    }

    #[tokio::test]
    async fn test_internal_response_hides_details() {
        let response = BackendError::internal("secret detail").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("secret detail"));
    }
}
