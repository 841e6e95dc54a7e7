//! API middleware and shared HTTP plumbing
//!
//! Contains the application state, the JSON error envelope, and session
//! token extraction from incoming requests.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::SessionConfig;
use crate::services::{PostService, UserService};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub post_service: Arc<PostService>,
    pub session: Arc<SessionConfig>,
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "CONFLICT" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

/// Extract the session token from a request
///
/// Checks the `Authorization: Bearer` header first, then the session
/// cookie named by the configuration.
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    let prefix = format!("{}=", cookie_name);
    if let Some(cookie_header) = headers.get(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(token) = cookie.strip_prefix(prefix.as_str()) {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const COOKIE_NAME: &str = "_minipost_session";

    fn headers_with_bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_extract_token_from_bearer() {
        let headers = headers_with_bearer("token-123");
        assert_eq!(
            extract_session_token(&headers, COOKIE_NAME),
            Some("token-123".to_string())
        );
    }

    #[test]
    fn test_extract_token_from_cookie() {
        let headers = headers_with_cookie("_minipost_session=token-456");
        assert_eq!(
            extract_session_token(&headers, COOKIE_NAME),
            Some("token-456".to_string())
        );
    }

    #[test]
    fn test_extract_token_among_other_cookies() {
        let headers =
            headers_with_cookie("theme=dark; _minipost_session=token-789; lang=en");
        assert_eq!(
            extract_session_token(&headers, COOKIE_NAME),
            Some("token-789".to_string())
        );
    }

    #[test]
    fn test_bearer_takes_priority_over_cookie() {
        let mut headers = headers_with_bearer("bearer-token");
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("_minipost_session=cookie-token"),
        );
        assert_eq!(
            extract_session_token(&headers, COOKIE_NAME),
            Some("bearer-token".to_string())
        );
    }

    #[test]
    fn test_extract_token_respects_cookie_name() {
        let headers = headers_with_cookie("session=token-456");
        assert!(extract_session_token(&headers, COOKIE_NAME).is_none());
    }

    #[test]
    fn test_extract_token_none() {
        let headers = HeaderMap::new();
        assert!(extract_session_token(&headers, COOKIE_NAME).is_none());
    }

    #[test]
    fn test_extract_token_ignores_basic_auth() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(extract_session_token(&headers, COOKIE_NAME).is_none());
    }

    #[test]
    fn test_api_error_status_mapping() {
        let cases = [
            (ApiError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (ApiError::not_found("x"), StatusCode::NOT_FOUND),
            (ApiError::validation_error("x"), StatusCode::BAD_REQUEST),
            (ApiError::conflict("x"), StatusCode::CONFLICT),
            (ApiError::internal_error("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_api_error_envelope_shape() {
        let error = ApiError::validation_error("Title is required");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["message"], "Title is required");
        assert!(json["error"].get("details").is_none());
    }
}
