//! Wire types for the API client
//!
//! These mirror the backend's response shapes but only the fields the
//! frontend consumes; unknown fields are ignored on deserialization.

use serde::{Deserialize, Serialize};

/// A user as the frontend sees one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// A post as the frontend sees one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Answer to `GET /logged_in`
#[derive(Debug, Clone, Deserialize)]
pub struct LoggedInStatus {
    pub logged_in: bool,
    #[serde(default)]
    pub user: Option<User>,
}

/// Answer to `/login` and `/signup`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthPayload {
    #[allow(dead_code)]
    pub logged_in: bool,
    pub user: User,
}

/// The backend's error envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[allow(dead_code)]
    pub code: String,
    pub message: String,
}
