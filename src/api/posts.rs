//! Post API endpoints
//!
//! - GET /api/v1/posts - list all posts
//! - POST /api/v1/posts - create a post
//!
//! The list response is a bare JSON array: the frontend consumes the
//! response body directly as its post list.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreatePostInput, Post};

/// Request body for creating a post
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Response for a single post
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at.to_rfc3339(),
        }
    }
}

/// Build the posts router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts))
        .route("/", post(create_post))
}

/// GET /api/v1/posts - list all posts in insertion order
async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = state
        .post_service
        .list()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/posts - create a post
async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<CreatePostRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let input = CreatePostInput::new(body.title, body.content);

    let created = state
        .post_service
        .create(input)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(created))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_post_response_from_post() {
        let post = Post {
            id: 5,
            title: "T".to_string(),
            content: "C".to_string(),
            created_at: Utc::now(),
        };

        let response = PostResponse::from(post);
        assert_eq!(response.id, 5);
        assert_eq!(response.title, "T");
        assert_eq!(response.content, "C");
    }

    #[test]
    fn test_post_response_serializes_flat() {
        let response = PostResponse {
            id: 1,
            title: "T".to_string(),
            content: "C".to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "T");
        assert_eq!(json["content"], "C");
    }
}
