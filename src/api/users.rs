//! User API endpoints
//!
//! - GET /users - list users
//! - GET /users/{id} - get a single user
//! - POST /users - create a user record (unlike /signup, no session is
//!   started)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::api::auth::UserResponse;
use crate::api::middleware::{ApiError, AppState};
use crate::models::SignupInput;
use crate::services::user::UserServiceError;

/// Request body for creating a user
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Build the users router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user))
        .route("/{id}", get(get_user))
}

/// GET /users - list users in insertion order
async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state
        .user_service
        .list_users()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// GET /users/{id} - get a single user
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;

    Ok(Json(user.into()))
}

/// POST /users - create a user record
async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let input = SignupInput::new(body.username, body.email, body.password);

    let user = state.user_service.signup(input).await.map_err(|e| match e {
        UserServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        UserServiceError::UserExists(msg) => ApiError::conflict(msg),
        _ => ApiError::internal_error(e.to_string()),
    })?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
