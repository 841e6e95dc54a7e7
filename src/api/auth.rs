//! Authentication API endpoints
//!
//! Handles HTTP requests for session-backed authentication:
//! - POST /signup - create an account and log it in
//! - POST /login - user login
//! - POST /logout - user logout (idempotent)
//! - GET /logged_in - login status check for the frontend

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{extract_session_token, ApiError, AppState};
use crate::config::SessionConfig;
use crate::models::{Session, SignupInput, User};
use crate::services::user::UserServiceError;
use crate::services::LoginInput;

/// Request body for user signup
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

/// Response for successful authentication
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub logged_in: bool,
    pub user: UserResponse,
}

/// Response for the login status check
#[derive(Debug, Serialize)]
pub struct LoggedInResponse {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

/// Response for user info
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Build the auth router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/logged_in", get(logged_in))
}

/// POST /signup - create an account
///
/// On success the new user is logged in immediately: a session is created
/// and set as a cookie, exactly as if `/login` had been called.
async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let password = body.password.clone();
    let input = SignupInput::new(body.username, body.email, body.password);

    let user = state.user_service.signup(input).await.map_err(|e| match e {
        UserServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        UserServiceError::UserExists(msg) => ApiError::conflict(msg),
        _ => ApiError::internal_error(e.to_string()),
    })?;

    // Create a session for the new user
    let session = state
        .user_service
        .login(LoginInput::new(&user.username, &password))
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    let headers = set_cookie_headers(&state.session, &session)?;

    Ok((
        StatusCode::CREATED,
        headers,
        Json(AuthResponse {
            logged_in: true,
            user: user.into(),
        }),
    ))
}

/// POST /login - user login
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = LoginInput::new(body.username_or_email, body.password);

    let session = state.user_service.login(input).await.map_err(|e| match e {
        UserServiceError::AuthenticationError(_) => {
            ApiError::unauthorized("Invalid username or password")
        }
        _ => ApiError::internal_error("Login failed"),
    })?;

    let user = state
        .user_service
        .validate_session(&session.id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::internal_error("Session validation failed"))?;

    let headers = set_cookie_headers(&state.session, &session)?;

    Ok((
        headers,
        Json(AuthResponse {
            logged_in: true,
            user: user.into(),
        }),
    ))
}

/// POST /logout - user logout
///
/// Idempotent: a missing or already-invalid session still yields 204 and
/// a cleared cookie.
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = extract_session_token(&headers, &state.session.cookie_name) {
        state
            .user_service
            .logout(&token)
            .await
            .map_err(|e| ApiError::internal_error(e.to_string()))?;
    }

    let headers = clear_cookie_headers(&state.session)?;

    Ok((StatusCode::NO_CONTENT, headers))
}

/// GET /logged_in - login status check
///
/// Never fails for an absent, invalid, or expired session; those all
/// produce the logged-out answer.
async fn logged_in(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LoggedInResponse>, ApiError> {
    let user = match extract_session_token(&headers, &state.session.cookie_name) {
        Some(token) => state
            .user_service
            .validate_session(&token)
            .await
            .map_err(|e| ApiError::internal_error(e.to_string()))?,
        None => None,
    };

    Ok(Json(LoggedInResponse {
        logged_in: user.is_some(),
        user: user.map(Into::into),
    }))
}

// ============================================================================
// Cookie helpers
// ============================================================================

/// Build the Set-Cookie header for a fresh session
fn session_cookie(config: &SessionConfig, session: &Session) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.cookie_name,
        session.id,
        config.ttl_minutes * 60
    );
    if let Some(domain) = &config.cookie_domain {
        cookie.push_str("; Domain=");
        cookie.push_str(domain);
    }
    cookie
}

/// Build the Set-Cookie header that expires the session cookie
fn clear_session_cookie(config: &SessionConfig) -> String {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config.cookie_name
    );
    if let Some(domain) = &config.cookie_domain {
        cookie.push_str("; Domain=");
        cookie.push_str(domain);
    }
    cookie
}

fn set_cookie_headers(config: &SessionConfig, session: &Session) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&session_cookie(config, session))
            .map_err(|e| ApiError::internal_error(format!("Invalid cookie value: {}", e)))?,
    );
    Ok(headers)
}

fn clear_cookie_headers(config: &SessionConfig) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&clear_session_cookie(config))
            .map_err(|e| ApiError::internal_error(format!("Invalid cookie value: {}", e)))?,
    );
    Ok(headers)
}
