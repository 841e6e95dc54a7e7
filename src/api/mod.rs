//! API layer - HTTP handlers and routing
//!
//! Route map:
//! - `/signup`, `/login`, `/logout`, `/logged_in` - session auth, called
//!   by the frontend at its root paths
//! - `/users` - user records
//! - `/api/v1/posts` - post listing and creation

pub mod auth;
pub mod middleware;
pub mod posts;
pub mod users;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState};

/// Build the complete router with middleware
///
/// The CORS layer allows a single configured origin with credentials;
/// cookie-based auth across origins requires an exact origin rather
/// than a wildcard.
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);

    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/api/v1/posts", posts::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
