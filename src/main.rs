//! minipost - a small session-backed posts service

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use minipost::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{SqlxPostRepository, SqlxUserRepository},
    },
    services::{PostService, UserService},
    store::create_store,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minipost=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting minipost...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Initialize session store
    let sessions = create_store(&config.session).await?;
    tracing::info!("Session store initialized: {:?}", config.session.driver);

    // Create repositories and services
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let post_repo = SqlxPostRepository::boxed(pool);

    let user_service = Arc::new(UserService::with_session_ttl(
        user_repo,
        sessions,
        config.session.ttl_minutes as i64,
    ));
    let post_service = Arc::new(PostService::new(post_repo));

    // Build application state
    let state = AppState {
        user_service,
        post_service,
        session: Arc::new(config.session.clone()),
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
