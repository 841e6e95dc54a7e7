//! Session store layer
//!
//! Sessions are short-lived (90 minutes by default) and never outlive the
//! process's interest in them, so they live in a dedicated store rather
//! than the SQL database:
//! - In-memory store (moka) - default, for tests and single-instance
//!   deployment
//! - Redis store - optional, for deployments that share sessions across
//!   instances
//!
//! The store driver is selected based on configuration.

pub mod memory;
#[cfg(feature = "redis-session")]
pub mod redis;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{SessionConfig, SessionDriver};
use crate::models::Session;

pub use memory::MemoryStore;
#[cfg(feature = "redis-session")]
pub use redis::RedisStore;

/// Session store trait
///
/// Backends are expected to expire entries on their own once the
/// session's TTL elapses; callers still re-check `Session::is_expired`
/// as stores only guarantee best-effort eviction.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session under its token
    async fn insert(&self, session: &Session) -> Result<()>;

    /// Look up a session by token
    async fn get(&self, id: &str) -> Result<Option<Session>>;

    /// Remove a session; unknown tokens are a no-op
    async fn remove(&self, id: &str) -> Result<()>;
}

impl std::fmt::Debug for dyn SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionStore")
    }
}

/// Type alias for a shared session store
pub type DynSessionStore = Arc<dyn SessionStore>;

/// Create a session store based on configuration
///
/// - `SessionDriver::Memory` - in-process store with the configured TTL
/// - `SessionDriver::Redis` - Redis store (requires the `redis-session`
///   feature and a `redis_url`)
pub async fn create_store(config: &SessionConfig) -> Result<DynSessionStore> {
    let ttl = Duration::from_secs(config.ttl_minutes * 60);

    match config.driver {
        SessionDriver::Memory => Ok(Arc::new(MemoryStore::with_ttl(ttl))),
        SessionDriver::Redis => {
            #[cfg(feature = "redis-session")]
            {
                let redis_url = config.redis_url.as_ref().ok_or_else(|| {
                    anyhow::anyhow!(
                        "Redis URL is required when using the redis session driver. \
                         Set 'redis_url' in the session configuration or use the \
                         MINIPOST_SESSION_REDIS_URL environment variable."
                    )
                })?;

                let store = RedisStore::new(redis_url).await?;
                Ok(Arc::new(store))
            }

            #[cfg(not(feature = "redis-session"))]
            {
                anyhow::bail!(
                    "Redis session driver is configured but the 'redis-session' feature \
                     is not enabled. Either build with `--features redis-session` or use \
                     the 'memory' session driver."
                )
            }
        }
    }
}
