//! Redis session store
//!
//! Shares sessions across instances. Each session is stored as JSON under
//! `session:{token}` with a Redis-side TTL equal to the session's
//! remaining lifetime, so expiry happens server-side without a sweeper.

use super::SessionStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};

use crate::models::Session;

/// Key namespace for session entries
const KEY_PREFIX: &str = "session:";

/// Redis session store
pub struct RedisStore {
    connection: MultiplexedConnection,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Create a new Redis store with the given connection URL
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established.
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url).context("Failed to create Redis client")?;

        let connection = client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")?;

        Ok(Self { connection })
    }

    fn key(id: &str) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }
}

#[async_trait]
impl SessionStore for RedisStore {
    async fn insert(&self, session: &Session) -> Result<()> {
        let mut conn = self.connection.clone();

        let json = serde_json::to_string(session).context("Failed to serialize session")?;

        // Redis expires the key itself; minimum 1 second so an
        // already-expiring session still lands and reads as expired
        let ttl_secs = session.remaining().as_secs().max(1);

        let _: () = conn
            .set_ex(Self::key(&session.id), json, ttl_secs)
            .await
            .context("Failed to store session in Redis")?;

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Session>> {
        let mut conn = self.connection.clone();

        let result: Option<String> = conn
            .get(Self::key(id))
            .await
            .context("Failed to get session from Redis")?;

        match result {
            Some(json) => {
                let session =
                    serde_json::from_str(&json).context("Failed to deserialize session")?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let mut conn = self.connection.clone();

        let _: () = conn
            .del(Self::key(id))
            .await
            .context("Failed to delete session from Redis")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn test_session() -> Session {
        let now = Utc::now();
        Session {
            id: Uuid::new_v4().to_string(),
            user_id: 1,
            expires_at: now + Duration::minutes(90),
            created_at: now,
        }
    }

    #[test]
    fn test_key_namespacing() {
        assert_eq!(RedisStore::key("abc"), "session:abc");
    }

    // Redis round-trip tests require a running server; run with
    // `cargo test --features redis-session -- --ignored` against a local
    // instance (REDIS_URL overrides the default).
    #[tokio::test]
    #[ignore = "requires running Redis server"]
    async fn test_insert_get_remove_roundtrip() {
        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        let store = RedisStore::new(&redis_url).await.unwrap();

        let session = test_session();
        store.insert(&session).await.unwrap();

        let found = store
            .get(&session.id)
            .await
            .unwrap()
            .expect("Session not found");
        assert_eq!(found.user_id, session.user_id);

        store.remove(&session.id).await.unwrap();
        assert!(store.get(&session.id).await.unwrap().is_none());
    }
}
