//! In-memory session store using moka
//!
//! Entries are evicted automatically once the store TTL elapses, which
//! matches the fixed session lifetime: every session in a store shares
//! the same TTL, counted from insertion.

use super::SessionStore;
use anyhow::Result;
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

use crate::models::Session;

/// Default maximum number of concurrent sessions
const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Default session TTL (90 minutes)
const DEFAULT_TTL: Duration = Duration::from_secs(90 * 60);

/// In-memory session store
pub struct MemoryStore {
    sessions: Cache<String, Session>,
    ttl: Duration,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entry_count", &self.sessions.entry_count())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl MemoryStore {
    /// Create a new memory store with the default TTL
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a new memory store with a custom session TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(DEFAULT_MAX_CAPACITY)
            .time_to_live(ttl.max(Duration::from_secs(1)))
            .build();

        Self { sessions, ttl }
    }

    /// Get the session TTL for this store
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the current number of live sessions
    ///
    /// Eventually consistent; call [`MemoryStore::sync`] first when an
    /// exact count matters.
    pub fn entry_count(&self) -> u64 {
        self.sessions.entry_count()
    }

    /// Flush pending internal maintenance so `entry_count` is accurate
    pub async fn sync(&self) {
        self.sessions.run_pending_tasks().await;
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert(&self, session: &Session) -> Result<()> {
        self.sessions
            .insert(session.id.clone(), session.clone())
            .await;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.get(id).await)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.sessions.invalidate(id).await;
        Ok(())
    }
}
