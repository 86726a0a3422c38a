//! services/api/src/adapters/session_store.rs
//!
//! An in-process implementation of the `SessionStore` port. Every record
//! carries an expiry; expired records read as absent and are swept on write.
//! Records are lost when the service restarts.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use learnhub_core::ports::{PortResult, SessionStore};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

const DEFAULT_TTL_DAYS: i64 = 30;

struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, Entry>>,
    ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::days(DEFAULT_TTL_DAYS))
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records written to this store expire `ttl` after they were last set.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Records held, expired ones included until they are swept.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        let mut entries = self.entries.lock().await;
        let now = Utc::now();
        let Some(entry) = entries.get(key) else {
            return Ok(None);
        };
        if !entry.is_expired(now) {
            return Ok(Some(entry.value.clone()));
        }
        debug!("Session record '{}' expired at {}", key, entry.expires_at);
        entries.remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: String) -> PortResult<()> {
        let mut entries = self.entries.lock().await;
        let now = Utc::now();
        entries.retain(|_, entry| !entry.is_expired(now));
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now + self.ttl,
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> PortResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let store = InMemorySessionStore::new();
        store.set("session:a", "{}".to_string()).await.unwrap();
        assert_eq!(store.get("session:a").await.unwrap().as_deref(), Some("{}"));
        assert_eq!(store.get("session:b").await.unwrap(), None);

        store.remove("session:a").await.unwrap();
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn expired_records_read_as_absent_and_are_dropped() {
        let store = InMemorySessionStore::with_ttl(Duration::zero());
        store.set("session:a", "{}".to_string()).await.unwrap();
        assert_eq!(store.len().await, 1);

        assert_eq!(store.get("session:a").await.unwrap(), None);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn writes_sweep_abandoned_records() {
        let store = InMemorySessionStore::with_ttl(Duration::zero());
        for i in 0..100 {
            store.set(&format!("session:{}", i), "{}".to_string()).await.unwrap();
        }
        assert_eq!(store.len().await, 1);
    }
}
