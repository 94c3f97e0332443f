//! Server-side admin sessions.
//!
//! The browser only ever holds an opaque random id in a cookie. The store
//! keys entries by the SHA-256 of that id, so a dump of the session table
//! cannot be replayed as cookies.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::distr::{Alphanumeric, SampleString};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::store::models::AdminSummary;

const SESSION_ID_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone)]
pub struct SessionData {
    pub admin: AdminSummary,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionData {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Backend for admin sessions. The in-memory store is the only one shipped;
/// the trait keeps the route layer independent of where sessions live.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Starts a session and returns the id to hand to the client.
    async fn create(&self, admin: AdminSummary) -> Result<String, SessionError>;

    /// Live session for a client id. Expired sessions are dropped here.
    async fn get(&self, session_id: &str) -> Result<Option<SessionData>, SessionError>;

    /// True when a session was removed.
    async fn destroy(&self, session_id: &str) -> Result<bool, SessionError>;

    /// Removes every expired session and returns how many went.
    async fn prune_expired(&self) -> Result<usize, SessionError>;

    async fn active_count(&self) -> Result<usize, SessionError>;
}

pub fn generate_session_id() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), SESSION_ID_LEN)
}

fn hash_session_id(session_id: &str) -> String {
    let digest = Sha256::digest(session_id.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

pub struct MemorySessionStore {
    ttl: Duration,
    entries: RwLock<HashMap<String, SessionData>>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, admin: AdminSummary) -> Result<String, SessionError> {
        let session_id = generate_session_id();
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| SessionError::Backend("session expiry out of range".to_string()))?;
        let data = SessionData {
            admin,
            created_at: now,
            expires_at,
        };
        self.entries
            .write()
            .await
            .insert(hash_session_id(&session_id), data);
        Ok(session_id)
    }

    async fn get(&self, session_id: &str) -> Result<Option<SessionData>, SessionError> {
        let key = hash_session_id(session_id);
        let now = Utc::now();

        {
            let entries = self.entries.read().await;
            match entries.get(&key) {
                None => return Ok(None),
                Some(data) if !data.is_expired(now) => return Ok(Some(data.clone())),
                Some(_) => {}
            }
        }

        self.entries.write().await.remove(&key);
        Ok(None)
    }

    async fn destroy(&self, session_id: &str) -> Result<bool, SessionError> {
        let key = hash_session_id(session_id);
        Ok(self.entries.write().await.remove(&key).is_some())
    }

    async fn prune_expired(&self) -> Result<usize, SessionError> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, data| !data.is_expired(now));
        Ok(before - entries.len())
    }

    async fn active_count(&self) -> Result<usize, SessionError> {
        Ok(self.entries.read().await.len())
    }
}

/// Periodically clears expired sessions so abandoned logins do not pile up.
pub fn spawn_sweeper(
    sessions: Arc<dyn SessionStore>,
    period: std::time::Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // first tick fires immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            match sessions.prune_expired().await {
                Ok(0) => {}
                Ok(removed) => tracing::debug!(removed, "pruned expired sessions"),
                Err(e) => tracing::warn!(error = %e, "session sweep failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminSummary {
        AdminSummary {
            id: 1,
            username: "akaanakbaik".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_session_ids_are_long_and_distinct() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert_eq!(a.len(), SESSION_ID_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = hash_session_id("abc");
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_create_get_destroy() {
        let store = MemorySessionStore::new(Duration::hours(24));
        let id = store.create(admin()).await.unwrap();

        let session = store.get(&id).await.unwrap().expect("session exists");
        assert_eq!(session.admin.username, "akaanakbaik");
        assert_eq!(session.expires_at - session.created_at, Duration::hours(24));

        assert!(store.destroy(&id).await.unwrap());
        assert!(store.get(&id).await.unwrap().is_none());
        assert!(!store.destroy(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_id_has_no_session() {
        let store = MemorySessionStore::new(Duration::hours(1));
        assert!(store.get("forged").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_raw_id_is_not_the_key() {
        let store = MemorySessionStore::new(Duration::hours(1));
        let id = store.create(admin()).await.unwrap();
        let entries = store.entries.read().await;
        assert!(!entries.contains_key(&id));
        assert!(entries.contains_key(&hash_session_id(&id)));
    }

    #[tokio::test]
    async fn test_expired_sessions_are_evicted() {
        let store = MemorySessionStore::new(Duration::zero());
        let id = store.create(admin()).await.unwrap();
        assert!(store.get(&id).await.unwrap().is_none());
        assert_eq!(store.active_count().await.unwrap(), 0);

        store.create(admin()).await.unwrap();
        store.create(admin()).await.unwrap();
        assert_eq!(store.prune_expired().await.unwrap(), 2);
        assert_eq!(store.active_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unrepresentable_expiry_is_an_error() {
        let store = MemorySessionStore::new(Duration::days(100_000_000));
        assert!(store.create(admin()).await.is_err());
        assert_eq!(store.active_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_prune_keeps_live_sessions() {
        let store = MemorySessionStore::new(Duration::hours(1));
        store.create(admin()).await.unwrap();
        assert_eq!(store.prune_expired().await.unwrap(), 0);
        assert_eq!(store.active_count().await.unwrap(), 1);
    }
}
