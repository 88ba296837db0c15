//! In-memory frontend session store
//!
//! The auth marker between `/login` and the protected endpoints: an opaque
//! uuid bearer token with a TTL, held process-wide. Deliberately not
//! persisted or shared across instances, matching the single-instance
//! scope of the gateway.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Issues and validates opaque frontend bearer tokens
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl SessionStore {
    /// Create a store whose sessions last `ttl_hours`
    #[must_use]
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            ttl: Duration::hours(ttl_hours.max(1)),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a fresh session token
    #[must_use]
    pub fn issue(&self) -> String {
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.ttl;
        self.sessions.write().insert(token.clone(), expires_at);
        token
    }

    /// Check a token, removing it when it has expired
    #[must_use]
    pub fn validate(&self, token: &str) -> bool {
        let expired = {
            let sessions = self.sessions.read();
            match sessions.get(token) {
                Some(expires_at) => Utc::now() >= *expires_at,
                None => return false,
            }
        };

        if expired {
            self.sessions.write().remove(token);
            return false;
        }
        true
    }

    /// Drop every expired session
    pub fn purge_expired(&self) {
        let now = Utc::now();
        self.sessions.write().retain(|_, expires_at| now < *expires_at);
    }

    /// Number of live (non-purged) sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether the store holds no sessions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
