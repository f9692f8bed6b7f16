//! Session store.
//!
//! Tracks issued session tokens with the user they belong to, the party
//! (origin) that created them, and an expiry. Interior mutability keeps the
//! store shareable behind an `Arc`.

use compact_str::CompactString;
use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};

/// Default session lifetime: seven days.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// An issued session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Opaque session token (UUID v4).
    pub token: CompactString,
    /// User the session belongs to.
    pub user_id: CompactString,
    /// Origin that created the session, if recorded.
    pub authorized_party: Option<CompactString>,
    /// Creation timestamp (unix seconds).
    pub created_at: u64,
    /// Expiry timestamp (unix seconds).
    pub expires_at: u64,
}

impl SessionRecord {
    /// Whether the session has expired at `now`.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe store of active sessions keyed by token.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<BTreeMap<CompactString, SessionRecord>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new session for `user_id` lasting `ttl_secs`.
    pub fn create(
        &self,
        user_id: &str,
        authorized_party: Option<&str>,
        ttl_secs: u64,
    ) -> SessionRecord {
        let token = CompactString::new(uuid::Uuid::new_v4().to_string());
        self.insert_with_token(&token, user_id, authorized_party, ttl_secs)
    }

    /// Register a session under a caller-chosen token (used for seeding).
    pub fn insert_with_token(
        &self,
        token: &str,
        user_id: &str,
        authorized_party: Option<&str>,
        ttl_secs: u64,
    ) -> SessionRecord {
        let now = unix_now();
        let record = SessionRecord {
            token: CompactString::new(token),
            user_id: CompactString::new(user_id),
            authorized_party: authorized_party.map(CompactString::new),
            created_at: now,
            expires_at: now.saturating_add(ttl_secs),
        };
        self.sessions
            .lock()
            .insert(record.token.clone(), record.clone());
        record
    }

    /// Look up a live session. Expired sessions are not returned.
    pub fn get(&self, token: &str) -> Option<SessionRecord> {
        let now = unix_now();
        self.sessions
            .lock()
            .get(token)
            .filter(|s| !s.is_expired_at(now))
            .cloned()
    }

    /// Revoke a session.
    pub fn revoke(&self, token: &str) -> Option<SessionRecord> {
        self.sessions.lock().remove(token)
    }

    /// Revoke every session of a user. Returns how many were removed.
    pub fn revoke_user(&self, user_id: &str) -> usize {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != user_id);
        before - sessions.len()
    }

    /// Drop expired sessions. Returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = unix_now();
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::debug!(removed, "purged expired sessions");
        }
        removed
    }

    /// Number of stored sessions, expired ones included.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
