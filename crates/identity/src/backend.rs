//! Identity backends.
//!
//! A backend answers one question: which user, holding which role, owns
//! this session token. It may fail; the resolver decides what a failure
//! means for admission.

use crate::{directory::UserDirectory, session::SessionStore};
use compact_str::CompactString;
use gate::Role;
use std::{fmt, future::Future, sync::Arc};

/// A session's owner as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// User id.
    pub user_id: CompactString,
    /// Current role claim.
    pub role: Option<Role>,
    /// Origin that created the session.
    pub authorized_party: Option<CompactString>,
}

/// Identity backend failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The identity service could not be reached.
    Unavailable(String),
    /// The session points at a user the directory does not know.
    DanglingSession(CompactString),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "identity service unavailable: {reason}"),
            Self::DanglingSession(user) => write!(f, "session references unknown user {user}"),
        }
    }
}

impl std::error::Error for DirectoryError {}

/// Source of session ownership.
pub trait IdentityBackend: Send + Sync {
    /// Look up the owner of `token`. `Ok(None)` means no live session.
    fn lookup(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<Identity>, DirectoryError>> + Send;
}

/// Backend over the in-process session store and user directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    /// Registered users.
    pub users: Arc<UserDirectory>,
    /// Issued sessions.
    pub sessions: Arc<SessionStore>,
}

impl MemoryBackend {
    /// Create a backend over shared stores.
    pub fn new(users: Arc<UserDirectory>, sessions: Arc<SessionStore>) -> Self {
        Self { users, sessions }
    }

    fn lookup_now(&self, token: &str) -> Result<Option<Identity>, DirectoryError> {
        let Some(session) = self.sessions.get(token) else {
            return Ok(None);
        };
        let user = self
            .users
            .get(&session.user_id)
            .ok_or_else(|| DirectoryError::DanglingSession(session.user_id.clone()))?;
        Ok(Some(Identity {
            user_id: user.id,
            role: user.role,
            authorized_party: session.authorized_party,
        }))
    }
}

impl IdentityBackend for MemoryBackend {
    fn lookup(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<Identity>, DirectoryError>> + Send {
        std::future::ready(self.lookup_now(token))
    }
}
