//! Session-backed identity resolver.
//!
//! Every failure mode collapses to the anonymous principal: backend
//! errors, lookups exceeding the timeout, unknown or expired tokens, and
//! sessions created by a party outside the authorized list.

use crate::backend::IdentityBackend;
use compact_str::CompactString;
use gate::{IdentityResolver, Principal};
use std::{future::Future, sync::Arc, time::Duration};

/// Default bound on a single identity lookup.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves principals through an [`IdentityBackend`].
pub struct SessionResolver<B: IdentityBackend> {
    backend: Arc<B>,
    timeout: Duration,
    authorized_parties: Vec<CompactString>,
}

impl<B: IdentityBackend> Clone for SessionResolver<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            timeout: self.timeout,
            authorized_parties: self.authorized_parties.clone(),
        }
    }
}

impl<B: IdentityBackend> SessionResolver<B> {
    /// Resolver with the default timeout and no party restriction.
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            timeout: DEFAULT_RESOLVE_TIMEOUT,
            authorized_parties: Vec::new(),
        }
    }

    /// Bound each lookup by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Only accept sessions created by one of `parties`. An empty list
    /// accepts every session.
    pub fn with_authorized_parties<I, S>(mut self, parties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.authorized_parties = parties
            .into_iter()
            .map(|p| CompactString::new(p.as_ref()))
            .collect();
        self
    }

    /// The backend.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    fn party_allowed(&self, party: Option<&str>) -> bool {
        if self.authorized_parties.is_empty() {
            return true;
        }
        party.is_some_and(|p| self.authorized_parties.iter().any(|a| a == p))
    }

    async fn resolve_token(&self, token: Option<&str>) -> Principal {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Principal::anonymous();
        };

        let identity = match tokio::time::timeout(self.timeout, self.backend.lookup(token)).await {
            Ok(Ok(Some(identity))) => identity,
            Ok(Ok(None)) => return Principal::anonymous(),
            Ok(Err(e)) => {
                tracing::warn!("identity lookup failed, treating request as anonymous: {e}");
                return Principal::anonymous();
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "identity lookup timed out, treating request as anonymous"
                );
                return Principal::anonymous();
            }
        };

        if !self.party_allowed(identity.authorized_party.as_deref()) {
            tracing::warn!(
                user = %identity.user_id,
                party = identity.authorized_party.as_deref().unwrap_or("<none>"),
                "session created by unauthorized party"
            );
            return Principal::anonymous();
        }

        Principal::user(identity.user_id, identity.role)
    }
}

impl<B: IdentityBackend> IdentityResolver for SessionResolver<B> {
    fn resolve(&self, token: Option<&str>) -> impl Future<Output = Principal> + Send {
        self.resolve_token(token)
    }
}
