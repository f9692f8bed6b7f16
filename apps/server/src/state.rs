//! Shared application state for the HTTP server.

use crate::{config::GateConfig, push::SubscriptionStore};
use gate::{Gate, IdentityResolver};
use identity::UserDirectory;
use std::sync::Arc;

/// Shared state available to the gate layer and all handlers.
pub struct AppState<R: IdentityResolver, S: SubscriptionStore> {
    /// Access gate (immutable after init).
    pub gate: Arc<Gate>,
    /// Rendering and credential settings for the gate.
    pub gate_config: Arc<GateConfig>,
    /// Identity resolver.
    pub resolver: Arc<R>,
    /// Registered users, for role administration.
    pub users: Arc<UserDirectory>,
    /// Web-push subscriptions.
    pub subscriptions: Arc<S>,
}

impl<R: IdentityResolver, S: SubscriptionStore> Clone for AppState<R, S> {
    fn clone(&self) -> Self {
        Self {
            gate: Arc::clone(&self.gate),
            gate_config: Arc::clone(&self.gate_config),
            resolver: Arc::clone(&self.resolver),
            users: Arc::clone(&self.users),
            subscriptions: Arc::clone(&self.subscriptions),
        }
    }
}
