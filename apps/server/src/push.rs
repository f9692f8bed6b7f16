//! Web-push subscription storage.
//!
//! Delivery is handled elsewhere; this only records which browser endpoint
//! belongs to which user.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use parking_lot::Mutex;
use serde::Serialize;
use std::{collections::BTreeMap, fmt, future::Future};

/// A stored browser subscription.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushSubscription {
    /// Owning user.
    pub user_id: CompactString,
    /// Subscription object as sent by the browser.
    pub subscription: serde_json::Value,
    /// When the subscription was recorded.
    pub subscribed_at: DateTime<Utc>,
}

/// Subscription store failure.
#[derive(Debug, Clone)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription store error: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

/// Persistence for web-push subscriptions, one per user.
pub trait SubscriptionStore: Send + Sync {
    /// Record (or replace) the user's subscription.
    fn subscribe(
        &self,
        user_id: &str,
        subscription: serde_json::Value,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Drop the user's subscription. Returns whether one existed.
    fn unsubscribe(&self, user_id: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// In-process subscription store.
#[derive(Debug, Default)]
pub struct MemorySubscriptions {
    entries: Mutex<BTreeMap<CompactString, PushSubscription>>,
}

impl MemorySubscriptions {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's current subscription.
    pub fn get(&self, user_id: &str) -> Option<PushSubscription> {
        self.entries.lock().get(user_id).cloned()
    }

    /// Number of subscribed users.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no user is subscribed.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl SubscriptionStore for MemorySubscriptions {
    fn subscribe(
        &self,
        user_id: &str,
        subscription: serde_json::Value,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        let entry = PushSubscription {
            user_id: CompactString::new(user_id),
            subscription,
            subscribed_at: Utc::now(),
        };
        self.entries.lock().insert(entry.user_id.clone(), entry);
        std::future::ready(Ok(()))
    }

    fn unsubscribe(&self, user_id: &str) -> impl Future<Output = Result<bool, StoreError>> + Send {
        let existed = self.entries.lock().remove(user_id).is_some();
        std::future::ready(Ok(existed))
    }
}
