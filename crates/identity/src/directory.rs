//! User directory and role administration.

use crate::session::unix_now;
use compact_str::CompactString;
use gate::Role;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Users shown per page on the management screen.
pub const PAGE_SIZE: usize = 20;

/// Page numbers shown at once in the pager.
pub const PAGE_WINDOW: usize = 5;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Identity-provider user id.
    pub id: CompactString,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Primary email address.
    #[serde(default)]
    pub email: String,
    /// Role claim, if one has been granted.
    #[serde(default)]
    pub role: Option<Role>,
    /// Registration timestamp (unix seconds).
    #[serde(default)]
    pub created_at: u64,
}

impl UserRecord {
    /// A new user with no role.
    pub fn new(id: &str, name: &str, email: &str) -> Self {
        Self {
            id: CompactString::new(id),
            name: name.to_owned(),
            email: email.to_owned(),
            role: None,
            created_at: unix_now(),
        }
    }

    /// Set the initial role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [self.id.as_str(), self.name.as_str(), self.email.as_str()]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Role administration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// No user with this id.
    UnknownUser(CompactString),
    /// The role may not be granted from the management screen.
    NotAssignable(Role),
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUser(id) => write!(f, "unknown user: {id}"),
            Self::NotAssignable(role) => write!(f, "role cannot be assigned: {role}"),
        }
    }
}

impl std::error::Error for AdminError {}

/// One page of the user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPage {
    /// Users on this page, newest first.
    pub users: Vec<UserRecord>,
    /// 1-based page number.
    pub page: usize,
    /// Total matching users.
    pub total_count: usize,
    /// Total pages.
    pub total_pages: usize,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_prev_page: bool,
    /// Page numbers to render in the pager.
    pub page_window: Vec<usize>,
}

/// Registered users keyed by id.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: RwLock<BTreeMap<CompactString, UserRecord>>,
}

impl UserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user.
    pub fn upsert(&self, user: UserRecord) {
        self.users.write().insert(user.id.clone(), user);
    }

    /// Fetch a user by id.
    pub fn get(&self, id: &str) -> Option<UserRecord> {
        self.users.read().get(id).cloned()
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    /// Grant `role` to a user. Only assignable roles are accepted.
    pub fn set_role(&self, id: &str, role: Role) -> Result<UserRecord, AdminError> {
        if !role.is_assignable() {
            return Err(AdminError::NotAssignable(role));
        }
        let mut users = self.users.write();
        let user = users
            .get_mut(id)
            .ok_or_else(|| AdminError::UnknownUser(CompactString::new(id)))?;
        user.role = Some(role);
        tracing::info!(user = id, %role, "role granted");
        Ok(user.clone())
    }

    /// Remove a user's role.
    pub fn remove_role(&self, id: &str) -> Result<UserRecord, AdminError> {
        let mut users = self.users.write();
        let user = users
            .get_mut(id)
            .ok_or_else(|| AdminError::UnknownUser(CompactString::new(id)))?;
        user.role = None;
        tracing::info!(user = id, "role removed");
        Ok(user.clone())
    }

    /// List users, newest first, optionally filtered by a case-insensitive
    /// substring of id, name or email. `page` is 1-based; 0 is treated as 1
    /// and pages past the end are empty.
    pub fn list(&self, query: Option<&str>, page: usize) -> UserPage {
        let page = page.max(1);
        let mut matching: Vec<UserRecord> = self
            .users
            .read()
            .values()
            .filter(|u| query.is_none_or(|q| q.is_empty() || u.matches(q)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total_count = matching.len();
        let total_pages = total_count.div_ceil(PAGE_SIZE);
        let users = matching
            .into_iter()
            .skip((page - 1).saturating_mul(PAGE_SIZE))
            .take(PAGE_SIZE)
            .collect();

        UserPage {
            users,
            page,
            total_count,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
            page_window: page_window(page, total_pages),
        }
    }
}

/// Page numbers to show around `current`, at most [`PAGE_WINDOW`] of them.
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    let len = PAGE_WINDOW.min(total_pages);
    let start = if total_pages <= PAGE_WINDOW || current <= 3 {
        1
    } else if current.saturating_add(2) >= total_pages {
        total_pages + 1 - PAGE_WINDOW
    } else {
        current - 2
    };
    (start..start + len).collect()
}
