//! Request principal and the identity-resolution contract.

use crate::Role;
use compact_str::CompactString;
use std::future::Future;

/// Identity of the current request. Both fields are absent for anonymous
/// requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    /// Opaque user identifier issued by the identity provider.
    pub id: Option<CompactString>,
    /// Role claim attached to the user, if any.
    pub role: Option<Role>,
}

impl Principal {
    /// The anonymous principal.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed-in principal.
    pub fn user(id: impl Into<CompactString>, role: Option<Role>) -> Self {
        Self {
            id: Some(id.into()),
            role,
        }
    }

    /// Whether an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }
}

/// Whether `principal` holds exactly `role`.
pub fn check_role(principal: &Principal, role: Role) -> bool {
    principal.role == Some(role)
}

/// Resolves the principal behind a request's session reference.
///
/// Implementations return id and role from a single lookup so the presence
/// check and the role check observe the same session. Failures of the
/// underlying identity service must surface as [`Principal::anonymous`],
/// never as an error.
pub trait IdentityResolver: Send + Sync {
    /// Resolve the session token (cookie or bearer) into a principal.
    fn resolve(&self, token: Option<&str>) -> impl Future<Output = Principal> + Send;
}

/// Resolver that treats every request as anonymous.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousResolver;

impl IdentityResolver for AnonymousResolver {
    fn resolve(&self, _token: Option<&str>) -> impl Future<Output = Principal> + Send {
        std::future::ready(Principal::anonymous())
    }
}
