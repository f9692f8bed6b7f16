//! Admission decisions.
//!
//! ```text
//! path ─► classify ─┬─ Public ─────────────────────────────► Allow
//!                   ├─ no principal id ────────────────────► DenyUnauthenticated
//!                   ├─ Unprotected ────────────────────────► Allow
//!                   └─ Protected(rule) ─┬─ role ∈ rule ────► Allow
//!                                       └─ otherwise ──────► DenyForbidden
//! ```
//!
//! [`Gate::decide`] is pure. [`Gate::admit`] adds the single identity
//! lookup, which is skipped entirely for public paths.

use crate::{
    Principal, Role,
    principal::IdentityResolver,
    role::join_roles,
    rule::{Classification, RouteTable},
};
use compact_str::CompactString;

/// Context for a forbidden request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forbidden {
    /// Name of the rule that matched.
    pub route_name: CompactString,
    /// Roles the rule admits, in declared order.
    pub required_roles: Vec<Role>,
    /// Role the principal actually holds.
    pub actual_role: Option<Role>,
    /// Requested path.
    pub path: String,
}

impl Forbidden {
    /// Human-readable denial message.
    pub fn message(&self) -> String {
        format!(
            "Access denied. {} area requires one of the following roles: {}",
            self.route_name,
            join_roles(&self.required_roles)
        )
    }

    /// Actual role, or `No role assigned`.
    pub fn user_role_label(&self) -> &str {
        self.actual_role
            .as_ref()
            .map(Role::as_str)
            .unwrap_or(NO_ROLE_LABEL)
    }
}

/// Label reported when the principal holds no role.
pub const NO_ROLE_LABEL: &str = "No role assigned";

/// Outcome of admitting one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Pass through to the handler. Carries the matched rule name, if any.
    Allow {
        /// Protected rule that admitted the request.
        route: Option<CompactString>,
    },
    /// No identity on a non-public path.
    DenyUnauthenticated,
    /// Identity present but its role is not admitted by the matched rule.
    DenyForbidden(Forbidden),
}

impl Decision {
    /// Whether the request may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }
}

/// The access gate: a read-only route table plus the decision procedure.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    table: RouteTable,
}

impl Gate {
    /// Create a gate over `table`.
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    /// The route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Decide a request for an already-resolved principal.
    pub fn decide(&self, path: &str, method: &str, principal: &Principal) -> Decision {
        let classification = self.table.classify(path);
        if matches!(classification, Classification::Public) {
            return Decision::Allow { route: None };
        }
        if !principal.is_authenticated() {
            tracing::info!(path, method, "denied: authentication required");
            return Decision::DenyUnauthenticated;
        }

        let Classification::Protected(rule) = classification else {
            return Decision::Allow { route: None };
        };

        match principal.role {
            Some(role) if rule.admits(role) => Decision::Allow {
                route: Some(rule.name.clone()),
            },
            actual_role => {
                tracing::info!(
                    path,
                    method,
                    route = %rule.name,
                    role = actual_role.as_ref().map(Role::as_str).unwrap_or(NO_ROLE_LABEL),
                    "denied: role not admitted"
                );
                Decision::DenyForbidden(Forbidden {
                    route_name: rule.name.clone(),
                    required_roles: rule.allowed_roles.clone(),
                    actual_role,
                    path: path.to_owned(),
                })
            }
        }
    }

    /// Resolve identity (unless the path is public) and decide.
    ///
    /// Returns the principal alongside the decision so callers can hand it
    /// to downstream handlers without a second lookup.
    pub async fn admit<R: IdentityResolver>(
        &self,
        path: &str,
        method: &str,
        resolver: &R,
        token: Option<&str>,
    ) -> (Decision, Principal) {
        if self.table.is_public(path) {
            return (Decision::Allow { route: None }, Principal::anonymous());
        }
        let principal = resolver.resolve(token).await;
        let decision = self.decide(path, method, &principal);
        (decision, principal)
    }
}
