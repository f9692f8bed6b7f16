//! Welfare access gate: route classification, identity contract, and the
//! per-request admission decision.

pub mod decision;
pub mod pattern;
pub mod principal;
pub mod role;
pub mod rule;
pub mod scope;

pub use decision::{Decision, Forbidden, Gate, NO_ROLE_LABEL};
pub use pattern::{PatternError, RoutePattern};
pub use principal::{AnonymousResolver, IdentityResolver, Principal, check_role};
pub use role::{Role, RoleError, is_valid_role, join_roles};
pub use rule::{Classification, RouteRule, RouteTable};
