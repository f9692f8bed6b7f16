//! Platform roles.
//!
//! A principal holds at most one role. Absence of a role is modelled as
//! `Option::<Role>::None` rather than as a variant.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Closed set of roles recognised by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Reviews collection requests and manages listings.
    Moderator,
    /// Field collector handling scrap pickups.
    Scrapper,
    /// Regular signed-in member.
    User,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Moderator, Role::Scrapper, Role::User];

    /// Roles an administrator may grant from the user-management screen.
    pub const ASSIGNABLE: [Role; 3] = [Role::Admin, Role::Moderator, Role::Scrapper];

    /// Lowercase wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::Scrapper => "scrapper",
            Self::User => "user",
        }
    }

    /// Whether an administrator may grant this role.
    pub fn is_assignable(&self) -> bool {
        Self::ASSIGNABLE.contains(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleError(pub String);

impl fmt::Display for RoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for RoleError {}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| RoleError(s.to_owned()))
    }
}

/// Whether `name` is a role an administrator may grant.
pub fn is_valid_role(name: &str) -> bool {
    name.parse::<Role>().is_ok_and(|role| role.is_assignable())
}

/// Join roles with `", "` in the order given.
pub fn join_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
