//! Route table and path classification.
//!
//! Public patterns are checked first. Protected rules are then scanned in
//! declaration order and the first match wins; a narrower rule must be
//! listed before any broader catch-all over the same prefix or it will never
//! be reached.

use crate::{
    Role,
    pattern::{PatternError, RoutePattern, parse_all},
};
use compact_str::CompactString;

/// A named class of protected paths and the roles admitted to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    /// Label used in diagnostics and denial messages.
    pub name: CompactString,
    /// Any of these patterns selects the rule.
    pub patterns: Vec<RoutePattern>,
    /// Admitted roles, in the order they are reported to the user.
    pub allowed_roles: Vec<Role>,
}

impl RouteRule {
    /// Build a rule from pattern sources.
    pub fn new<S: AsRef<str>>(
        name: &str,
        patterns: &[S],
        allowed_roles: &[Role],
    ) -> Result<Self, PatternError> {
        Ok(Self {
            name: CompactString::new(name),
            patterns: parse_all(patterns)?,
            allowed_roles: allowed_roles.to_vec(),
        })
    }

    /// Whether any of the rule's patterns matches `path`.
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }

    /// Whether `role` is admitted by this rule.
    pub fn admits(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}

/// Outcome of classifying a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// Matches a public pattern; no identity is required.
    Public,
    /// Matches a protected rule; the principal's role must be admitted.
    Protected(&'a RouteRule),
    /// Matches nothing; a signed-in principal is enough.
    Unprotected,
}

/// Immutable table of public patterns and ordered protected rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    public: Vec<RoutePattern>,
    protected: Vec<RouteRule>,
}

impl RouteTable {
    /// Create a table. `protected` order is significant.
    pub fn new(public: Vec<RoutePattern>, protected: Vec<RouteRule>) -> Self {
        Self { public, protected }
    }

    /// Public patterns.
    pub fn public(&self) -> &[RoutePattern] {
        &self.public
    }

    /// Protected rules, in evaluation order.
    pub fn protected(&self) -> &[RouteRule] {
        &self.protected
    }

    /// Whether `path` matches a public pattern.
    pub fn is_public(&self, path: &str) -> bool {
        self.public.iter().any(|p| p.matches(path))
    }

    /// First protected rule matching `path`, if any.
    pub fn find_rule(&self, path: &str) -> Option<&RouteRule> {
        self.protected.iter().find(|rule| rule.matches(path))
    }

    /// Classify `path`. Public wins over any overlapping protected rule.
    pub fn classify(&self, path: &str) -> Classification<'_> {
        if self.is_public(path) {
            return Classification::Public;
        }
        match self.find_rule(path) {
            Some(rule) => Classification::Protected(rule),
            None => Classification::Unprotected,
        }
    }

    /// The platform's built-in table.
    pub fn platform() -> Result<Self, PatternError> {
        let public = parse_all(PLATFORM_PUBLIC_ROUTES)?;
        let protected = platform_rules()
            .into_iter()
            .map(|(name, patterns, roles)| RouteRule::new(name, patterns, roles))
            .collect::<Result<_, _>>()?;
        Ok(Self { public, protected })
    }
}

/// Paths open to anonymous visitors.
pub const PLATFORM_PUBLIC_ROUTES: &[&str] = &[
    "/",
    "/sign-in(.*)",
    "/marketplace(.*)",
    "/campaign(.*)",
    "/welfare-programs(.*)",
    "/donors",
    "/donate(.*)",
    "/our-services(.*)",
    "/api/public(.*)",
];

type RuleSource = (&'static str, &'static [&'static str], &'static [Role]);

/// Protected rules of the platform, narrowest first.
pub fn platform_rules() -> Vec<RuleSource> {
    use Role::*;
    vec![
        ("Verify Requests", &["/admin/verify-requests"], &[Admin, Moderator]),
        ("Admin Dashboard", &["/admin"], &[Admin, Moderator]),
        ("Admin Level", &["/admin(.*)"], &[Admin]),
        (
            "User Management",
            &["/api/protected/users(.*)"],
            &[Admin, Moderator, User, Scrapper],
        ),
        ("Moderator", &["/moderator(.*)", "/manage(.*)"], &[Admin, Moderator]),
        ("Scrap Management", &["/scrapper(.*)"], &[Admin, Scrapper, Moderator]),
        ("List Donation", &["/list-donation(.*)"], &[Admin, Scrapper, Moderator]),
        (
            "Dashboard",
            &["/dashboard(.*)"],
            &[Admin, Moderator, User, Scrapper],
        ),
    ]
}
