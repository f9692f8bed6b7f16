//! Path patterns for route rules.
//!
//! Two shapes are supported: an exact path (`/donors`) and a prefix with the
//! wildcard suffix `(.*)` (`/admin(.*)`), which matches the prefix followed by
//! anything, including nothing. Matching is ASCII case-insensitive so that
//! `/Admin` cannot slip past a rule written as `/admin(.*)`.

use compact_str::CompactString;
use std::fmt;

/// Wildcard suffix accepted at the end of a pattern.
pub const WILDCARD_SUFFIX: &str = "(.*)";

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Matches the path itself, with or without one trailing `/`.
    Exact(CompactString),
    /// Matches any path starting with the prefix.
    Prefix(CompactString),
}

/// Malformed pattern source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern does not start with `/`.
    Relative(String),
    /// The pattern uses syntax other than a trailing `(.*)`.
    Unsupported(String),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative(p) => write!(f, "pattern must start with '/': {p}"),
            Self::Unsupported(p) => {
                write!(f, "only a trailing {WILDCARD_SUFFIX} wildcard is supported: {p}")
            }
        }
    }
}

impl std::error::Error for PatternError {}

impl RoutePattern {
    /// Compile a pattern from its source form.
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        if !source.starts_with('/') {
            return Err(PatternError::Relative(source.to_owned()));
        }

        let (body, wildcard) = match source.strip_suffix(WILDCARD_SUFFIX) {
            Some(prefix) => (prefix, true),
            None => (source, false),
        };
        if body.contains(['(', ')', '*', '?', '#']) {
            return Err(PatternError::Unsupported(source.to_owned()));
        }

        let body = CompactString::new(body.to_ascii_lowercase());
        Ok(if wildcard {
            Self::Prefix(body)
        } else {
            Self::Exact(body)
        })
    }

    /// Test a request path (without query string) against this pattern.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => {
                let trimmed = match path.strip_suffix('/') {
                    Some(rest) if !rest.is_empty() => rest,
                    _ => path,
                };
                trimmed.eq_ignore_ascii_case(exact)
            }
            Self::Prefix(prefix) => path
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(p) => f.write_str(p),
            Self::Prefix(p) => write!(f, "{p}{WILDCARD_SUFFIX}"),
        }
    }
}

/// Compile a list of pattern sources, stopping at the first malformed one.
pub fn parse_all<S: AsRef<str>>(sources: &[S]) -> Result<Vec<RoutePattern>, PatternError> {
    sources.iter().map(|s| RoutePattern::parse(s.as_ref())).collect()
}
