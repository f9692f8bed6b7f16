//! Session credential extraction.
//!
//! Token values are never logged.

use axum::http::{
    HeaderMap,
    header::{AUTHORIZATION, COOKIE},
};

/// Value of cookie `name` from the `Cookie` header(s).
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.trim_matches('"').to_owned())
        })
}

/// Token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}

/// Session token for the request: bearer header first, then the session
/// cookie.
pub fn session_token(headers: &HeaderMap, session_cookie: &str) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_value(headers, session_cookie))
}
