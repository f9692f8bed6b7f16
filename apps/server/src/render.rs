//! HTTP rendering of gate denials.

use crate::config::GateConfig;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, Uri, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use gate::{Decision, Forbidden, join_roles};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;

/// Bytes that may not appear raw in a cookie value.
const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b',')
    .add(b';')
    .add(b'\\')
    .add(b'%');

/// JSON body of API error responses.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Short error class.
    pub error: &'static str,
    /// Human-readable detail.
    pub message: &'static str,
}

/// Body returned to unauthenticated API callers.
pub const AUTHENTICATION_REQUIRED: ApiError = ApiError {
    error: "Unauthorized",
    message: "Authentication required",
};

/// Render a denial. Returns `None` for [`Decision::Allow`].
pub fn render_denial(decision: &Decision, config: &GateConfig, uri: &Uri) -> Option<Response> {
    match decision {
        Decision::Allow { .. } => None,
        Decision::DenyUnauthenticated => Some(unauthenticated(config, uri)),
        Decision::DenyForbidden(forbidden) => Some(forbidden_redirect(config, forbidden)),
    }
}

fn unauthenticated(config: &GateConfig, uri: &Uri) -> Response {
    if uri.path().starts_with(&config.api_prefix) {
        return (StatusCode::UNAUTHORIZED, Json(AUTHENTICATION_REQUIRED)).into_response();
    }

    let mut response = Redirect::temporary(&config.sign_in_path).into_response();
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let cookie = redirect_cookie(&config.redirect_cookie, target);
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!("dropping unrepresentable redirect cookie: {e}"),
    }
    response
}

/// `Set-Cookie` value remembering `target` for replay after sign-in.
pub fn redirect_cookie(name: &str, target: &str) -> String {
    format!(
        "{name}={}; Path=/; HttpOnly",
        utf8_percent_encode(target, COOKIE_VALUE)
    )
}

fn forbidden_redirect(config: &GateConfig, forbidden: &Forbidden) -> Response {
    Redirect::temporary(&unauthorized_location(config, forbidden)).into_response()
}

/// Location of the unauthorized page carrying the denial diagnostics.
pub fn unauthorized_location(config: &GateConfig, forbidden: &Forbidden) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("message", &forbidden.message())
        .append_pair("userRole", forbidden.user_role_label())
        .append_pair("requiredRoles", &join_roles(&forbidden.required_roles))
        .append_pair("path", &forbidden.path)
        .finish();
    format!("{}?{query}", config.unauthorized_path)
}
