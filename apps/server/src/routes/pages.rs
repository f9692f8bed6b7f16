//! Landing pages the gate redirects to.

use crate::{credentials::cookie_value, push::SubscriptionStore, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use gate::IdentityResolver;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Diagnostics carried to the unauthorized page.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DenialDetails {
    /// Human-readable denial message.
    pub message: Option<String>,
    /// Role the user holds.
    pub user_role: Option<String>,
    /// Roles the area requires.
    pub required_roles: Option<String>,
    /// Path that was denied.
    pub path: Option<String>,
}

/// `GET /unauthorized`: explain which role was missing.
pub async fn unauthorized(Query(details): Query<DenialDetails>) -> Response {
    Json(details).into_response()
}

/// `GET /sign-in`: report where the user will be sent after signing in.
pub async fn sign_in<R, S>(State(state): State<AppState<R, S>>, headers: HeaderMap) -> Response
where
    R: IdentityResolver + 'static,
    S: SubscriptionStore + 'static,
{
    let redirect_to = cookie_value(&headers, &state.gate_config.redirect_cookie)
        .map(|raw| percent_decode_str(&raw).decode_utf8_lossy().into_owned());
    Json(json!({ "redirect_to": redirect_to })).into_response()
}
