//! Web-push subscription endpoints.

use crate::{
    middleware::CurrentPrincipal,
    push::SubscriptionStore,
    state::AppState,
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gate::IdentityResolver;
use serde_json::json;

/// `POST`: subscribe the current user.
pub async fn subscribe<R, S>(
    State(state): State<AppState<R, S>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    body: Bytes,
) -> Response
where
    R: IdentityResolver + 'static,
    S: SubscriptionStore + 'static,
{
    let Some(user_id) = principal.id else {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    };
    let mut body = match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(user = %user_id, "unreadable web push body: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response();
        }
    };
    let subscription = body
        .get_mut("subscription")
        .map(serde_json::Value::take)
        .filter(|s| !s.is_null());
    let Some(subscription) = subscription else {
        return (StatusCode::BAD_REQUEST, "Missing subscription").into_response();
    };

    match state.subscriptions.subscribe(&user_id, subscription).await {
        Ok(()) => {
            tracing::info!(user = %user_id, "web push subscribed");
            Json(json!({ "success": true })).into_response()
        }
        Err(e) => {
            tracing::error!(user = %user_id, "web push subscribe failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// `DELETE`: unsubscribe the current user.
pub async fn unsubscribe<R, S>(
    State(state): State<AppState<R, S>>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Response
where
    R: IdentityResolver + 'static,
    S: SubscriptionStore + 'static,
{
    let Some(user_id) = principal.id else {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    };

    match state.subscriptions.unsubscribe(&user_id).await {
        Ok(existed) => {
            tracing::info!(user = %user_id, existed, "web push unsubscribed");
            Json(json!({ "success": true })).into_response()
        }
        Err(e) => {
            tracing::error!(user = %user_id, "web push unsubscribe failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}
