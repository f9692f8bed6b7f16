//! HTTP routes.

use crate::{middleware::gate_layer, push::SubscriptionStore, state::AppState};
use axum::{
    Router,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use gate::IdentityResolver;

pub mod pages;
pub mod push;
pub mod users;

/// Build the router with every request passing through the gate.
pub fn router<R, S>(state: AppState<R, S>) -> Router
where
    R: IdentityResolver + 'static,
    S: SubscriptionStore + 'static,
{
    Router::new()
        .route("/sign-in", get(pages::sign_in::<R, S>))
        .route("/unauthorized", get(pages::unauthorized))
        .route("/api/protected/users/me", get(users::me))
        .route(
            "/api/protected/web-push/subscribe",
            post(push::subscribe::<R, S>).delete(push::unsubscribe::<R, S>),
        )
        .route("/admin/manage-users", get(users::list::<R, S>))
        .route(
            "/admin/manage-users/{id}/role",
            post(users::set_role::<R, S>).delete(users::remove_role::<R, S>),
        )
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not Found") })
        .layer(from_fn_with_state(state.clone(), gate_layer::<R, S>))
        .with_state(state)
}
