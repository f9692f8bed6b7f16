//! The gate as an axum middleware.
//!
//! Runs once per request before routing. Allowed requests continue with
//! the resolved [`Principal`] stored in the request extensions; denied
//! requests are answered here.

use crate::{
    credentials::session_token, push::SubscriptionStore, render::render_denial, state::AppState,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use gate::{IdentityResolver, Principal, scope::is_gated};
use std::convert::Infallible;

/// Admit or deny the request.
pub async fn gate_layer<R, S>(
    State(state): State<AppState<R, S>>,
    mut request: Request,
    next: Next,
) -> Response
where
    R: IdentityResolver + 'static,
    S: SubscriptionStore + 'static,
{
    let path = request.uri().path().to_owned();
    if !is_gated(&path) {
        return next.run(request).await;
    }

    let method = request.method().as_str().to_owned();
    let token = session_token(request.headers(), &state.gate_config.session_cookie);
    let (decision, principal) = state
        .gate
        .admit(&path, &method, state.resolver.as_ref(), token.as_deref())
        .await;

    if let Some(response) = render_denial(&decision, &state.gate_config, request.uri()) {
        return response;
    }

    tracing::debug!(%path, %method, authenticated = principal.is_authenticated(), "admitted");
    request.extensions_mut().insert(principal);
    next.run(request).await
}

/// The principal admitted by the gate; anonymous on public paths.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<Principal>()
                .cloned()
                .unwrap_or_default(),
        ))
    }
}
