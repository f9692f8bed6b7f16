//! User listing and role administration.

use crate::{middleware::CurrentPrincipal, push::SubscriptionStore, state::AppState};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gate::{IdentityResolver, Role};
use identity::AdminError;
use serde::Deserialize;
use serde_json::json;

/// Query of the user listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Substring filter.
    pub search: Option<String>,
    /// 1-based page.
    pub page: Option<usize>,
}

/// Body of a role grant.
#[derive(Debug, Deserialize)]
pub struct RoleBody {
    /// Role name.
    pub role: String,
}

/// `GET /api/protected/users/me`: the caller's own identity.
pub async fn me(CurrentPrincipal(principal): CurrentPrincipal) -> Response {
    Json(json!({
        "id": principal.id,
        "role": principal.role,
    }))
    .into_response()
}

/// `GET /admin/manage-users`: one page of users.
pub async fn list<R, S>(
    State(state): State<AppState<R, S>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: IdentityResolver + 'static,
    S: SubscriptionStore + 'static,
{
    let page = state
        .users
        .list(query.search.as_deref(), query.page.unwrap_or(1));
    Json(page).into_response()
}

/// `POST /admin/manage-users/{id}/role`: grant an assignable role.
pub async fn set_role<R, S>(
    State(state): State<AppState<R, S>>,
    CurrentPrincipal(actor): CurrentPrincipal,
    Path(id): Path<String>,
    Json(body): Json<RoleBody>,
) -> Response
where
    R: IdentityResolver + 'static,
    S: SubscriptionStore + 'static,
{
    let role = match body.role.parse::<Role>() {
        Ok(role) if role.is_assignable() => role,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("invalid role: {}", body.role) })),
            )
                .into_response();
        }
    };
    tracing::info!(actor = ?actor.id, target = %id, %role, "role change requested");
    admin_result(state.users.set_role(&id, role))
}

/// `DELETE /admin/manage-users/{id}/role`: remove the user's role.
pub async fn remove_role<R, S>(
    State(state): State<AppState<R, S>>,
    CurrentPrincipal(actor): CurrentPrincipal,
    Path(id): Path<String>,
) -> Response
where
    R: IdentityResolver + 'static,
    S: SubscriptionStore + 'static,
{
    tracing::info!(actor = ?actor.id, target = %id, "role removal requested");
    admin_result(state.users.remove_role(&id))
}

fn admin_result(result: Result<identity::UserRecord, AdminError>) -> Response {
    match result {
        Ok(user) => Json(user).into_response(),
        Err(e @ AdminError::UnknownUser(_)) => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() }))).into_response()
        }
        Err(e @ AdminError::NotAssignable(_)) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
