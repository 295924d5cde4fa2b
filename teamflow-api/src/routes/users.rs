/// User directory endpoints
///
/// Read-only listings used to populate assignee and member pickers.
///
/// # Endpoints
///
/// - `GET /api/users` - Everyone except the requester
/// - `GET /api/users/project/:project_id` - A project's members

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use teamflow_shared::{
    auth::middleware::AuthContext,
    models::project::MemberProfile,
    models::user::UserProfile,
    service::{members, users},
};
use uuid::Uuid;

/// User listing response
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub count: usize,
    pub users: Vec<UserProfile>,
}

/// Project member listing response
#[derive(Debug, Serialize)]
pub struct MemberListResponse {
    pub success: bool,
    pub members: Vec<MemberProfile>,
}

/// Lists every user except the requester, ordered by name
pub async fn list_users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserListResponse>> {
    let profiles = users::list_users(state.store.as_ref(), auth.user_id).await?;

    Ok(Json(UserListResponse {
        success: true,
        count: profiles.len(),
        users: profiles,
    }))
}

/// Lists a project's members (members only)
///
/// # Errors
///
/// - `403 Forbidden`: Requester is not a member
/// - `404 Not Found`: No such project
pub async fn project_users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<MemberListResponse>> {
    let profiles = members::list_members(state.store.as_ref(), auth.user_id, project_id).await?;

    Ok(Json(MemberListResponse {
        success: true,
        members: profiles,
    }))
}
