/// Project endpoints
///
/// Project CRUD plus membership management. Every route requires an
/// authenticated user; visibility and mutation rights are decided by the
/// access evaluator against the project's member list.
///
/// # Endpoints
///
/// - `GET    /api/projects` - Projects the requester belongs to
/// - `POST   /api/projects` - Create a project (requester becomes admin)
/// - `GET    /api/projects/:id` - Project with its tasks
/// - `PUT    /api/projects/:id` - Update fields (admins only)
/// - `DELETE /api/projects/:id` - Delete with task cascade (admins only)
/// - `GET    /api/projects/:id/members` - Member listing
/// - `POST   /api/projects/:id/members` - Add a member (admins only)
/// - `DELETE /api/projects/:id/members/:user_id` - Remove a member (admins only)

use crate::{
    app::AppState,
    error::{validation_details, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use teamflow_shared::{
    auth::middleware::AuthContext,
    models::project::{MemberProfile, MemberRole, ProjectStatus, ProjectView, UpdateProject},
    models::task::TaskView,
    service::members::{self, AddMember},
    service::projects::{self, NewProject},
};
use uuid::Uuid;
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 100, message = "Project name must be 1-100 characters"))]
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}

/// Update project request
///
/// Absent fields are left unchanged; an explicit `null` description clears
/// the stored one.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    /// New name
    pub name: Option<String>,

    /// New description; `null` clears it
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,

    /// New lifecycle status
    pub status: Option<ProjectStatus>,
}

/// Add member request
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    /// User to add
    pub user_id: Uuid,

    /// Membership role (defaults to member)
    #[serde(default)]
    pub role: MemberRole,
}

/// Project listing response
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub success: bool,
    pub count: usize,
    pub projects: Vec<ProjectView>,
}

/// Single project response
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub project: ProjectView,
}

/// Project detail response (project + its tasks)
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    pub success: bool,
    pub project: ProjectView,
    pub tasks: Vec<TaskView>,
    pub task_count: usize,
}

/// Member listing response
#[derive(Debug, Serialize)]
pub struct MemberListResponse {
    pub success: bool,
    pub members: Vec<MemberProfile>,
}

/// Single member response
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub success: bool,
    pub message: String,
    pub member: MemberProfile,
}

/// Plain confirmation response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Lists projects the requester is a member of
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ProjectListResponse>> {
    let views = projects::list_projects(state.store.as_ref(), auth.user_id).await?;

    Ok(Json(ProjectListResponse {
        success: true,
        count: views.len(),
        projects: views,
    }))
}

/// Creates a project
///
/// The requester is seeded as the project's first admin member.
///
/// # Errors
///
/// - `400 Bad Request`: Missing or blank name
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    req.validate().map_err(validation_details)?;

    let view = projects::create_project(
        state.store.as_ref(),
        auth.user_id,
        NewProject {
            name: req.name,
            description: req.description,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse {
            success: true,
            message: Some("Project created successfully".to_string()),
            project: view,
        }),
    ))
}

/// Reads a project together with its tasks
///
/// # Errors
///
/// - `403 Forbidden`: Requester is not a member
/// - `404 Not Found`: No such project
pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ProjectDetailResponse>> {
    let detail = projects::get_project(state.store.as_ref(), auth.user_id, id).await?;

    Ok(Json(ProjectDetailResponse {
        success: true,
        project: detail.project,
        task_count: detail.tasks.len(),
        tasks: detail.tasks,
    }))
}

/// Updates a project's name, description, or status
///
/// # Errors
///
/// - `400 Bad Request`: Blank name
/// - `403 Forbidden`: Requester is not a project admin
/// - `404 Not Found`: No such project
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let view = projects::update_project(
        state.store.as_ref(),
        auth.user_id,
        id,
        UpdateProject {
            name: req.name,
            description: req.description,
            status: req.status,
        },
    )
    .await?;

    Ok(Json(ProjectResponse {
        success: true,
        message: Some("Project updated successfully".to_string()),
        project: view,
    }))
}

/// Deletes a project and all of its tasks
///
/// # Errors
///
/// - `403 Forbidden`: Requester is not a project admin
/// - `404 Not Found`: No such project
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    projects::delete_project(state.store.as_ref(), auth.user_id, id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Project and associated tasks deleted successfully".to_string(),
    }))
}

/// Lists a project's members with their user profiles
pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MemberListResponse>> {
    let profiles = members::list_members(state.store.as_ref(), auth.user_id, id).await?;

    Ok(Json(MemberListResponse {
        success: true,
        members: profiles,
    }))
}

/// Adds a user to the project's member list
///
/// # Errors
///
/// - `403 Forbidden`: Requester is not a project admin
/// - `404 Not Found`: No such project, or the user does not exist
/// - `409 Conflict`: User is already a member
pub async fn add_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<(StatusCode, Json<MemberResponse>)> {
    let member = members::add_member(
        state.store.as_ref(),
        auth.user_id,
        id,
        AddMember {
            user_id: req.user_id,
            role: req.role,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MemberResponse {
            success: true,
            message: "Member added successfully".to_string(),
            member,
        }),
    ))
}

/// Removes a user from the project's member list
///
/// # Errors
///
/// - `403 Forbidden`: Requester is not a project admin
/// - `404 Not Found`: No such project, or the user is not a member
/// - `409 Conflict`: Removal would leave the project without an admin
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<MessageResponse>> {
    members::remove_member(state.store.as_ref(), auth.user_id, id, user_id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Member removed successfully".to_string(),
    }))
}
