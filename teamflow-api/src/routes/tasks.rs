/// Task endpoints
///
/// Task CRUD, status changes, and listings. Every route requires an
/// authenticated user. Edit rights cover project members plus the task's
/// assignee.
///
/// # Endpoints
///
/// - `POST   /api/tasks` - Create a task under a project
/// - `GET    /api/tasks/my-tasks` - Requester's assignments across projects
/// - `GET    /api/tasks/project/:project_id` - A project's tasks
/// - `PUT    /api/tasks/:id` - Update fields
/// - `PATCH  /api/tasks/:id/status` - Change status
/// - `DELETE /api/tasks/:id` - Delete

use crate::{
    app::AppState,
    error::{validation_details, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use teamflow_shared::{
    auth::middleware::AuthContext,
    error::DomainError,
    models::task::{TaskPriority, TaskStatus, TaskView, UpdateTask},
    service::tasks::{self, NewTask},
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 200, message = "Task title must be 1-200 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning project
    pub project_id: Uuid,

    /// Optional assignee
    pub assigned_to: Option<Uuid>,

    /// Priority (defaults to medium)
    #[serde(default)]
    pub priority: TaskPriority,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

/// Update task request
///
/// Absent fields are left unchanged; an explicit `null` clears the nullable
/// fields (description, assignee, due date). The owning project cannot
/// change.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title
    pub title: Option<String>,

    /// New description; `null` clears it
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,

    /// New assignee; `null` unassigns
    #[serde(default, deserialize_with = "super::double_option")]
    pub assigned_to: Option<Option<Uuid>>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New due date; `null` clears it
    #[serde(default, deserialize_with = "super::double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Status change request
///
/// The status arrives as a plain string so that unknown values produce a
/// validation error instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// Target status: todo, in_progress, done, or blocked
    pub status: String,
}

/// Task listing response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub success: bool,
    pub count: usize,
    pub tasks: Vec<TaskView>,
}

/// Single task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub task: TaskView,
}

/// Plain confirmation response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Creates a task under a project
///
/// The requester is recorded as the task's creator.
///
/// # Errors
///
/// - `400 Bad Request`: Missing or blank title
/// - `403 Forbidden`: Requester is not a member of the project
/// - `404 Not Found`: No such project
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate().map_err(validation_details)?;

    let view = tasks::create_task(
        state.store.as_ref(),
        auth.user_id,
        NewTask {
            title: req.title,
            description: req.description,
            project_id: req.project_id,
            assigned_to: req.assigned_to,
            priority: req.priority,
            due_date: req.due_date,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(TaskResponse {
            success: true,
            message: Some("Task created successfully".to_string()),
            task: view,
        }),
    ))
}

/// Lists tasks assigned to the requester
pub async fn my_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<TaskListResponse>> {
    let views = tasks::my_tasks(state.store.as_ref(), auth.user_id).await?;

    Ok(Json(TaskListResponse {
        success: true,
        count: views.len(),
        tasks: views,
    }))
}

/// Lists a project's tasks (members only)
pub async fn project_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<TaskListResponse>> {
    let views = tasks::project_tasks(state.store.as_ref(), auth.user_id, project_id).await?;

    Ok(Json(TaskListResponse {
        success: true,
        count: views.len(),
        tasks: views,
    }))
}

/// Updates a task's fields
///
/// # Errors
///
/// - `400 Bad Request`: Blank title
/// - `403 Forbidden`: Requester is neither a project member nor the assignee
/// - `404 Not Found`: No such task
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let view = tasks::update_task(
        state.store.as_ref(),
        auth.user_id,
        id,
        UpdateTask {
            title: req.title,
            description: req.description,
            assigned_to: req.assigned_to,
            priority: req.priority,
            due_date: req.due_date,
        },
    )
    .await?;

    Ok(Json(TaskResponse {
        success: true,
        message: Some("Task updated successfully".to_string()),
        task: view,
    }))
}

/// Changes a task's status
///
/// Any status can move to any other status; the only check is that the
/// value names a real status.
///
/// # Errors
///
/// - `400 Bad Request`: Unknown status value
/// - `403 Forbidden`: Requester is neither a project member nor the assignee
/// - `404 Not Found`: No such task
pub async fn set_task_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let status: TaskStatus = req
        .status
        .parse()
        .map_err(DomainError::Validation)?;

    let view = tasks::set_status(state.store.as_ref(), auth.user_id, id, status).await?;

    Ok(Json(TaskResponse {
        success: true,
        message: Some("Task status updated successfully".to_string()),
        task: view,
    }))
}

/// Deletes a task
///
/// # Errors
///
/// - `403 Forbidden`: Requester is neither a project member nor the assignee
/// - `404 Not Found`: No such task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    tasks::delete_task(state.store.as_ref(), auth.user_id, id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Task deleted successfully".to_string(),
    }))
}
