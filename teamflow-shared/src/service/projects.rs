/// Project service
///
/// Creation, listing, reads with task population, field updates, and the
/// cascading delete. Every operation resolves the project first, asks the
/// access evaluator for a decision, and only then touches the store.

use chrono::Utc;
use uuid::Uuid;

use crate::access::{authorize_project, ProjectAction};
use crate::error::{DomainError, DomainResult};
use crate::models::project::{
    CreateProject, MemberRole, Project, ProjectMember, ProjectView, UpdateProject,
};
use crate::models::task::TaskView;
use crate::service::{members, tasks};
use crate::store::Store;

/// Input for creating a project
#[derive(Debug, Clone)]
pub struct NewProject {
    /// Project name (required, non-empty)
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}

/// Single-project read payload: the project plus its tasks
#[derive(Debug, Clone)]
pub struct ProjectDetail {
    /// The project with members populated
    pub project: ProjectView,

    /// The project's tasks with references populated
    pub tasks: Vec<TaskView>,
}

async fn to_view(store: &dyn Store, project: Project) -> DomainResult<ProjectView> {
    let members = members::populate_members(store, &project).await?;
    Ok(ProjectView {
        id: project.id,
        name: project.name,
        description: project.description,
        status: project.status,
        members,
        created_at: project.created_at,
        updated_at: project.updated_at,
    })
}

/// Creates a project with the creator auto-added as an admin member
pub async fn create_project(
    store: &dyn Store,
    actor: Uuid,
    input: NewProject,
) -> DomainResult<ProjectView> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("Project name is required"));
    }

    let project = store
        .create_project(CreateProject {
            name: name.to_string(),
            description: input.description,
            members: vec![ProjectMember {
                user_id: actor,
                role: MemberRole::Admin,
                joined_at: Utc::now(),
            }],
        })
        .await?;

    tracing::info!(project_id = %project.id, creator = %actor, "project created");

    to_view(store, project).await
}

/// Lists the requester's projects, most recently updated first
pub async fn list_projects(store: &dyn Store, actor: Uuid) -> DomainResult<Vec<ProjectView>> {
    let projects = store.list_projects_for_user(actor).await?;

    let mut views = Vec::with_capacity(projects.len());
    for project in projects {
        views.push(to_view(store, project).await?);
    }
    Ok(views)
}

/// Fetches one project together with its tasks
///
/// Requires membership; the project's existence is not hidden from
/// authenticated non-members.
pub async fn get_project(
    store: &dyn Store,
    actor: Uuid,
    project_id: Uuid,
) -> DomainResult<ProjectDetail> {
    let project = store
        .find_project(project_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Project not found"))?;

    authorize_project(&project, actor, ProjectAction::View)?;

    let task_records = store.list_tasks_by_project(project_id).await?;
    let mut task_views = Vec::with_capacity(task_records.len());
    for task in task_records {
        task_views.push(tasks::view_of(store, task, &project).await?);
    }

    Ok(ProjectDetail {
        project: to_view(store, project).await?,
        tasks: task_views,
    })
}

/// Updates project fields (admin only)
pub async fn update_project(
    store: &dyn Store,
    actor: Uuid,
    project_id: Uuid,
    changes: UpdateProject,
) -> DomainResult<ProjectView> {
    if let Some(ref name) = changes.name {
        if name.trim().is_empty() {
            return Err(DomainError::validation("Project name is required"));
        }
    }

    let project = store
        .find_project(project_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Project not found"))?;

    authorize_project(&project, actor, ProjectAction::Update)?;

    let updated = store
        .update_project(project_id, changes)
        .await?
        .ok_or_else(|| DomainError::not_found("Project not found"))?;

    to_view(store, updated).await
}

/// Deletes a project and all of its tasks (admin only)
///
/// Tasks are deleted before the project record: a failure in between leaves
/// orphaned tasks pointing at a live project, which is recoverable, rather
/// than tasks referencing a vanished project.
pub async fn delete_project(store: &dyn Store, actor: Uuid, project_id: Uuid) -> DomainResult<()> {
    let project = store
        .find_project(project_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Project not found"))?;

    authorize_project(&project, actor, ProjectAction::Delete)?;

    let removed_tasks = store.delete_tasks_by_project(project_id).await?;
    store.delete_project(project_id).await?;

    tracing::info!(
        project_id = %project_id,
        removed_tasks,
        "project deleted with task cascade"
    );

    Ok(())
}
