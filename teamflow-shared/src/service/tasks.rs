/// Task service
///
/// Task creation, listings, direct status updates, field updates, and
/// deletion. Edit rights extend to the task's assignee even when their
/// project membership has been removed (orphaned assignments keep
/// working).

use uuid::Uuid;

use crate::access::{authorize_project, authorize_task_edit, ProjectAction};
use crate::error::{DomainError, DomainResult};
use crate::models::project::Project;
use crate::models::task::{
    CreateTask, ProjectRef, Task, TaskPriority, TaskStatus, TaskView, UpdateTask,
};
use crate::store::Store;

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Task title (required, non-empty)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning project
    pub project_id: Uuid,

    /// Optional assignee
    pub assigned_to: Option<Uuid>,

    /// Priority (defaults to medium)
    pub priority: TaskPriority,

    /// Optional due date
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// Populates a task's references against a known project
///
/// Assignee or creator profiles resolve to `None` when the user has left
/// the directory; the read still succeeds.
pub(crate) async fn view_of(
    store: &dyn Store,
    task: Task,
    project: &Project,
) -> DomainResult<TaskView> {
    let assigned_to = match task.assigned_to {
        Some(user_id) => store.find_user(user_id).await?.map(|u| u.profile()),
        None => None,
    };
    let created_by = store.find_user(task.created_by).await?.map(|u| u.profile());

    Ok(TaskView {
        id: task.id,
        title: task.title,
        description: task.description,
        status: task.status,
        priority: task.priority,
        project: ProjectRef {
            id: project.id,
            name: project.name.clone(),
        },
        assigned_to,
        created_by,
        due_date: task.due_date,
        created_at: task.created_at,
        updated_at: task.updated_at,
    })
}

/// Loads the owning project of a task, failing with `NotFound` if gone
async fn owning_project(store: &dyn Store, task: &Task) -> DomainResult<Project> {
    store
        .find_project(task.project_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Project not found"))
}

/// Creates a task under a project
///
/// The project reference must resolve, and the actor must be a member. The
/// creating user is recorded as `created_by`.
pub async fn create_task(store: &dyn Store, actor: Uuid, input: NewTask) -> DomainResult<TaskView> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(DomainError::validation("Task title is required"));
    }

    let project = store
        .find_project(input.project_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Project not found"))?;

    authorize_project(&project, actor, ProjectAction::CreateTask)?;

    let task = store
        .create_task(CreateTask {
            title: title.to_string(),
            description: input.description,
            project_id: input.project_id,
            assigned_to: input.assigned_to,
            priority: input.priority,
            due_date: input.due_date,
            created_by: actor,
        })
        .await?;

    tracing::info!(task_id = %task.id, project_id = %project.id, "task created");

    view_of(store, task, &project).await
}

/// Lists tasks assigned to the requester across all projects
pub async fn my_tasks(store: &dyn Store, actor: Uuid) -> DomainResult<Vec<TaskView>> {
    let records = store.list_tasks_by_assignee(actor).await?;

    let mut views = Vec::with_capacity(records.len());
    for task in records {
        // A task can outlive its project only transiently (mid-cascade);
        // skip rather than fail the whole listing
        let Some(project) = store.find_project(task.project_id).await? else {
            continue;
        };
        views.push(view_of(store, task, &project).await?);
    }
    Ok(views)
}

/// Lists a project's tasks (members only)
pub async fn project_tasks(
    store: &dyn Store,
    actor: Uuid,
    project_id: Uuid,
) -> DomainResult<Vec<TaskView>> {
    let project = store
        .find_project(project_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Project not found"))?;

    authorize_project(&project, actor, ProjectAction::View)?;

    let records = store.list_tasks_by_project(project_id).await?;
    let mut views = Vec::with_capacity(records.len());
    for task in records {
        views.push(view_of(store, task, &project).await?);
    }
    Ok(views)
}

/// Sets a task's status
///
/// Status is a plain attribute: any enum value is a legal target from any
/// source state. Enum membership is validated at the API boundary before
/// this is called.
pub async fn set_status(
    store: &dyn Store,
    actor: Uuid,
    task_id: Uuid,
    status: TaskStatus,
) -> DomainResult<TaskView> {
    let task = store
        .find_task(task_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Task not found"))?;
    let project = owning_project(store, &task).await?;

    authorize_task_edit(&project, &task, actor)?;

    let updated = store
        .set_task_status(task_id, status)
        .await?
        .ok_or_else(|| DomainError::not_found("Task not found"))?;

    view_of(store, updated, &project).await
}

/// Updates task fields
///
/// The owning project reference is immutable; only title, description,
/// assignee, priority, and due date can change.
pub async fn update_task(
    store: &dyn Store,
    actor: Uuid,
    task_id: Uuid,
    changes: UpdateTask,
) -> DomainResult<TaskView> {
    if let Some(ref title) = changes.title {
        if title.trim().is_empty() {
            return Err(DomainError::validation("Task title is required"));
        }
    }

    let task = store
        .find_task(task_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Task not found"))?;
    let project = owning_project(store, &task).await?;

    authorize_task_edit(&project, &task, actor)?;

    let updated = store
        .update_task(task_id, changes)
        .await?
        .ok_or_else(|| DomainError::not_found("Task not found"))?;

    view_of(store, updated, &project).await
}

/// Deletes a task
pub async fn delete_task(store: &dyn Store, actor: Uuid, task_id: Uuid) -> DomainResult<()> {
    let task = store
        .find_task(task_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Task not found"))?;
    let project = owning_project(store, &task).await?;

    authorize_task_edit(&project, &task, actor)?;

    store.delete_task(task_id).await?;

    tracing::info!(task_id = %task_id, "task deleted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::MemberRole;
    use crate::models::user::{CreateUser, User, UserRole};
    use crate::service::members::{self, AddMember};
    use crate::service::projects::{self, NewProject};
    use crate::store::MemStore;

    async fn seed_user(store: &MemStore, name: &str) -> User {
        store
            .create_user(CreateUser {
                name: name.to_string(),
                email: format!("{}@teamflow.dev", name.to_lowercase()),
                password_hash: "$argon2id$hash".to_string(),
                role: UserRole::Member,
                avatar_color: "bg-purple-500".to_string(),
            })
            .await
            .unwrap()
    }

    async fn seed_project(store: &MemStore, admin: Uuid) -> Uuid {
        projects::create_project(
            store,
            admin,
            NewProject {
                name: "Launch".to_string(),
                description: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    fn new_task(project_id: Uuid, assigned_to: Option<Uuid>) -> NewTask {
        NewTask {
            title: "Write copy".to_string(),
            description: None,
            project_id,
            assigned_to,
            priority: Default::default(),
            due_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_task_populates_references() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let bob = seed_user(&store, "Bob").await;
        let project_id = seed_project(&store, alice.id).await;
        members::add_member(
            &store,
            alice.id,
            project_id,
            AddMember {
                user_id: bob.id,
                role: MemberRole::Member,
            },
        )
        .await
        .unwrap();

        let view = create_task(&store, alice.id, new_task(project_id, Some(bob.id)))
            .await
            .unwrap();

        assert_eq!(view.status, TaskStatus::Todo);
        assert_eq!(view.project.name, "Launch");
        assert_eq!(view.assigned_to.as_ref().unwrap().name, "Bob");
        assert_eq!(view.created_by.as_ref().unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_create_task_requires_membership_and_project() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let mallory = seed_user(&store, "Mallory").await;
        let project_id = seed_project(&store, alice.id).await;

        assert!(matches!(
            create_task(&store, mallory.id, new_task(project_id, None)).await,
            Err(DomainError::AccessDenied(_))
        ));
        assert!(matches!(
            create_task(&store, alice.id, new_task(Uuid::new_v4(), None)).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let project_id = seed_project(&store, alice.id).await;

        let mut input = new_task(project_id, None);
        input.title = " ".to_string();
        assert!(matches!(
            create_task(&store, alice.id, input).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_status_can_move_freely_including_reopen() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let project_id = seed_project(&store, alice.id).await;
        let task = create_task(&store, alice.id, new_task(project_id, None))
            .await
            .unwrap();

        for status in [
            TaskStatus::InProgress,
            TaskStatus::Done,
            TaskStatus::Todo, // reopen
            TaskStatus::Blocked,
            TaskStatus::Done,
        ] {
            let view = set_status(&store, alice.id, task.id, status).await.unwrap();
            assert_eq!(view.status, status);
        }
    }

    #[tokio::test]
    async fn test_assignee_outside_project_can_edit_their_task() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let bob = seed_user(&store, "Bob").await;
        let project_id = seed_project(&store, alice.id).await;

        // Bob is assigned but never added as a member
        let task = create_task(&store, alice.id, new_task(project_id, Some(bob.id)))
            .await
            .unwrap();

        let view = set_status(&store, bob.id, task.id, TaskStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(view.status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn test_update_task_changes_only_present_fields() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let bob = seed_user(&store, "Bob").await;
        let project_id = seed_project(&store, alice.id).await;

        let mut input = new_task(project_id, Some(bob.id));
        input.due_date = Some(chrono::Utc::now() + chrono::Duration::days(3));
        let task = create_task(&store, alice.id, input).await.unwrap();

        let view = update_task(
            &store,
            alice.id,
            task.id,
            UpdateTask {
                title: Some("Write better copy".to_string()),
                priority: Some(TaskPriority::High),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(view.title, "Write better copy");
        assert_eq!(view.priority, TaskPriority::High);
        // Absent fields stay as they were
        assert_eq!(view.assigned_to.as_ref().unwrap().name, "Bob");
        assert!(view.due_date.is_some());

        let blank = update_task(
            &store,
            alice.id,
            task.id,
            UpdateTask {
                title: Some(" ".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(blank, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_task_explicit_null_clears_nullable_fields() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let bob = seed_user(&store, "Bob").await;
        let project_id = seed_project(&store, alice.id).await;

        let mut input = new_task(project_id, Some(bob.id));
        input.description = Some("Draft".to_string());
        input.due_date = Some(chrono::Utc::now() + chrono::Duration::days(3));
        let task = create_task(&store, alice.id, input).await.unwrap();

        let view = update_task(
            &store,
            alice.id,
            task.id,
            UpdateTask {
                description: Some(None),
                assigned_to: Some(None),
                due_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(view.assigned_to.is_none(), "assignee was not cleared");
        assert!(view.description.is_none());
        assert!(view.due_date.is_none());

        // The cleared task no longer shows up in Bob's assignments
        assert!(my_tasks(&store, bob.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_my_tasks_lists_only_assigned() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let bob = seed_user(&store, "Bob").await;
        let project_id = seed_project(&store, alice.id).await;

        create_task(&store, alice.id, new_task(project_id, Some(bob.id)))
            .await
            .unwrap();
        create_task(&store, alice.id, new_task(project_id, None))
            .await
            .unwrap();

        assert_eq!(my_tasks(&store, bob.id).await.unwrap().len(), 1);
        assert!(my_tasks(&store, alice.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_outsider_cannot_edit_or_delete() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let mallory = seed_user(&store, "Mallory").await;
        let project_id = seed_project(&store, alice.id).await;
        let task = create_task(&store, alice.id, new_task(project_id, None))
            .await
            .unwrap();

        assert!(matches!(
            set_status(&store, mallory.id, task.id, TaskStatus::Done).await,
            Err(DomainError::AccessDenied(_))
        ));
        assert!(matches!(
            delete_task(&store, mallory.id, task.id).await,
            Err(DomainError::AccessDenied(_))
        ));
        assert!(store.find_task(task.id).await.unwrap().is_some());
    }
}
