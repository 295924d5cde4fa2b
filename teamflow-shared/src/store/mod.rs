/// Storage abstraction
///
/// All persistence sits behind the object-safe [`Store`] trait so business
/// logic never reaches storage-specific state directly. Two implementations
/// exist, selected at startup:
///
/// - [`postgres::PgStore`]: the persistent backend (sqlx/PostgreSQL)
/// - [`memory::MemStore`]: an in-memory double used by tests and for
///   development without a database
///
/// The store serializes per-document writes at the storage layer; there is
/// no application-level locking. Invariant checks (duplicate member, last
/// admin) are performed read-then-write by the services, so two truly
/// concurrent membership mutations on one project can race. Known
/// limitation at this system's scale.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::project::{CreateProject, Project, ProjectMember, UpdateProject};
use crate::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::models::user::{CreateUser, User};

pub use memory::MemStore;
pub use postgres::PgStore;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique value (e.g. user email) already exists
    #[error("{0}")]
    Duplicate(&'static str),

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent store interface
///
/// Create/find/update/delete by identifier plus the filtered listings the
/// services need. Reference population (member profiles, task assignees) is
/// done by the services on top of these primitives.
#[async_trait]
pub trait Store: Send + Sync {
    // --- users ---

    /// Creates a user; fails with `Duplicate` if the email is taken
    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;

    /// Finds a user by ID
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Finds a user by email
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Lists all users, ordered by name
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Stamps the user's last login time; returns false if the user is gone
    async fn touch_last_login(&self, id: Uuid) -> StoreResult<bool>;

    // --- projects ---

    /// Creates a project with its initial membership entries
    async fn create_project(&self, data: CreateProject) -> StoreResult<Project>;

    /// Finds a project (members included) by ID
    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>>;

    /// Lists projects the user is a member of, most recently updated first
    async fn list_projects_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Project>>;

    /// Updates project fields; returns None if the project is gone
    async fn update_project(&self, id: Uuid, data: UpdateProject) -> StoreResult<Option<Project>>;

    /// Deletes the project record; returns false if it didn't exist
    ///
    /// Does NOT touch tasks. Callers must delete dependent tasks first so a
    /// mid-operation failure leaves orphaned tasks pointing at a live
    /// project rather than tasks pointing at a vanished one.
    async fn delete_project(&self, id: Uuid) -> StoreResult<bool>;

    /// Appends a membership entry; returns false if the project is gone
    async fn add_member(&self, project_id: Uuid, member: ProjectMember) -> StoreResult<bool>;

    /// Removes a membership entry; returns false if it wasn't present
    async fn remove_member(&self, project_id: Uuid, user_id: Uuid) -> StoreResult<bool>;

    // --- tasks ---

    /// Creates a task
    async fn create_task(&self, data: CreateTask) -> StoreResult<Task>;

    /// Finds a task by ID
    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>>;

    /// Lists tasks for a project, by due date then newest first
    async fn list_tasks_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>>;

    /// Lists tasks assigned to a user, by due date then newest first
    async fn list_tasks_by_assignee(&self, user_id: Uuid) -> StoreResult<Vec<Task>>;

    /// Updates task fields; returns None if the task is gone
    async fn update_task(&self, id: Uuid, data: UpdateTask) -> StoreResult<Option<Task>>;

    /// Sets only the status field; returns None if the task is gone
    async fn set_task_status(&self, id: Uuid, status: TaskStatus) -> StoreResult<Option<Task>>;

    /// Deletes a task; returns false if it didn't exist
    async fn delete_task(&self, id: Uuid) -> StoreResult<bool>;

    /// Deletes every task referencing the project; returns the count
    async fn delete_tasks_by_project(&self, project_id: Uuid) -> StoreResult<u64>;

    // --- health ---

    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;
}
