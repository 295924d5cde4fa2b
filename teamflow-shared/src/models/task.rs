/// Task model
///
/// Tasks reference exactly one project (immutable after creation) and
/// optionally an assignee. They are created only when the project reference
/// resolves, and deleted explicitly or when their owning project is deleted.
///
/// # Status model
///
/// Status is deliberately loose: any value in the enum is a legal target
/// from any other, including reopening a done task. The only validation is
/// enum membership; there is no guarded transition function.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('todo', 'in_progress', 'done', 'blocked');
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'todo',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     assigned_to UUID,
///     created_by UUID NOT NULL,
///     due_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserProfile;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started (default)
    Todo,

    /// Being worked on
    InProgress,

    /// Finished; may be reopened
    Done,

    /// Waiting on something external
    Blocked,
}

impl TaskStatus {
    /// Converts status to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    /// Parses a status value from a request body
    ///
    /// Anything outside the enum is rejected with the full list of accepted
    /// values, so clients get an actionable message.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            "blocked" => Ok(TaskStatus::Blocked),
            other => Err(format!(
                "invalid status '{}': must be one of todo, in_progress, done, blocked",
                other
            )),
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority
    Low,

    /// Medium priority (default)
    Medium,

    /// High priority
    High,
}

impl TaskPriority {
    /// Converts priority to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title (required)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Owning project; immutable after creation
    pub project_id: Uuid,

    /// Optional assignee
    pub assigned_to: Option<Uuid>,

    /// User who created the task
    pub created_by: Uuid,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title
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
    pub due_date: Option<DateTime<Utc>>,

    /// Creating user
    pub created_by: Uuid,
}

/// Input for updating task fields
///
/// `None` fields are left unchanged. The nullable fields use a second
/// `Option` layer so `Some(None)` clears the stored value, which is how an
/// explicit JSON `null` unassigns a task or drops its due date. The owning
/// project cannot change.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description; `Some(None)` clears it
    pub description: Option<Option<String>>,

    /// New assignee; `Some(None)` unassigns
    pub assigned_to: Option<Option<Uuid>>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New due date; `Some(None)` clears it
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Lightweight project reference populated into task payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Project ID
    pub id: Uuid,

    /// Project name
    pub name: String,
}

/// Task read payload with references populated
///
/// Assignee and creator resolve to profile fields; a reference whose user
/// has since left the directory populates as `None` rather than failing the
/// read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskView {
    /// Task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Owning project reference
    pub project: ProjectRef,

    /// Assignee profile, if assigned and still present in the directory
    pub assigned_to: Option<UserProfile>,

    /// Creator profile, if still present in the directory
    pub created_by: Option<UserProfile>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str_accepts_enum_values() {
        assert_eq!("todo".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!(
            "in_progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert_eq!(
            "blocked".parse::<TaskStatus>().unwrap(),
            TaskStatus::Blocked
        );
    }

    #[test]
    fn test_status_from_str_rejects_unknown_values() {
        let err = "archived".parse::<TaskStatus>().unwrap_err();
        assert!(err.contains("archived"));
        assert!(err.contains("in_progress"));

        assert!("".parse::<TaskStatus>().is_err());
        assert!("DONE".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
