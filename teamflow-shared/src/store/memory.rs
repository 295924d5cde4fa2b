/// In-memory store
///
/// Test double and development backend. Holds everything in `HashMap`s
/// behind a single async `RwLock`, which also gives it the same
/// write-serialization guarantee the persistent backend provides per
/// document. Never reached directly by business logic; only through the
/// [`Store`] trait.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::project::{CreateProject, Project, ProjectMember, ProjectStatus, UpdateProject};
use crate::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::models::user::{CreateUser, User};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    projects: HashMap<Uuid, Project>,
    tasks: HashMap<Uuid, Task>,
}

/// In-memory implementation of [`Store`]
#[derive(Debug, Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

impl MemStore {
    /// Creates an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

/// Task list order: due date ascending (undated last), then newest first
fn task_order(a: &Task, b: &Task) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| b.created_at.cmp(&a.created_at))
}

#[async_trait]
impl Store for MemStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut inner = self.inner.write().await;

        let email_taken = inner
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&data.email));
        if email_taken {
            return Err(StoreError::Duplicate("email"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            role: data.role,
            avatar_color: data.avatar_color,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn touch_last_login(&self, id: Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&id) {
            Some(user) => {
                user.last_login_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create_project(&self, data: CreateProject) -> StoreResult<Project> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            status: ProjectStatus::default(),
            members: data.members,
            created_at: now,
            updated_at: now,
        };
        inner.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        let inner = self.inner.read().await;
        Ok(inner.projects.get(&id).cloned())
    }

    async fn list_projects_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Project>> {
        let inner = self.inner.read().await;
        let mut projects: Vec<Project> = inner
            .projects
            .values()
            .filter(|p| p.is_member(user_id))
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(projects)
    }

    async fn update_project(&self, id: Uuid, data: UpdateProject) -> StoreResult<Option<Project>> {
        let mut inner = self.inner.write().await;
        let Some(project) = inner.projects.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = data.name {
            project.name = name;
        }
        if let Some(description) = data.description {
            project.description = description;
        }
        if let Some(status) = data.status {
            project.status = status;
        }
        project.updated_at = Utc::now();

        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.projects.remove(&id).is_some())
    }

    async fn add_member(&self, project_id: Uuid, member: ProjectMember) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.projects.get_mut(&project_id) {
            Some(project) => {
                project.members.push(member);
                project.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_member(&self, project_id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let Some(project) = inner.projects.get_mut(&project_id) else {
            return Ok(false);
        };

        let before = project.members.len();
        project.members.retain(|m| m.user_id != user_id);
        let removed = project.members.len() < before;
        if removed {
            project.updated_at = Utc::now();
        }
        Ok(removed)
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            status: TaskStatus::default(),
            priority: data.priority,
            project_id: data.project_id,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            due_date: data.due_date,
            created_at: now,
            updated_at: now,
        };
        inner.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let inner = self.inner.read().await;
        Ok(inner.tasks.get(&id).cloned())
    }

    async fn list_tasks_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by(task_order);
        Ok(tasks)
    }

    async fn list_tasks_by_assignee(&self, user_id: Uuid) -> StoreResult<Vec<Task>> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| t.assigned_to == Some(user_id))
            .cloned()
            .collect();
        tasks.sort_by(task_order);
        Ok(tasks)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTask) -> StoreResult<Option<Task>> {
        let mut inner = self.inner.write().await;
        let Some(task) = inner.tasks.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = data.title {
            task.title = title;
        }
        if let Some(description) = data.description {
            task.description = description;
        }
        if let Some(assigned_to) = data.assigned_to {
            task.assigned_to = assigned_to;
        }
        if let Some(priority) = data.priority {
            task.priority = priority;
        }
        if let Some(due_date) = data.due_date {
            task.due_date = due_date;
        }
        task.updated_at = Utc::now();

        Ok(Some(task.clone()))
    }

    async fn set_task_status(&self, id: Uuid, status: TaskStatus) -> StoreResult<Option<Task>> {
        let mut inner = self.inner.write().await;
        let Some(task) = inner.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.status = status;
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.tasks.remove(&id).is_some())
    }

    async fn delete_tasks_by_project(&self, project_id: Uuid) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|_, t| t.project_id != project_id);
        Ok((before - inner.tasks.len()) as u64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
