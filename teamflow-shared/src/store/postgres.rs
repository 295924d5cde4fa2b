/// PostgreSQL store
///
/// Persistent implementation of [`Store`] on top of sqlx. Projects are
/// stored as a row plus a `project_members` table and reassembled into the
/// embedded-members shape on read.
///
/// All queries are runtime-checked `query_as` calls; schema lives in
/// `migrations/`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::project::{
    CreateProject, Project, ProjectMember, ProjectStatus, UpdateProject,
};
use crate::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::models::user::{CreateUser, User};

/// Project row without its membership list
#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    status: ProjectStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProjectRow {
    fn into_project(self, members: Vec<ProjectMember>) -> Project {
        Project {
            id: self.id,
            name: self.name,
            description: self.description,
            status: self.status,
            members,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL implementation of [`Store`]
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to PostgreSQL and builds the pool
    ///
    /// Keeps a couple of warm connections and bounds acquisition so a
    /// saturated pool fails requests instead of queueing forever.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(2)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(url)
            .await?;

        Ok(Self { pool })
    }

    /// Exposes the pool for migrations
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn members_of(&self, project_id: Uuid) -> StoreResult<Vec<ProjectMember>> {
        let members = sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT user_id, role, joined_at
            FROM project_members
            WHERE project_id = $1
            ORDER BY joined_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}

/// Maps unique-violation on the users email index to `Duplicate`
fn map_user_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if let Some(constraint) = db_err.constraint() {
            if constraint.contains("email") {
                return StoreError::Duplicate("email");
            }
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role, avatar_color)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, role, avatar_color,
                      created_at, updated_at, last_login_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .bind(data.avatar_color)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_insert_error)?;

        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, avatar_color,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, avatar_color,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, avatar_color,
                   created_at, updated_at, last_login_at
            FROM users
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn touch_last_login(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_project(&self, data: CreateProject) -> StoreResult<Project> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, status, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .fetch_one(&self.pool)
        .await?;

        for member in &data.members {
            sqlx::query(
                r#"
                INSERT INTO project_members (project_id, user_id, role, joined_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(row.id)
            .bind(member.user_id)
            .bind(member.role)
            .bind(member.joined_at)
            .execute(&self.pool)
            .await?;
        }

        Ok(row.into_project(data.members))
    }

    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, description, status, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let members = self.members_of(row.id).await?;
                Ok(Some(row.into_project(members)))
            }
            None => Ok(None),
        }
    }

    async fn list_projects_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT p.id, p.name, p.description, p.status, p.created_at, p.updated_at
            FROM projects p
            JOIN project_members m ON m.project_id = p.id
            WHERE m.user_id = $1
            ORDER BY p.updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut projects = Vec::with_capacity(rows.len());
        for row in rows {
            let members = self.members_of(row.id).await?;
            projects.push(row.into_project(members));
        }
        Ok(projects)
    }

    async fn update_project(&self, id: Uuid, data: UpdateProject) -> StoreResult<Option<Project>> {
        // Dynamic update: only bind the fields that are present. For the
        // nullable description the inner Option is bound directly, so
        // Some(None) writes NULL and clears the column.
        let mut query = String::from("UPDATE projects SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, name, description, status, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, ProjectRow>(&query).bind(id);
        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }

        let row = q.fetch_optional(&self.pool).await?;
        match row {
            Some(row) => {
                let members = self.members_of(row.id).await?;
                Ok(Some(row.into_project(members)))
            }
            None => Ok(None),
        }
    }

    async fn delete_project(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_member(&self, project_id: Uuid, member: ProjectMember) -> StoreResult<bool> {
        // Bumping updated_at doubles as the existence check
        let touched = sqlx::query("UPDATE projects SET updated_at = NOW() WHERE id = $1")
            .bind(project_id)
            .execute(&self.pool)
            .await?;
        if touched.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO project_members (project_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(project_id)
        .bind(member.user_id)
        .bind(member.role)
        .bind(member.joined_at)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    async fn remove_member(&self, project_id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            sqlx::query("UPDATE projects SET updated_at = NOW() WHERE id = $1")
                .bind(project_id)
                .execute(&self.pool)
                .await?;
        }
        Ok(removed)
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, priority, project_id, assigned_to, created_by, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, status, priority, project_id,
                      assigned_to, created_by, due_date, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.project_id)
        .bind(data.assigned_to)
        .bind(data.created_by)
        .bind(data.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, project_id,
                   assigned_to, created_by, due_date, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn list_tasks_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, project_id,
                   assigned_to, created_by, due_date, created_at, updated_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY due_date ASC NULLS LAST, created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn list_tasks_by_assignee(&self, user_id: Uuid) -> StoreResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, project_id,
                   assigned_to, created_by, due_date, created_at, updated_at
            FROM tasks
            WHERE assigned_to = $1
            ORDER BY due_date ASC NULLS LAST, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTask) -> StoreResult<Option<Task>> {
        // Same dynamic shape as update_project; the nullable fields bind
        // their inner Option, so Some(None) writes NULL.
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.assigned_to.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assigned_to = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, title, description, status, priority, project_id, \
             assigned_to, created_by, due_date, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);
        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(assigned_to) = data.assigned_to {
            q = q.bind(assigned_to);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }

        let task = q.fetch_optional(&self.pool).await?;
        Ok(task)
    }

    async fn set_task_status(&self, id: Uuid, status: TaskStatus) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, priority, project_id,
                      assigned_to, created_by, due_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_tasks_by_project(&self, project_id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
