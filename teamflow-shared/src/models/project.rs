/// Project model with embedded membership list
///
/// A project owns an ordered collection of membership entries, each binding
/// a user to a per-project role and a join timestamp. User IDs are unique
/// within one project's list; a user may belong to many projects
/// independently.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE project_status AS ENUM ('planning', 'active', 'completed', 'on_hold');
/// CREATE TYPE member_role AS ENUM ('admin', 'member');
///
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     description TEXT,
///     status project_status NOT NULL DEFAULT 'active',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE project_members (
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL,
///     role member_role NOT NULL DEFAULT 'member',
///     joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (project_id, user_id)
/// );
/// ```
///
/// `project_members.user_id` deliberately carries no foreign key to the user
/// directory: removing a user from the directory does not touch memberships,
/// and dangling references are filtered out when payloads are populated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;

/// Project lifecycle status
///
/// A plain attribute, not a state machine: any status is a legal target
/// value from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Still being scoped
    Planning,

    /// In progress (default)
    Active,

    /// Finished
    Completed,

    /// Paused
    OnHold,
}

impl ProjectStatus {
    /// Converts status to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on_hold",
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Active
    }
}

/// Per-project membership role
///
/// Distinct from the directory-level `UserRole`: an organization member can
/// be an admin of one project and a plain member of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "member_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// May update project fields, manage members, and delete the project
    Admin,

    /// May view the project and work with its tasks
    Member,
}

impl MemberRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "admin",
            MemberRole::Member => "member",
        }
    }
}

impl Default for MemberRole {
    fn default() -> Self {
        MemberRole::Member
    }
}

/// Membership entry binding a user to a project-scoped role
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectMember {
    /// Referenced user ID
    pub user_id: Uuid,

    /// Role within this project
    pub role: MemberRole,

    /// When the user joined the project
    pub joined_at: DateTime<Utc>,
}

/// Project record with its embedded membership list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Project name (required, non-empty)
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Lifecycle status
    pub status: ProjectStatus,

    /// Ordered membership list; no duplicate user IDs
    pub members: Vec<ProjectMember>,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Finds the requester's membership entry, if any
    pub fn member(&self, user_id: Uuid) -> Option<&ProjectMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    /// Checks whether the user appears in the membership list
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.member(user_id).is_some()
    }

    /// Checks whether the user's membership entry has the admin role
    pub fn is_admin(&self, user_id: Uuid) -> bool {
        self.member(user_id)
            .map(|m| m.role == MemberRole::Admin)
            .unwrap_or(false)
    }

    /// Counts admin-role membership entries
    pub fn admin_count(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.role == MemberRole::Admin)
            .count()
    }
}

/// Input for creating a new project
///
/// The initial membership list is supplied by the caller; the project
/// service seeds it with the creator as an admin entry.
#[derive(Debug, Clone)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial membership entries
    pub members: Vec<ProjectMember>,
}

/// Input for updating project fields
///
/// `None` fields are left unchanged. The description carries a second
/// `Option` layer so `Some(None)` clears it, mapping an explicit JSON `null`
/// to a stored NULL.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    /// New name
    pub name: Option<String>,

    /// New description; `Some(None)` clears it
    pub description: Option<Option<String>>,

    /// New status
    pub status: Option<ProjectStatus>,
}

/// Membership entry enriched with the referenced user's profile fields
///
/// Returned by member listings and the add-member operation so clients can
/// render the member without a second lookup. `role` here is the
/// project-scoped role; `user_role` is the directory-level one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberProfile {
    /// Referenced user ID
    pub user_id: Uuid,

    /// User display name
    pub name: String,

    /// User email
    pub email: String,

    /// Directory-level role of the user
    pub user_role: UserRole,

    /// Avatar display color
    pub avatar_color: String,

    /// Project-scoped membership role
    pub role: MemberRole,

    /// When the user joined the project
    pub joined_at: DateTime<Utc>,
}

/// Project read payload with members populated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectView {
    /// Project ID
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Lifecycle status
    pub status: ProjectStatus,

    /// Membership entries with user profiles populated
    pub members: Vec<MemberProfile>,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with(members: Vec<ProjectMember>) -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "Launch".to_string(),
            description: None,
            status: ProjectStatus::Active,
            members,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn entry(user_id: Uuid, role: MemberRole) -> ProjectMember {
        ProjectMember {
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn test_membership_lookups() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let outsider = Uuid::new_v4();

        let project = project_with(vec![
            entry(alice, MemberRole::Admin),
            entry(bob, MemberRole::Member),
        ]);

        assert!(project.is_member(alice));
        assert!(project.is_member(bob));
        assert!(!project.is_member(outsider));

        assert!(project.is_admin(alice));
        assert!(!project.is_admin(bob));
        assert!(!project.is_admin(outsider));

        assert_eq!(project.admin_count(), 1);
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&ProjectStatus::OnHold).unwrap();
        assert_eq!(json, "\"on_hold\"");

        let status: ProjectStatus = serde_json::from_str("\"planning\"").unwrap();
        assert_eq!(status, ProjectStatus::Planning);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::Active);
        assert_eq!(MemberRole::default(), MemberRole::Member);
    }
}
