/// User directory model
///
/// Users are identity records created at registration. They are never
/// auto-deleted by other entities; project memberships reference them by ID.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('admin', 'project_manager', 'member');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL, -- unique index on LOWER(email)
///     password_hash VARCHAR(255) NOT NULL,
///     role user_role NOT NULL DEFAULT 'member',
///     avatar_color VARCHAR(50) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```
///
/// The directory-level `role` is distinct from the per-project membership
/// role: it describes the user's standing in the organization, not their
/// rights on any particular project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directory-level user role
///
/// Carries no project-scoped authority; project permissions come from
/// membership entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Organization administrator
    Admin,

    /// Project manager
    ProjectManager,

    /// Regular member
    Member,
}

impl UserRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::ProjectManager => "project_manager",
            UserRole::Member => "member",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Member
    }
}

/// User account record
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Directory-level role
    pub role: UserRole,

    /// Display hint for the frontend avatar; no behavioral meaning
    pub avatar_color: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,

    /// When the user last logged in (None if never)
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Returns the public profile view of this user
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            avatar_color: self.avatar_color.clone(),
        }
    }
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address (must be unique)
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    /// Directory-level role
    #[serde(default)]
    pub role: UserRole,

    /// Avatar display color
    pub avatar_color: String,
}

/// Public profile fields of a user
///
/// This is the shape populated into project member lists and task
/// assignee/creator references. The credential hash is never included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Directory-level role
    pub role: UserRole,

    /// Avatar display color
    pub avatar_color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_as_str() {
        assert_eq!(UserRole::Admin.as_str(), "admin");
        assert_eq!(UserRole::ProjectManager.as_str(), "project_manager");
        assert_eq!(UserRole::Member.as_str(), "member");
    }

    #[test]
    fn test_user_role_serde_snake_case() {
        let json = serde_json::to_string(&UserRole::ProjectManager).unwrap();
        assert_eq!(json, "\"project_manager\"");

        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_profile_excludes_credentials() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@teamflow.dev".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: UserRole::Member,
            avatar_color: "bg-blue-500".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        };

        let profile = user.profile();
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "alice@teamflow.dev");
    }
}
