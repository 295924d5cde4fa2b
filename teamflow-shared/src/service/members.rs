/// Membership mutation service
///
/// Adds and removes project members, enforcing the membership invariants:
///
/// - no duplicate user IDs within one project's membership list
/// - a project that has at least one admin keeps at least one admin
///
/// Both checks are read-then-write without a transaction; the narrow race
/// under true concurrency is a documented limitation, not something the
/// service guards against.

use chrono::Utc;
use uuid::Uuid;

use crate::access::{authorize_project, ProjectAction};
use crate::error::{DomainError, DomainResult};
use crate::models::project::{MemberProfile, MemberRole, Project, ProjectMember};
use crate::store::Store;

/// Input for adding a member to a project
#[derive(Debug, Clone)]
pub struct AddMember {
    /// User to add
    pub user_id: Uuid,

    /// Project-scoped role to grant
    pub role: MemberRole,
}

/// Resolves membership entries into enriched member records
///
/// Entries whose user has been removed from the directory are filtered out
/// rather than failing the read (dangling references are tolerated).
pub(crate) async fn populate_members(
    store: &dyn Store,
    project: &Project,
) -> DomainResult<Vec<MemberProfile>> {
    let mut members = Vec::with_capacity(project.members.len());
    for entry in &project.members {
        let Some(user) = store.find_user(entry.user_id).await? else {
            tracing::debug!(
                project_id = %project.id,
                user_id = %entry.user_id,
                "skipping dangling membership reference"
            );
            continue;
        };
        members.push(MemberProfile {
            user_id: user.id,
            name: user.name,
            email: user.email,
            user_role: user.role,
            avatar_color: user.avatar_color,
            role: entry.role,
            joined_at: entry.joined_at,
        });
    }
    Ok(members)
}

/// Lists a project's members with user profiles populated
///
/// Requires the requester to be a member of the project.
pub async fn list_members(
    store: &dyn Store,
    requester: Uuid,
    project_id: Uuid,
) -> DomainResult<Vec<MemberProfile>> {
    let project = store
        .find_project(project_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Project not found"))?;

    authorize_project(&project, requester, ProjectAction::View)?;

    populate_members(store, &project).await
}

/// Adds a member to a project
///
/// Fails with `NotFound` if the project or user does not exist, with
/// `AccessDenied` if the requester is not a project admin, and with
/// `Conflict` if the user is already a member. On success returns the new
/// member enriched with profile fields.
pub async fn add_member(
    store: &dyn Store,
    requester: Uuid,
    project_id: Uuid,
    input: AddMember,
) -> DomainResult<MemberProfile> {
    let project = store
        .find_project(project_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Project not found"))?;

    authorize_project(&project, requester, ProjectAction::ManageMembers)?;

    let user = store
        .find_user(input.user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User not found"))?;

    if project.is_member(input.user_id) {
        return Err(DomainError::conflict(
            "User is already a member of this project",
        ));
    }

    let entry = ProjectMember {
        user_id: input.user_id,
        role: input.role,
        joined_at: Utc::now(),
    };

    if !store.add_member(project_id, entry.clone()).await? {
        return Err(DomainError::not_found("Project not found"));
    }

    tracing::info!(
        project_id = %project_id,
        user_id = %entry.user_id,
        role = entry.role.as_str(),
        "member added"
    );

    Ok(MemberProfile {
        user_id: user.id,
        name: user.name,
        email: user.email,
        user_role: user.role,
        avatar_color: user.avatar_color,
        role: entry.role,
        joined_at: entry.joined_at,
    })
}

/// Removes a member from a project
///
/// Fails with `NotFound` if the project does not exist or the user is not a
/// member, and with `Conflict` if removal would leave a project that has
/// admins with zero of them. Tasks assigned to the removed user are left
/// untouched; orphaned assignments are tolerated.
pub async fn remove_member(
    store: &dyn Store,
    requester: Uuid,
    project_id: Uuid,
    target: Uuid,
) -> DomainResult<()> {
    let project = store
        .find_project(project_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Project not found"))?;

    authorize_project(&project, requester, ProjectAction::ManageMembers)?;

    let entry = project
        .member(target)
        .ok_or_else(|| DomainError::not_found("User is not a member of this project"))?;

    // A project with zero admins already is unrestricted
    if entry.role == MemberRole::Admin && project.admin_count() == 1 {
        return Err(DomainError::conflict(
            "Cannot remove the last admin of a project",
        ));
    }

    if !store.remove_member(project_id, target).await? {
        return Err(DomainError::not_found("User is not a member of this project"));
    }

    tracing::info!(project_id = %project_id, user_id = %target, "member removed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::CreateProject;
    use crate::models::user::{CreateUser, User, UserRole};
    use crate::store::MemStore;

    async fn seed_user(store: &MemStore, name: &str) -> User {
        store
            .create_user(CreateUser {
                name: name.to_string(),
                email: format!("{}@teamflow.dev", name.to_lowercase()),
                password_hash: "$argon2id$hash".to_string(),
                role: UserRole::Member,
                avatar_color: "bg-blue-500".to_string(),
            })
            .await
            .unwrap()
    }

    async fn seed_project(store: &MemStore, admins: &[Uuid], members: &[Uuid]) -> Project {
        let mut entries = Vec::new();
        for id in admins {
            entries.push(ProjectMember {
                user_id: *id,
                role: MemberRole::Admin,
                joined_at: Utc::now(),
            });
        }
        for id in members {
            entries.push(ProjectMember {
                user_id: *id,
                role: MemberRole::Member,
                joined_at: Utc::now(),
            });
        }
        store
            .create_project(CreateProject {
                name: "Ops".to_string(),
                description: None,
                members: entries,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_member_enriches_with_profile() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let bob = seed_user(&store, "Bob").await;
        let project = seed_project(&store, &[alice.id], &[]).await;

        let member = add_member(
            &store,
            alice.id,
            project.id,
            AddMember {
                user_id: bob.id,
                role: MemberRole::Member,
            },
        )
        .await
        .unwrap();

        assert_eq!(member.user_id, bob.id);
        assert_eq!(member.name, "Bob");
        assert_eq!(member.role, MemberRole::Member);
    }

    #[tokio::test]
    async fn test_duplicate_member_conflicts_and_count_unchanged() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let bob = seed_user(&store, "Bob").await;
        let project = seed_project(&store, &[alice.id], &[]).await;

        let input = AddMember {
            user_id: bob.id,
            role: MemberRole::Member,
        };
        add_member(&store, alice.id, project.id, input.clone())
            .await
            .unwrap();

        let err = add_member(&store, alice.id, project.id, input)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let reloaded = store.find_project(project.id).await.unwrap().unwrap();
        assert_eq!(reloaded.members.len(), 2);
    }

    #[tokio::test]
    async fn test_add_member_requires_admin() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let bob = seed_user(&store, "Bob").await;
        let carol = seed_user(&store, "Carol").await;
        let project = seed_project(&store, &[alice.id], &[bob.id]).await;

        let err = add_member(
            &store,
            bob.id,
            project.id,
            AddMember {
                user_id: carol.id,
                role: MemberRole::Member,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::AccessDenied(_)));
    }

    #[tokio::test]
    async fn test_add_unknown_user_not_found() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let project = seed_project(&store, &[alice.id], &[]).await;

        let err = add_member(
            &store,
            alice.id,
            project.id,
            AddMember {
                user_id: Uuid::new_v4(),
                role: MemberRole::Member,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_last_admin_cannot_be_removed() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let carol = seed_user(&store, "Carol").await;
        let project = seed_project(&store, &[alice.id, carol.id], &[]).await;

        // Two admins: removing one succeeds
        remove_member(&store, alice.id, project.id, alice.id)
            .await
            .unwrap();

        // Carol is now the last admin
        let err = remove_member(&store, carol.id, project.id, carol.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let reloaded = store.find_project(project.id).await.unwrap().unwrap();
        assert_eq!(reloaded.admin_count(), 1);
    }

    #[tokio::test]
    async fn test_remove_plain_member_is_unrestricted() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let bob = seed_user(&store, "Bob").await;
        let project = seed_project(&store, &[alice.id], &[bob.id]).await;

        remove_member(&store, alice.id, project.id, bob.id)
            .await
            .unwrap();

        let reloaded = store.find_project(project.id).await.unwrap().unwrap();
        assert!(!reloaded.is_member(bob.id));
    }

    #[tokio::test]
    async fn test_remove_non_member_not_found() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let project = seed_project(&store, &[alice.id], &[]).await;

        let err = remove_member(&store, alice.id, project.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_dangling_reference_filtered_from_listing() {
        let store = MemStore::new();
        let alice = seed_user(&store, "Alice").await;
        let ghost = Uuid::new_v4(); // never existed in the directory
        let project = seed_project(&store, &[alice.id], &[ghost]).await;

        let members = list_members(&store, alice.id, project.id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].user_id, alice.id);
    }
}
