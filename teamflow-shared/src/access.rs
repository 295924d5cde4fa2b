/// Access-control evaluator
///
/// Pure decision logic over `(requester, project, action)`. No storage
/// access happens here: callers load the project first, ask for a decision,
/// and only then touch the store.
///
/// # Permission model
///
/// | Action | Allowed when |
/// |---|---|
/// | View project / list members / list tasks | requester is any member |
/// | Update project fields | requester's membership role is admin |
/// | Delete project | requester's membership role is admin |
/// | Add or remove a member | requester's membership role is admin |
/// | Create task under project | requester is any member |
/// | Update/delete a task | requester is a member of the task's project, or the task's assignee |
///
/// A requester with no membership entry is denied with `AccessDenied`;
/// project existence is not hidden from authenticated non-members (a 403,
/// not a 404).
///
/// The last-admin protection on member removal is a store invariant, not a
/// permission, and lives in the membership service.

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::models::project::Project;
use crate::models::task::Task;

/// Project-scoped operations subject to access control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    /// Read the project, its members, or its tasks
    View,

    /// Change name, description, or status
    Update,

    /// Delete the project and cascade to its tasks
    Delete,

    /// Add or remove membership entries
    ManageMembers,

    /// Create a task under the project
    CreateTask,
}

/// Decides whether `requester` may perform `action` on `project`
///
/// Returns `Ok(())` on allow, `DomainError::AccessDenied` on deny.
pub fn authorize_project(
    project: &Project,
    requester: Uuid,
    action: ProjectAction,
) -> DomainResult<()> {
    let allowed = match action {
        ProjectAction::View | ProjectAction::CreateTask => project.is_member(requester),
        ProjectAction::Update | ProjectAction::Delete | ProjectAction::ManageMembers => {
            project.is_admin(requester)
        }
    };

    if allowed {
        return Ok(());
    }

    let message = match action {
        ProjectAction::View => "You do not have access to this project",
        ProjectAction::Update => "Only project admins can update projects",
        ProjectAction::Delete => "Only project admins can delete projects",
        ProjectAction::ManageMembers => "Only project admins can manage members",
        ProjectAction::CreateTask => "You do not have access to this project",
    };

    Err(DomainError::access_denied(message))
}

/// Decides whether `requester` may update or delete `task`
///
/// Allowed for any member of the task's project, and for the task's
/// assignee even when their membership has since been removed (orphaned
/// assignments keep working until reassigned).
pub fn authorize_task_edit(project: &Project, task: &Task, requester: Uuid) -> DomainResult<()> {
    if project.is_member(requester) || task.assigned_to == Some(requester) {
        return Ok(());
    }

    Err(DomainError::access_denied(
        "You do not have access to this task",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::{MemberRole, ProjectMember, ProjectStatus};
    use crate::models::task::{TaskPriority, TaskStatus};
    use chrono::Utc;

    fn project(members: &[(Uuid, MemberRole)]) -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "Ops".to_string(),
            description: None,
            status: ProjectStatus::Active,
            members: members
                .iter()
                .map(|(user_id, role)| ProjectMember {
                    user_id: *user_id,
                    role: *role,
                    joined_at: Utc::now(),
                })
                .collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn task(project: &Project, assigned_to: Option<Uuid>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Write copy".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            project_id: project.id,
            assigned_to,
            created_by: Uuid::new_v4(),
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_any_member_can_view_and_create_tasks() {
        let admin = Uuid::new_v4();
        let member = Uuid::new_v4();
        let p = project(&[(admin, MemberRole::Admin), (member, MemberRole::Member)]);

        for user in [admin, member] {
            assert!(authorize_project(&p, user, ProjectAction::View).is_ok());
            assert!(authorize_project(&p, user, ProjectAction::CreateTask).is_ok());
        }
    }

    #[test]
    fn test_non_member_is_denied_everything() {
        let admin = Uuid::new_v4();
        let outsider = Uuid::new_v4();
        let p = project(&[(admin, MemberRole::Admin)]);

        for action in [
            ProjectAction::View,
            ProjectAction::Update,
            ProjectAction::Delete,
            ProjectAction::ManageMembers,
            ProjectAction::CreateTask,
        ] {
            let err = authorize_project(&p, outsider, action).unwrap_err();
            assert!(matches!(err, DomainError::AccessDenied(_)));
        }
    }

    #[test]
    fn test_mutations_require_admin_role() {
        let admin = Uuid::new_v4();
        let member = Uuid::new_v4();
        let p = project(&[(admin, MemberRole::Admin), (member, MemberRole::Member)]);

        for action in [
            ProjectAction::Update,
            ProjectAction::Delete,
            ProjectAction::ManageMembers,
        ] {
            assert!(authorize_project(&p, admin, action).is_ok());
            assert!(matches!(
                authorize_project(&p, member, action),
                Err(DomainError::AccessDenied(_))
            ));
        }
    }

    #[test]
    fn test_task_edit_allows_members_and_assignee() {
        let member = Uuid::new_v4();
        let assignee = Uuid::new_v4();
        let outsider = Uuid::new_v4();
        let p = project(&[(member, MemberRole::Member)]);

        // Assignee is not a member of the project: orphaned assignment
        let t = task(&p, Some(assignee));

        assert!(authorize_task_edit(&p, &t, member).is_ok());
        assert!(authorize_task_edit(&p, &t, assignee).is_ok());
        assert!(matches!(
            authorize_task_edit(&p, &t, outsider),
            Err(DomainError::AccessDenied(_))
        ));
    }

    #[test]
    fn test_unassigned_task_denies_non_members() {
        let member = Uuid::new_v4();
        let outsider = Uuid::new_v4();
        let p = project(&[(member, MemberRole::Member)]);
        let t = task(&p, None);

        assert!(authorize_task_edit(&p, &t, member).is_ok());
        assert!(authorize_task_edit(&p, &t, outsider).is_err());
    }
}
