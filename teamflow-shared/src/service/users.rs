/// User directory service
///
/// Read-only listings over the user directory. Project-scoped user
/// listings live in `service::members` since they are membership reads.

use uuid::Uuid;

use crate::error::DomainResult;
use crate::models::user::UserProfile;
use crate::store::Store;

/// Lists every user except the requester, ordered by name
///
/// Used by clients to offer candidates when adding project members.
pub async fn list_users(store: &dyn Store, actor: Uuid) -> DomainResult<Vec<UserProfile>> {
    let users = store.list_users().await?;

    Ok(users
        .into_iter()
        .filter(|u| u.id != actor)
        .map(|u| u.profile())
        .collect())
}
