/// Authentication context
///
/// The API server's auth layer validates the Bearer token, resolves it to
/// an existing user, and inserts an [`AuthContext`] into request
/// extensions, where handlers pick it up with their framework's extension
/// extractor. Within this crate it is a plain value:
///
/// ```
/// use teamflow_shared::auth::middleware::AuthContext;
/// use uuid::Uuid;
///
/// let user_id = Uuid::new_v4();
/// let auth = AuthContext::from_jwt(user_id);
/// assert_eq!(auth.user_id, user_id);
/// ```
///
/// The core trusts the resolved identity verbatim; all authorization
/// decisions downstream are made against `user_id`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authentication context added to request extensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context from validated JWT claims
    pub fn from_jwt(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
