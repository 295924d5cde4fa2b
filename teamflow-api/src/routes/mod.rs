/// API route handlers
///
/// Each module covers one resource:
/// - `health`: liveness and store connectivity
/// - `auth`: registration, login, token refresh, profile
/// - `projects`: project CRUD and membership management
/// - `tasks`: task CRUD, status changes, listings
/// - `users`: user directory

pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

/// Deserializes a field that distinguishes "absent" from "explicit null"
///
/// Paired with `#[serde(default)]`: an absent field stays `None`, while a
/// present field (including JSON `null`) becomes `Some(inner)`. Update
/// requests use this for nullable columns so `null` clears the stored value
/// instead of being ignored.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}
