/// Domain services
///
/// Each operation follows the same shape: resolve the records involved,
/// ask the access evaluator (`crate::access`) for a decision, then perform
/// the store mutation or read-then-populate. Services are plain async
/// functions over `&dyn Store` so they run identically against PostgreSQL
/// and the in-memory double.
///
/// - `projects`: creation, listing, reads with tasks, updates, cascade delete
/// - `members`: membership mutation and member listings
/// - `tasks`: task CRUD, status updates, per-user and per-project listings
/// - `users`: directory listings

pub mod members;
pub mod projects;
pub mod tasks;
pub mod users;
