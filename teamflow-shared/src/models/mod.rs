/// Domain models for TeamFlow
///
/// # Models
///
/// - `user`: user directory records and profile views
/// - `project`: projects with embedded membership lists
/// - `task`: tasks referencing a project and an optional assignee
///
/// Each module carries the record type, the `CreateX`/`UpdateX` inputs used
/// by the storage layer, and the populated read payloads returned by the
/// services.

pub mod project;
pub mod task;
pub mod user;
