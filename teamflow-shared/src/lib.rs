//! # TeamFlow Shared Library
//!
//! Domain types and business logic shared by the TeamFlow API server.
//!
//! ## Module Organization
//!
//! - `models`: users, projects with embedded membership lists, tasks
//! - `access`: the pure access-control evaluator
//! - `store`: storage behind a single trait (PostgreSQL + in-memory)
//! - `service`: project/membership/task/user operations
//! - `auth`: JWT tokens, Argon2id password hashing, auth context
//! - `error`: the domain error taxonomy

pub mod access;
pub mod auth;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

/// Current version of the TeamFlow shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
