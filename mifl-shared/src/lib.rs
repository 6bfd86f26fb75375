//! # MIFL Shared Library
//!
//! Domain logic and persistence for the team site, used by the HTTP server.
//!
//! ## Module Organization
//!
//! - `accounts`: Credential store (registration, lookup, profile updates)
//! - `auth`: Password hashing, sessions, and author checks
//! - `board`: Shared task board
//! - `notebook`: Engineering notebook posts
//! - `models`: Row types and their sqlx queries
//! - `store`: The `Store` trait with Postgres and in-memory backends
//! - `db`: Connection pool and migrations

pub mod accounts;
pub mod auth;
pub mod board;
pub mod db;
pub mod models;
pub mod notebook;
pub mod store;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
