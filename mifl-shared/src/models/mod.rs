/// Database models for the team site
///
/// Each model owns its row type, its input types, and the sqlx queries that
/// read and write it. The [`crate::store::PgStore`] calls into these.
///
/// # Models
///
/// - `user`: Team member accounts and credentials
/// - `session`: Server-side login sessions
/// - `task`: Shared task board entries
/// - `post`: Engineering notebook posts

pub mod post;
pub mod session;
pub mod task;
pub mod user;
