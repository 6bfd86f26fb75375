/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: Login, logout, and session-to-user resolution
/// - [`authorization`]: Author-only checks for notebook posts

pub mod authorization;
pub mod password;
pub mod session;
