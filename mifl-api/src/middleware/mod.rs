/// Middleware modules for the web server
///
/// - `security`: Security headers on every response
/// - `session`: Session cookie resolution and the sign-in gate

pub mod security;
pub mod session;
