/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: Embedded schema migrations from the workspace `migrations/` directory
///
/// Queries live with their models in [`crate::models`].

pub mod migrations;
pub mod pool;
