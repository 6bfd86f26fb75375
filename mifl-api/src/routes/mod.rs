/// Route handlers
///
/// Organized by area of the site:
///
/// - `site`: Landing, about and utility pages
/// - `health`: Health check endpoint
/// - `auth`: Register, login and logout
/// - `account`: Profile view and update
/// - `tasks`: Task board
/// - `notebook`: Engineering notebook posts

pub mod account;
pub mod auth;
pub mod health;
pub mod notebook;
pub mod site;
pub mod tasks;
