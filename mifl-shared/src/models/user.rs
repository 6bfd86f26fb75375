/// User model and database operations
///
/// This module provides the User model and the queries backing the credential
/// store. Users are created at registration, may change their username and
/// email, and are never deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(20) NOT NULL,
///     email VARCHAR(120) NOT NULL,
///     team_number INTEGER NOT NULL,
///     meeting_count INTEGER NOT NULL DEFAULT 0,
///     image_file VARCHAR(64) NOT NULL DEFAULT 'default.jpg',
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT users_username_key UNIQUE (username),
///     CONSTRAINT users_email_key UNIQUE (email)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use mifl_shared::models::user::{User, CreateUser};
/// use mifl_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     username: "alice".to_string(),
///     email: "a@x.com".to_string(),
///     team_number: 5492,
///     meeting_count: 0,
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let found = User::find_by_email(&pool, "a@x.com").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Identifier of a user row
pub type UserId = i64;

/// Profile picture shown on the account page until uploads exist
pub const DEFAULT_IMAGE_FILE: &str = "default.jpg";

const USER_COLUMNS: &str =
    "id, username, email, team_number, meeting_count, image_file, password_hash, created_at";

/// A team member account
///
/// The password hash never leaves the server: it is skipped on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Auto-assigned user ID
    pub id: UserId,

    /// Display name, unique across all users
    pub username: String,

    /// Login email, unique across all users
    pub email: String,

    /// Team number entered at registration
    pub team_number: i32,

    /// Number of team meetings, shown on the task board
    pub meeting_count: i32,

    /// Profile picture file name
    pub image_file: String,

    /// Argon2id password hash (PHC string)
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
///
/// Carries the already-computed hash, never the raw password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub team_number: i32,
    pub meeting_count: i32,
    pub password_hash: String,
}

/// Identity fields that must stay unique across users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityField {
    Username,
    Email,
}

impl IdentityField {
    /// Form field name carrying this identity
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityField::Username => "username",
            IdentityField::Email => "email",
        }
    }

    /// Maps a Postgres unique constraint name to the field it guards
    pub fn from_constraint(constraint: &str) -> Option<Self> {
        match constraint {
            "users_username_key" => Some(IdentityField::Username),
            "users_email_key" => Some(IdentityField::Email),
            _ => None,
        }
    }
}

impl std::fmt::Display for IdentityField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl User {
    /// Inserts a new user
    ///
    /// # Errors
    ///
    /// Returns a database error carrying `users_username_key` or
    /// `users_email_key` when either identity is already taken.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO users (username, email, team_number, meeting_count, image_file, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(data.username)
            .bind(data.email)
            .bind(data.team_number)
            .bind(data.meeting_count)
            .bind(DEFAULT_IMAGE_FILE)
            .bind(data.password_hash)
            .fetch_one(pool)
            .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Finds a user by email address (exact match)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Replaces a user's username and email
    ///
    /// # Returns
    ///
    /// The updated user, or None if no user has this ID
    ///
    /// # Errors
    ///
    /// Returns a unique-constraint error if the new username or email
    /// belongs to another user.
    pub async fn update_profile(
        pool: &PgPool,
        id: UserId,
        username: &str,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE users
            SET username = $2, email = $3
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(username)
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            team_number: 5492,
            meeting_count: 3,
            image_file: DEFAULT_IMAGE_FILE.to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();

        assert_eq!(json["username"], "alice");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_identity_field_from_constraint() {
        assert_eq!(
            IdentityField::from_constraint("users_username_key"),
            Some(IdentityField::Username)
        );
        assert_eq!(
            IdentityField::from_constraint("users_email_key"),
            Some(IdentityField::Email)
        );
        assert_eq!(IdentityField::from_constraint("posts_pkey"), None);
    }

    #[test]
    fn test_identity_field_display() {
        assert_eq!(IdentityField::Username.to_string(), "username");
        assert_eq!(IdentityField::Email.to_string(), "email");
    }
}
