/// Credential store
///
/// Registration, lookup, and profile updates for team member accounts.
/// Passwords are hashed here before anything reaches the store.
///
/// # Example
///
/// ```no_run
/// use mifl_shared::accounts::{register, NewAccount};
/// use mifl_shared::store::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let user = register(&store, NewAccount {
///     username: "alice".to_string(),
///     email: "a@x.com".to_string(),
///     team_number: 5492,
///     meeting_count: 0,
///     password: "secret1".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

use tracing::info;

use crate::auth::password::{hash_password_async, PasswordError};
use crate::models::user::{CreateUser, IdentityField, User, UserId};
use crate::store::{Store, StoreError};

/// Error type for account operations
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Username or email already belongs to another account
    #[error("{0} is already taken")]
    DuplicateIdentity(IdentityField),

    /// No account with this ID
    #[error("Account not found")]
    NotFound,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => AccountError::DuplicateIdentity(field),
            other => AccountError::Store(other),
        }
    }
}

/// Registration input, carrying the raw password
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub team_number: i32,
    pub meeting_count: i32,
    pub password: String,
}

/// Creates an account, storing only a salted hash of the password
///
/// # Errors
///
/// [`AccountError::DuplicateIdentity`] if the username or email is taken;
/// nothing is persisted in that case.
pub async fn register(store: &dyn Store, account: NewAccount) -> Result<User, AccountError> {
    let password_hash = hash_password_async(account.password).await?;

    let user = store
        .insert_user(CreateUser {
            username: account.username,
            email: account.email,
            team_number: account.team_number,
            meeting_count: account.meeting_count,
            password_hash,
        })
        .await?;

    info!(user_id = user.id, username = %user.username, "Account registered");
    Ok(user)
}

/// Looks up an account by its login email
pub async fn find_by_email(store: &dyn Store, email: &str) -> Result<Option<User>, AccountError> {
    Ok(store.find_user_by_email(email).await?)
}

/// Changes an account's username and email
///
/// Re-submitting the account's own current values is not a conflict.
pub async fn update_profile(
    store: &dyn Store,
    user_id: UserId,
    username: &str,
    email: &str,
) -> Result<User, AccountError> {
    let user = store
        .update_user_profile(user_id, username, email)
        .await?
        .ok_or(AccountError::NotFound)?;

    info!(user_id, "Account profile updated");
    Ok(user)
}
