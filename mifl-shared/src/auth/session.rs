/// Session authentication
///
/// Turns an email + password into a server-side session, and a session
/// cookie back into the signed-in [`User`].
///
/// # Tokens
///
/// - **Format**: `mifl_{32 chars}` (prefix + 32 random alphanumerics)
/// - **Storage**: only the SHA-256 hex digest is stored
/// - **Lifetime**: [`SessionPolicy::ttl`] for ordinary logins,
///   [`SessionPolicy::remember_for`] when "remember me" is ticked
///
/// # Example
///
/// ```no_run
/// use mifl_shared::auth::session::{current_user, login, logout, SessionPolicy};
/// use mifl_shared::store::Store;
///
/// # async fn example(store: &dyn Store) -> Result<(), Box<dyn std::error::Error>> {
/// let issued = login(store, "a@x.com", "secret1", false, &SessionPolicy::default()).await?;
///
/// let user = current_user(store, &issued.token).await?;
/// assert!(user.is_some());
///
/// logout(store, &issued.token).await?;
/// assert!(current_user(store, &issued.token).await?.is_none());
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::password::{verify_password_async, PasswordError};
use crate::models::{
    session::{CreateSession, Session},
    user::User,
};
use crate::store::{Store, StoreError};

/// Session token prefix
const TOKEN_PREFIX: &str = "mifl_";

/// Length of the random part of a token
const TOKEN_RANDOM_LENGTH: usize = 32;

/// Total length of a session token
pub const TOKEN_LENGTH: usize = TOKEN_PREFIX.len() + TOKEN_RANDOM_LENGTH;

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How long sessions live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Lifetime of an ordinary login
    pub ttl: Duration,

    /// Lifetime of a "remember me" login
    pub remember_for: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(24),
            remember_for: Duration::days(365),
        }
    }
}

impl SessionPolicy {
    /// Lifetime for a login with or without "remember me"
    pub fn lifetime(&self, remember: bool) -> Duration {
        if remember {
            self.remember_for
        } else {
            self.ttl
        }
    }
}

/// A freshly created session together with its plaintext token
///
/// The token is only available here; hand it to the client and drop it.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: Session,
    pub user: User,
}

/// Generates a new random session token
pub fn generate_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    let random: String = (0..TOKEN_RANDOM_LENGTH)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();

    format!("{}{}", TOKEN_PREFIX, random)
}

/// SHA-256 hex digest of a token, as stored in the sessions table
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Cheap shape check so garbage cookies never reach the store
pub fn validate_token_format(token: &str) -> bool {
    token.len() == TOKEN_LENGTH
        && token.starts_with(TOKEN_PREFIX)
        && token[TOKEN_PREFIX.len()..].chars().all(|c| c.is_ascii_alphanumeric())
}

/// Verifies credentials and opens a session
///
/// # Errors
///
/// Returns [`SessionError::InvalidCredentials`] when no user has this email
/// or the password does not match; no session is created in that case.
pub async fn login(
    store: &dyn Store,
    email: &str,
    password: &str,
    remember: bool,
    policy: &SessionPolicy,
) -> Result<IssuedSession, SessionError> {
    let Some(user) = store.find_user_by_email(email).await? else {
        warn!("Login rejected: unknown email");
        return Err(SessionError::InvalidCredentials);
    };

    let valid = verify_password_async(password.to_string(), user.password_hash.clone()).await?;
    if !valid {
        warn!(user_id = user.id, "Login rejected: wrong password");
        return Err(SessionError::InvalidCredentials);
    }

    let token = generate_token();
    let session = store
        .insert_session(CreateSession {
            user_id: user.id,
            token_hash: hash_token(&token),
            remember,
            expires_at: Utc::now() + policy.lifetime(remember),
        })
        .await?;

    info!(user_id = user.id, remember, "User logged in");

    Ok(IssuedSession {
        token,
        session,
        user,
    })
}

/// Ends the session behind `token`; unknown tokens are ignored
pub async fn logout(store: &dyn Store, token: &str) -> Result<(), SessionError> {
    if store.delete_session_by_token_hash(&hash_token(token)).await? {
        info!("Session ended");
    }

    Ok(())
}

/// Resolves a session token to its user
///
/// Expired sessions resolve to `None` and are deleted on the way out.
pub async fn current_user(store: &dyn Store, token: &str) -> Result<Option<User>, SessionError> {
    if !validate_token_format(token) {
        return Ok(None);
    }

    let token_hash = hash_token(token);
    let Some(session) = store.find_session_by_token_hash(&token_hash).await? else {
        debug!("No session for presented token");
        return Ok(None);
    };

    if session.is_expired() {
        debug!(user_id = session.user_id, "Session expired");
        store.delete_session_by_token_hash(&token_hash).await?;
        return Ok(None);
    }

    Ok(store.find_user_by_id(session.user_id).await?)
}

/// Deletes all expired sessions
pub async fn purge_expired(store: &dyn Store) -> Result<u64, SessionError> {
    let removed = store.delete_expired_sessions().await?;
    if removed > 0 {
        info!(removed, "Purged expired sessions");
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{register, NewAccount};
    use crate::store::MemoryStore;

    #[test]
    fn test_generate_token_format() {
        let token = generate_token();

        assert!(token.starts_with("mifl_"));
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(validate_token_format(&token));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn test_hash_token_is_deterministic_hex() {
        let hash = hash_token("mifl_abc");

        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token("mifl_abc"));
        assert_ne!(hash, hash_token("mifl_abd"));
    }

    #[test]
    fn test_validate_token_format_rejects_garbage() {
        assert!(!validate_token_format(""));
        assert!(!validate_token_format("mifl_short"));
        assert!(!validate_token_format(&format!("sess_{}", "a".repeat(32))));
        assert!(!validate_token_format(&format!("mifl_{}!", "a".repeat(31))));
    }

    #[test]
    fn test_policy_lifetime() {
        let policy = SessionPolicy::default();

        assert_eq!(policy.lifetime(false), Duration::hours(24));
        assert_eq!(policy.lifetime(true), Duration::days(365));
    }

    async fn store_with_alice() -> (MemoryStore, User) {
        let store = MemoryStore::new();
        let alice = register(
            &store,
            NewAccount {
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
                team_number: 5492,
                meeting_count: 0,
                password: "secret1".to_string(),
            },
        )
        .await
        .unwrap();

        (store, alice)
    }

    #[tokio::test]
    async fn test_login_resolves_to_user_until_logout() {
        let (store, alice) = store_with_alice().await;
        let policy = SessionPolicy::default();

        let issued = login(&store, "a@x.com", "secret1", true, &policy).await.unwrap();
        assert_eq!(issued.user.id, alice.id);
        assert!(issued.session.remember);
        assert!(issued.session.expires_at > Utc::now() + Duration::days(364));

        assert_eq!(store.session_count().await, 1);

        let current = current_user(&store, &issued.token).await.unwrap();
        assert_eq!(current.map(|u| u.username), Some("alice".to_string()));

        logout(&store, &issued.token).await.unwrap();
        assert!(current_user(&store, &issued.token).await.unwrap().is_none());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_bad_credentials_issue_no_session() {
        let (store, _) = store_with_alice().await;
        let policy = SessionPolicy::default();

        let err = login(&store, "a@x.com", "secret2", false, &policy).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredentials));

        let err = login(&store, "b@x.com", "secret1", false, &policy).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredentials));

        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped_on_access() {
        let (store, alice) = store_with_alice().await;
        let token = generate_token();

        store
            .insert_session(CreateSession {
                user_id: alice.id,
                token_hash: hash_token(&token),
                remember: false,
                expires_at: Utc::now() - Duration::seconds(1),
            })
            .await
            .unwrap();

        assert!(current_user(&store, &token).await.unwrap().is_none());
        assert!(store
            .find_session_by_token_hash(&hash_token(&token))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_unknown_or_malformed_token_is_anonymous() {
        let (store, _) = store_with_alice().await;

        assert!(current_user(&store, "garbage").await.unwrap().is_none());
        assert!(current_user(&store, &generate_token()).await.unwrap().is_none());
        logout(&store, &generate_token()).await.unwrap();
    }
}
