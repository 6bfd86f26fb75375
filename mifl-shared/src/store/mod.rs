/// Persistence seam for users, sessions, tasks, and posts
///
/// Domain operations in [`crate::accounts`], [`crate::auth::session`],
/// [`crate::board`], and [`crate::notebook`] talk to a `dyn Store` and never
/// to a pool directly. Two backends exist:
///
/// - [`PgStore`]: PostgreSQL through sqlx, the production backend
/// - [`MemoryStore`]: in-process maps, used by tests and local runs
///
/// Every mutation is a single-row statement, so the backend's own atomicity
/// is all the coordination needed.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use mifl_shared::store::{MemoryStore, Store};
///
/// let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
/// ```

use async_trait::async_trait;

use crate::models::{
    post::{CreatePost, Post, PostId, PostWithAuthor},
    session::{CreateSession, Session},
    task::{CreateTask, Task},
    user::{CreateUser, IdentityField, User, UserId},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique identity (username or email) is already taken
    #[error("{0} is already taken")]
    Duplicate(IdentityField),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classifies a sqlx error, turning unique violations on user identity
    /// constraints into [`StoreError::Duplicate`]
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(field) = db_err.constraint().and_then(IdentityField::from_constraint) {
                return StoreError::Duplicate(field);
            }
        }
        StoreError::Database(err)
    }
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operations required by the site
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Inserts a user, rejecting a taken username or email
    async fn insert_user(&self, data: CreateUser) -> StoreResult<User>;

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Replaces username and email; `None` if the user does not exist
    async fn update_user_profile(
        &self,
        id: UserId,
        username: &str,
        email: &str,
    ) -> StoreResult<Option<User>>;

    async fn insert_session(&self, data: CreateSession) -> StoreResult<Session>;

    async fn find_session_by_token_hash(&self, token_hash: &str) -> StoreResult<Option<Session>>;

    async fn delete_session_by_token_hash(&self, token_hash: &str) -> StoreResult<bool>;

    /// Removes expired sessions, returning how many were dropped
    async fn delete_expired_sessions(&self) -> StoreResult<u64>;

    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task>;

    /// All tasks in insertion order
    async fn list_tasks(&self) -> StoreResult<Vec<Task>>;

    async fn insert_post(&self, data: CreatePost) -> StoreResult<Post>;

    async fn find_post(&self, id: PostId) -> StoreResult<Option<PostWithAuthor>>;

    /// All posts in insertion order
    async fn list_posts(&self) -> StoreResult<Vec<PostWithAuthor>>;

    /// Updates a post only if `author_id` owns it
    async fn update_post(
        &self,
        id: PostId,
        author_id: UserId,
        title: &str,
        content: &str,
    ) -> StoreResult<bool>;

    /// Deletes a post only if `author_id` owns it
    async fn delete_post(&self, id: PostId, author_id: UserId) -> StoreResult<bool>;

    /// Cheap liveness probe of the backend
    async fn ping(&self) -> StoreResult<()>;
}
