/// PostgreSQL-backed store
///
/// Thin adapter from the [`Store`] trait onto the per-model queries in
/// [`crate::models`]. Unique violations on the user identity constraints are
/// reported as [`StoreError::Duplicate`].

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Store, StoreError, StoreResult};
use crate::db::pool::health_check;
use crate::models::{
    post::{CreatePost, Post, PostId, PostWithAuthor},
    session::{CreateSession, Session},
    task::{CreateTask, Task},
    user::{CreateUser, User, UserId},
};

/// Store backed by a sqlx Postgres pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, data: CreateUser) -> StoreResult<User> {
        User::create(&self.pool, data)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn update_user_profile(
        &self,
        id: UserId,
        username: &str,
        email: &str,
    ) -> StoreResult<Option<User>> {
        User::update_profile(&self.pool, id, username, email)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn insert_session(&self, data: CreateSession) -> StoreResult<Session> {
        Ok(Session::create(&self.pool, data).await?)
    }

    async fn find_session_by_token_hash(&self, token_hash: &str) -> StoreResult<Option<Session>> {
        Ok(Session::find_by_token_hash(&self.pool, token_hash).await?)
    }

    async fn delete_session_by_token_hash(&self, token_hash: &str) -> StoreResult<bool> {
        Ok(Session::delete_by_token_hash(&self.pool, token_hash).await?)
    }

    async fn delete_expired_sessions(&self) -> StoreResult<u64> {
        Ok(Session::delete_expired(&self.pool).await?)
    }

    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task> {
        Ok(Task::create(&self.pool, data).await?)
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(Task::list_all(&self.pool).await?)
    }

    async fn insert_post(&self, data: CreatePost) -> StoreResult<Post> {
        Ok(Post::create(&self.pool, data).await?)
    }

    async fn find_post(&self, id: PostId) -> StoreResult<Option<PostWithAuthor>> {
        Ok(Post::find_with_author(&self.pool, id).await?)
    }

    async fn list_posts(&self) -> StoreResult<Vec<PostWithAuthor>> {
        Ok(Post::list_with_authors(&self.pool).await?)
    }

    async fn update_post(
        &self,
        id: PostId,
        author_id: UserId,
        title: &str,
        content: &str,
    ) -> StoreResult<bool> {
        Ok(Post::update_content(&self.pool, id, author_id, title, content).await?)
    }

    async fn delete_post(&self, id: PostId, author_id: UserId) -> StoreResult<bool> {
        Ok(Post::delete(&self.pool, id, author_id).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(health_check(&self.pool).await?)
    }
}
