/// In-memory store
///
/// Keeps every table in ordered maps behind one `RwLock`. It enforces the
/// same invariants as the Postgres schema: sequential IDs, unique username
/// and email, author-scoped post mutations. Nothing is persisted.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    post::{CreatePost, Post, PostId, PostWithAuthor},
    session::{CreateSession, Session},
    task::{CreateTask, Task, TaskId},
    user::{CreateUser, IdentityField, User, UserId, DEFAULT_IMAGE_FILE},
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    sessions: HashMap<String, Session>,
    tasks: BTreeMap<TaskId, Task>,
    posts: BTreeMap<PostId, Post>,
    next_user_id: UserId,
    next_task_id: TaskId,
    next_post_id: PostId,
}

impl Tables {
    /// Returns the first identity field held by a user other than `except`
    fn taken_identity(&self, username: &str, email: &str, except: Option<UserId>) -> Option<IdentityField> {
        let others = || self.users.values().filter(move |u| Some(u.id) != except);

        if others().any(|u| u.username == username) {
            Some(IdentityField::Username)
        } else if others().any(|u| u.email == email) {
            Some(IdentityField::Email)
        } else {
            None
        }
    }

    fn with_author(&self, post: &Post) -> PostWithAuthor {
        let author = self
            .users
            .get(&post.author_id)
            .map(|u| u.username.clone())
            .unwrap_or_default();
        PostWithAuthor::new(post.clone(), author)
    }
}

/// Store holding all data in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Live and expired sessions currently held
    pub async fn session_count(&self) -> usize {
        self.tables.read().await.sessions.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        if let Some(field) = tables.taken_identity(&data.username, &data.email, None) {
            return Err(StoreError::Duplicate(field));
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: data.username,
            email: data.email,
            team_number: data.team_number,
            meeting_count: data.meeting_count,
            image_file: DEFAULT_IMAGE_FILE.to_string(),
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user_profile(
        &self,
        id: UserId,
        username: &str,
        email: &str,
    ) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        if let Some(field) = tables.taken_identity(username, email, Some(id)) {
            return Err(StoreError::Duplicate(field));
        }

        let user = tables.users.get_mut(&id).map(|user| {
            user.username = username.to_string();
            user.email = email.to_string();
            user.clone()
        });

        Ok(user)
    }

    async fn insert_session(&self, data: CreateSession) -> StoreResult<Session> {
        let session = Session {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            token_hash: data.token_hash,
            remember: data.remember,
            expires_at: data.expires_at,
            created_at: Utc::now(),
        };

        self.tables
            .write()
            .await
            .sessions
            .insert(session.token_hash.clone(), session.clone());

        Ok(session)
    }

    async fn find_session_by_token_hash(&self, token_hash: &str) -> StoreResult<Option<Session>> {
        Ok(self.tables.read().await.sessions.get(token_hash).cloned())
    }

    async fn delete_session_by_token_hash(&self, token_hash: &str) -> StoreResult<bool> {
        Ok(self.tables.write().await.sessions.remove(token_hash).is_some())
    }

    async fn delete_expired_sessions(&self) -> StoreResult<u64> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;

        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| !s.is_expired_at(now));

        Ok((before - tables.sessions.len()) as u64)
    }

    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task> {
        let mut tables = self.tables.write().await;

        tables.next_task_id += 1;
        let task = Task {
            id: tables.next_task_id,
            category: data.category,
            title: data.title,
            content: data.content,
            created_at: Utc::now(),
        };
        tables.tasks.insert(task.id, task.clone());

        Ok(task)
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.tables.read().await.tasks.values().cloned().collect())
    }

    async fn insert_post(&self, data: CreatePost) -> StoreResult<Post> {
        let mut tables = self.tables.write().await;

        // Mirrors the posts.user_id foreign key
        if !tables.users.contains_key(&data.author_id) {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }

        tables.next_post_id += 1;
        let post = Post {
            id: tables.next_post_id,
            title: data.title,
            content: data.content,
            date_posted: Utc::now(),
            author_id: data.author_id,
        };
        tables.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn find_post(&self, id: PostId) -> StoreResult<Option<PostWithAuthor>> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).map(|p| tables.with_author(p)))
    }

    async fn list_posts(&self) -> StoreResult<Vec<PostWithAuthor>> {
        let tables = self.tables.read().await;
        Ok(tables.posts.values().map(|p| tables.with_author(p)).collect())
    }

    async fn update_post(
        &self,
        id: PostId,
        author_id: UserId,
        title: &str,
        content: &str,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;

        match tables.posts.get_mut(&id) {
            Some(post) if post.author_id == author_id => {
                post.title = title.to_string();
                post.content = content.to_string();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_post(&self, id: PostId, author_id: UserId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;

        let owned = tables
            .posts
            .get(&id)
            .is_some_and(|post| post.author_id == author_id);
        if owned {
            tables.posts.remove(&id);
        }

        Ok(owned)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
