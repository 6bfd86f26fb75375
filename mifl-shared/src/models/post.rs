/// Post model and database operations
///
/// Posts are engineering notebook entries. Each post has exactly one author,
/// fixed at creation. Updates and deletes are scoped to `(id, user_id)` so a
/// statement issued for the wrong author touches nothing.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE posts (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(100) NOT NULL,
///     content TEXT NOT NULL,
///     date_posted TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use mifl_shared::models::post::{Post, CreatePost};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let post = Post::create(&pool, CreatePost {
///     title: "Drivetrain v2".to_string(),
///     content: "Swapped to 4 inch wheels".to_string(),
///     author_id: 1,
/// }).await?;
///
/// let view = Post::find_with_author(&pool, post.id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::user::UserId;

/// Identifier of a post row
pub type PostId = i64;

/// A notebook post as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    /// Auto-assigned post ID
    pub id: PostId,

    pub title: String,

    pub content: String,

    pub date_posted: DateTime<Utc>,

    /// Author reference, never reassigned
    #[sqlx(rename = "user_id")]
    pub author_id: UserId,
}

/// A post joined with its author's current username, as shown on pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostWithAuthor {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
    pub author_id: UserId,
    pub author: String,
}

impl PostWithAuthor {
    /// Combines a stored post with the author's username
    pub fn new(post: Post, author: impl Into<String>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            date_posted: post.date_posted,
            author_id: post.author_id,
            author: author.into(),
        }
    }
}

/// Input for creating a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
}

const SELECT_WITH_AUTHOR: &str = r#"
    SELECT p.id, p.title, p.content, p.date_posted,
           p.user_id AS author_id, u.username AS author
    FROM posts p
    JOIN users u ON u.id = p.user_id
"#;

impl Post {
    /// Inserts a post owned by `data.author_id`
    pub async fn create(pool: &PgPool, data: CreatePost) -> Result<Self, sqlx::Error> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, date_posted, user_id
            "#,
        )
        .bind(data.title)
        .bind(data.content)
        .bind(data.author_id)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    /// Finds a post and its author's username
    pub async fn find_with_author(
        pool: &PgPool,
        id: PostId,
    ) -> Result<Option<PostWithAuthor>, sqlx::Error> {
        let query = format!("{SELECT_WITH_AUTHOR} WHERE p.id = $1");

        let post = sqlx::query_as::<_, PostWithAuthor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(post)
    }

    /// Lists all posts with authors, oldest first
    pub async fn list_with_authors(pool: &PgPool) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
        let query = format!("{SELECT_WITH_AUTHOR} ORDER BY p.id ASC");

        let posts = sqlx::query_as::<_, PostWithAuthor>(&query)
            .fetch_all(pool)
            .await?;

        Ok(posts)
    }

    /// Rewrites title and content of a post owned by `author_id`
    ///
    /// # Returns
    ///
    /// True if a row matched both the post ID and the author
    pub async fn update_content(
        pool: &PgPool,
        id: PostId,
        author_id: UserId,
        title: &str,
        content: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $3, content = $4
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(author_id)
        .bind(title)
        .bind(content)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Permanently deletes a post owned by `author_id`
    pub async fn delete(pool: &PgPool, id: PostId, author_id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
