/// Task model and database operations
///
/// Tasks are the entries of the shared team task board. They carry no owner
/// and no status: any signed-in member can add one, and the board lists them
/// all in the order they were added. This codebase never edits or deletes a
/// task.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     category VARCHAR(100) NOT NULL,
///     title VARCHAR(100) NOT NULL,
///     content TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Identifier of a task row
pub type TaskId = i64;

/// A task board entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Auto-assigned task ID
    pub id: TaskId,

    /// Free-form grouping such as "build" or "programming"
    pub category: String,

    pub title: String,

    pub content: String,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub category: String,
    pub title: String,
    pub content: String,
}

impl Task {
    /// Appends a task to the board
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (category, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, category, title, content, created_at
            "#,
        )
        .bind(data.category)
        .bind(data.title)
        .bind(data.content)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists every task, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, category, title, content, created_at
            FROM tasks
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }
}
