/// Task board
///
/// A flat, append-only list of team tasks. Tasks have no owner, so creating
/// one only needs a signed-in caller; the route layer enforces that.

use tracing::info;

use crate::models::task::{CreateTask, Task};
use crate::store::{Store, StoreError};

/// All tasks, oldest first
pub async fn list_all(store: &dyn Store) -> Result<Vec<Task>, StoreError> {
    store.list_tasks().await
}

/// Adds a task to the board
pub async fn create(store: &dyn Store, data: CreateTask) -> Result<Task, StoreError> {
    let task = store.insert_task(data).await?;

    info!(task_id = task.id, category = %task.category, "Task created");
    Ok(task)
}
