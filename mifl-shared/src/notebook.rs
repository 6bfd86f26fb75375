/// Engineering notebook
///
/// CRUD over notebook posts. Anyone may read; creating needs a signed-in
/// author; updating and deleting need the requester to be that author.
///
/// # Ownership
///
/// `update` and `delete` load the post, compare its author ID with the
/// requester ID, and reject with [`NotebookError::Forbidden`] before any
/// write is issued. The write itself is also scoped to the author in the
/// store.
///
/// # Example
///
/// ```no_run
/// use mifl_shared::notebook;
/// use mifl_shared::store::MemoryStore;
///
/// # async fn example(alice_id: i64, bob_id: i64) -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let id = notebook::create(&store, "p1", "c1", alice_id).await?;
///
/// assert!(notebook::delete(&store, id, bob_id).await.is_err());
/// notebook::delete(&store, id, alice_id).await?;
/// # Ok(())
/// # }
/// ```

use tracing::{info, warn};

use crate::auth::authorization::{require_author, AuthzError};
use crate::models::{
    post::{CreatePost, PostId, PostWithAuthor},
    user::UserId,
};
use crate::store::{Store, StoreError};

/// Error type for notebook operations
#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    #[error("Post {0} not found")]
    NotFound(PostId),

    #[error("Post {0} belongs to another author")]
    Forbidden(PostId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// All posts with author names, oldest first
pub async fn list_all(store: &dyn Store) -> Result<Vec<PostWithAuthor>, NotebookError> {
    Ok(store.list_posts().await?)
}

/// A single post
pub async fn get(store: &dyn Store, post_id: PostId) -> Result<PostWithAuthor, NotebookError> {
    store
        .find_post(post_id)
        .await?
        .ok_or(NotebookError::NotFound(post_id))
}

/// Creates a post authored by `author_id`
pub async fn create(
    store: &dyn Store,
    title: &str,
    content: &str,
    author_id: UserId,
) -> Result<PostId, NotebookError> {
    let post = store
        .insert_post(CreatePost {
            title: title.to_string(),
            content: content.to_string(),
            author_id,
        })
        .await?;

    info!(post_id = post.id, author_id, "Post created");
    Ok(post.id)
}

/// Loads a post and checks `requester_id` is its author
pub async fn authorize(
    store: &dyn Store,
    post_id: PostId,
    requester_id: UserId,
) -> Result<PostWithAuthor, NotebookError> {
    let post = get(store, post_id).await?;

    require_author(post.author_id, requester_id).map_err(|AuthzError::NotAuthor| {
        warn!(post_id, requester_id, "Rejected post mutation by non-author");
        NotebookError::Forbidden(post_id)
    })?;

    Ok(post)
}

/// Replaces title and content; author-only
pub async fn update(
    store: &dyn Store,
    post_id: PostId,
    title: &str,
    content: &str,
    requester_id: UserId,
) -> Result<(), NotebookError> {
    authorize(store, post_id, requester_id).await?;

    // The post can only vanish between the check and the write
    if !store.update_post(post_id, requester_id, title, content).await? {
        return Err(NotebookError::NotFound(post_id));
    }

    info!(post_id, "Post updated");
    Ok(())
}

/// Permanently deletes a post; author-only
pub async fn delete(
    store: &dyn Store,
    post_id: PostId,
    requester_id: UserId,
) -> Result<(), NotebookError> {
    authorize(store, post_id, requester_id).await?;

    if !store.delete_post(post_id, requester_id).await? {
        return Err(NotebookError::NotFound(post_id));
    }

    info!(post_id, "Post deleted");
    Ok(())
}
