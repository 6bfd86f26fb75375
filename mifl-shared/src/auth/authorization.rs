/// Authorization checks
///
/// The site has one authorization rule beyond "is signed in": only the
/// author of a notebook post may change or delete it. Identity is compared
/// by user ID value, never by object identity.
///
/// # Example
///
/// ```
/// use mifl_shared::auth::authorization::{require_author, AuthzError};
///
/// assert!(require_author(7, 7).is_ok());
/// assert!(matches!(require_author(7, 8), Err(AuthzError::NotAuthor)));
/// ```

use crate::models::user::UserId;

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// Requester is not the author of the resource
    #[error("Only the author may modify this resource")]
    NotAuthor,
}

/// Checks that `requester_id` is the resource's author
///
/// A requester ID that matches no user can never equal an author ID, so it
/// is rejected the same way.
pub fn require_author(author_id: UserId, requester_id: UserId) -> Result<(), AuthzError> {
    if author_id != requester_id {
        return Err(AuthzError::NotAuthor);
    }

    Ok(())
}
