/**
 * User Store
 *
 * The store is the only owner of user records. Implementations must be safe
 * for concurrent use: two concurrent `create` calls must never hand out the
 * same identity.
 */

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::User;

/// A user about to be created
///
/// `password` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

/// Partial update applied by [`UserStore::edit`]
///
/// Has no password field: passwords are never changed through `edit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

impl UserChanges {
    /// Apply the present fields to a record
    pub fn apply_to(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(firstname) = &self.firstname {
            user.firstname = firstname.clone();
        }
        if let Some(lastname) = &self.lastname {
            user.lastname = lastname.clone();
        }
    }
}

/// User store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another record already uses this username
    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be turned back into a user
    #[error("corrupt user record: {0}")]
    CorruptRecord(String),
}

/// Storage for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, in creation order
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a user under a freshly assigned id
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Apply `changes` to the user with `id`
    ///
    /// Returns `None` when no such user exists.
    async fn edit(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, StoreError>;

    /// Remove the user with `id`, returning whether one was removed
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
