/**
 * In-Memory User Store
 *
 * Keeps users in a `Vec` behind a `tokio::sync::RwLock`, so listing returns
 * them in insertion order. Identity assignment and the username uniqueness
 * check happen under the write lock.
 */

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::users::store::{NewUser, StoreError, UserChanges, UserStore};
use crate::shared::User;

/// User store held entirely in process memory
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.username == username).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|user| user.username == new_user.username) {
            return Err(StoreError::DuplicateUsername(new_user.username));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            password: new_user.password,
            firstname: new_user.firstname,
            lastname: new_user.lastname,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn edit(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;

        if let Some(username) = &changes.username {
            if users.iter().any(|user| user.id != id && &user.username == username) {
                return Err(StoreError::DuplicateUsername(username.clone()));
            }
        }

        let Some(user) = users.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };
        changes.apply_to(user);
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        match users.iter().position(|user| user.id == id) {
            Some(index) => {
                users.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
