use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user. Fails with `DuplicateUsername` if the name is taken.
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by exact username
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Username of the user with `id`, if one is stored
    pub async fn username_of(&self, id: Uuid) -> Option<String> {
        let users = self.users.read().await;
        users
            .values()
            .find(|user| user.id == id)
            .map(|user| user.username.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.username) {
            return Err(UserError::DuplicateUsername(user.username));
        }

        users.insert(user.username.clone(), user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("driver".into(), "h1".into()))
            .await
            .unwrap();

        let result = repo.create(User::new("driver".into(), "h2".into())).await;

        assert!(matches!(result, Err(UserError::DuplicateUsername(name)) if name == "driver"));
        let stored = repo.get_by_username("driver").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "h1");
    }

    #[tokio::test]
    async fn test_username_of_finds_by_id() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(User::new("dispatcher".into(), "h".into()))
            .await
            .unwrap();

        assert_eq!(repo.username_of(user.id).await.as_deref(), Some("dispatcher"));
        assert!(repo.username_of(Uuid::now_v7()).await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_exact() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("Driver".into(), "h".into()))
            .await
            .unwrap();

        assert!(repo.get_by_username("driver").await.unwrap().is_none());
        assert!(repo.get_by_username("Driver").await.unwrap().is_some());
    }
}
