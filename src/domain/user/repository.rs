//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::User;
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// The username is the caller-facing key: lookups, deletion and the
/// uniqueness invariant are all by username.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by username (lookup, not a precondition check)
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user; fails with `Duplicate` if the username exists
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user by username, returning whether one was deleted
    async fn delete_by_username(&self, username: &str) -> Result<bool, DomainError>;

    /// Snapshot of all users, order unspecified
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count all users
    async fn count(&self) -> Result<u64, DomainError>;

    /// Check whether a username is taken
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock user repository for testing
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: Arc<RwLock<HashMap<String, User>>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent operation fail with a storage error
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.get(username).cloned())
        }

        async fn create(&self, user: User) -> Result<User, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;

            if users.contains_key(user.username()) {
                return Err(DomainError::duplicate(format!(
                    "Username '{}' already exists",
                    user.username()
                )));
            }

            users.insert(user.username().to_string(), user.clone());
            Ok(user)
        }

        async fn delete_by_username(&self, username: &str) -> Result<bool, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;
            Ok(users.remove(username).is_some())
        }

        async fn list(&self) -> Result<Vec<User>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.values().cloned().collect())
        }

        async fn count(&self) -> Result<u64, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.len() as u64)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::user::Role;

        fn reader(username: &str) -> User {
            User::new(format!("u-{username}"), username, "pw", Role::Reader)
        }

        #[tokio::test]
        async fn test_create_and_get() {
            let repo = MockUserRepository::new();
            repo.create(reader("alice")).await.unwrap();

            let found = repo.get_by_username("alice").await.unwrap();
            assert_eq!(found.unwrap().username(), "alice");
        }

        #[tokio::test]
        async fn test_duplicate_username_rejected() {
            let repo = MockUserRepository::new();
            repo.create(reader("alice")).await.unwrap();

            let result = repo.create(reader("alice")).await;
            assert!(matches!(result, Err(DomainError::Duplicate { .. })));
            assert_eq!(repo.count().await.unwrap(), 1);
        }

        #[tokio::test]
        async fn test_delete() {
            let repo = MockUserRepository::new();
            repo.create(reader("alice")).await.unwrap();

            assert!(repo.delete_by_username("alice").await.unwrap());
            assert!(!repo.delete_by_username("alice").await.unwrap());
        }

        #[tokio::test]
        async fn test_failure_injection() {
            let repo = MockUserRepository::new();
            repo.set_should_fail(true).await;

            let result = repo.list().await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }
    }
}
