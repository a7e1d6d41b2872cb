//! Document-backed user repository

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::storage::{Document, DocumentCollection, Filter};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

const FIELD_USERNAME: &str = "username";
const FIELD_ROLE: &str = "role";
const FIELD_ID: &str = "id";

/// [`UserRepository`] over a `users` document collection.
#[derive(Debug)]
pub struct DocumentUserRepository {
    users: Arc<dyn DocumentCollection>,
}

impl DocumentUserRepository {
    pub fn new(users: Arc<dyn DocumentCollection>) -> Self {
        Self { users }
    }

    fn to_document(user: &User) -> Result<Document, DomainError> {
        match serde_json::to_value(user) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) => Err(DomainError::storage("User did not serialize to an object")),
            Err(e) => Err(DomainError::storage(format!("User serialization failed: {e}"))),
        }
    }

    /// Deserialize a stored record, applying the legacy fallbacks: records
    /// without a role are readers, records without an id get `u-<username>`.
    fn from_document(mut document: Document) -> Result<User, DomainError> {
        if !document.contains_key(FIELD_ROLE) {
            document.insert(FIELD_ROLE.to_string(), Value::from("reader"));
        }

        if !document.contains_key(FIELD_ID) {
            let fallback = document
                .get(FIELD_USERNAME)
                .and_then(Value::as_str)
                .map(|username| format!("u-{username}"))
                .unwrap_or_default();
            document.insert(FIELD_ID.to_string(), Value::from(fallback));
        }

        serde_json::from_value(Value::Object(document))
            .map_err(|e| DomainError::storage(format!("Corrupt user record: {e}")))
    }
}

#[async_trait]
impl UserRepository for DocumentUserRepository {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let found = self
            .users
            .find_one(&Filter::eq(FIELD_USERNAME, username))
            .await?;

        found.map(Self::from_document).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        // Read-side uniqueness check; a multi-process deployment backs this
        // with a unique index on the store.
        if self.username_exists(user.username()).await? {
            return Err(DomainError::duplicate(format!(
                "Username '{}' already exists",
                user.username()
            )));
        }

        let document = Self::to_document(&user)?;
        self.users.insert_one(document).await?;
        Ok(user)
    }

    async fn delete_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let deleted = self
            .users
            .delete_one(&Filter::eq(FIELD_USERNAME, username))
            .await?;
        Ok(deleted > 0)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let documents = self.users.find_many(&Filter::All).await?;

        let mut users = Vec::with_capacity(documents.len());
        for document in documents {
            match Self::from_document(document) {
                Ok(user) => users.push(user),
                Err(e) => tracing::warn!("Skipping unreadable user record: {e}"),
            }
        }

        Ok(users)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.users.count(&Filter::All).await
    }
}
