//! User directory service

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::authorization::{Capability, CapabilityTable};
use crate::domain::user::{
    validate_password, validate_student_number, validate_username, Role, User, UserRepository,
};
use crate::domain::DomainError;

use super::password::CredentialScheme;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    /// Stable opaque id; generated when the caller leaves it out
    pub id: Option<String>,
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl CreateUserRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            id: None,
            username: username.into(),
            password: password.into(),
            role,
        }
    }
}

/// Uniqueness-checked user CRUD and authentication lookup.
///
/// Every mutating call is gated on the capability table before it touches
/// the repository.
#[derive(Debug)]
pub struct UserDirectory<R: UserRepository, C: CredentialScheme> {
    repository: Arc<R>,
    credentials: Arc<C>,
    gate: Arc<CapabilityTable>,
}

impl<R: UserRepository, C: CredentialScheme> UserDirectory<R, C> {
    pub fn new(repository: Arc<R>, credentials: Arc<C>, gate: Arc<CapabilityTable>) -> Self {
        Self {
            repository,
            credentials,
            gate,
        }
    }

    /// Create a new user on behalf of `actor`.
    pub async fn add_user(
        &self,
        actor: &User,
        request: CreateUserRequest,
    ) -> Result<User, DomainError> {
        self.gate
            .authorize(actor.role_type(), Capability::ManageUsers)?;

        validate_username(&request.username)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(student_number) = request.role.student_number() {
            validate_student_number(student_number)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::duplicate(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        let id = request
            .id
            .unwrap_or_else(|| format!("u-{}", Uuid::new_v4()));
        let stored_credential = self.credentials.protect(&request.password);
        let user = User::new(id, &request.username, stored_credential, request.role);

        let created = self.repository.create(user).await?;
        tracing::info!(
            username = created.username(),
            role = %created.role_type(),
            "User created"
        );
        Ok(created)
    }

    /// Remove a user by username on behalf of `actor`.
    pub async fn remove_user(&self, actor: &User, username: &str) -> Result<(), DomainError> {
        self.gate
            .authorize(actor.role_type(), Capability::ManageUsers)?;

        if !self.repository.delete_by_username(username).await? {
            return Err(DomainError::not_found(format!(
                "User '{username}' not found"
            )));
        }

        tracing::info!(username, "User removed");
        Ok(())
    }

    /// Lookup by username; absence is `Ok(None)`, not an error.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.repository.get_by_username(username).await
    }

    /// One-shot snapshot of all users, order unspecified.
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Authenticate with an exact credential match. One `Auth` error
    /// covers both an unknown username and a wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .repository
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::auth("Invalid username or password"))?;

        if !self.credentials.verify(password, user.password()) {
            return Err(DomainError::auth("Invalid username or password"));
        }

        tracing::debug!(username, "Login succeeded");
        Ok(user)
    }
}
