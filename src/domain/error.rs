use thiserror::Error;

/// Core domain errors
///
/// Everything except `Storage` is a recoverable, expected outcome that the
/// presentation layer turns into a message; `Storage` means the persistence
/// collaborator itself failed and is surfaced up as-is.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Duplicate: {message}")]
    Duplicate { message: String },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Permission denied: {message}")]
    Permission { message: String },

    #[error("Concurrent update lost: {message}")]
    Concurrency { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    pub fn concurrency(message: impl Into<String>) -> Self {
        Self::Concurrency {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the caller can recover by changing the request
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Storage { .. })
    }
}
