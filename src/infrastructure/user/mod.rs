//! User directory infrastructure

mod directory;
mod password;
mod repository;

pub use directory::{CreateUserRequest, UserDirectory};
pub use password::{CredentialScheme, PlaintextCredentials};
pub use repository::DocumentUserRepository;
