//! Infrastructure layer - storage backends, repositories and services

pub mod catalog;
pub mod lending;
pub mod logging;
pub mod seed;
pub mod storage;
pub mod user;

pub use catalog::{CatalogService, DocumentBookRepository};
pub use lending::{DocumentTransactionRepository, LendingService};
pub use storage::{InMemoryCollection, InMemoryDocumentStore};
pub use user::{CreateUserRequest, DocumentUserRepository, PlaintextCredentials, UserDirectory};
