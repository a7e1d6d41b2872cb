//! Domain layer - entities, invariants and storage-facing traits

pub mod authorization;
pub mod book;
pub mod error;
pub mod storage;
pub mod transaction;
pub mod user;

pub use authorization::{Capability, CapabilityTable};
pub use book::{Book, BookChanges, BookFormat, BookQuery, BookRepository};
pub use error::DomainError;
pub use storage::{Document, DocumentCollection, DocumentStore, FieldChange, Filter, Update};
pub use transaction::{LoanAction, Transaction, TransactionRepository};
pub use user::{Role, RoleType, User, UserRepository};
