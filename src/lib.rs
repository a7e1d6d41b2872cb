//! Library lending core
//!
//! The lending/authorization engine of a small library system:
//! - role-tagged users with a uniqueness-checked directory and
//!   credential-lookup authentication
//! - a polymorphic book catalog (printed copies and ebooks) keyed by ISBN
//! - a borrow/return state machine with an append-only transaction log
//! - an explicit role → capability table consulted before every mutating
//!   call
//!
//! Persistence is an opaque document store behind the
//! [`domain::DocumentStore`] trait; an in-memory backend ships for tests
//! and embedded use. Presentation (GUI, CLI, HTTP) is an external consumer
//! of the services assembled by [`LibrarySystem`].

pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

pub use config::AppConfig;
pub use domain::DomainError;

use domain::authorization::CapabilityTable;
use domain::storage::DocumentStore;
use infrastructure::catalog::{CatalogService, DocumentBookRepository};
use infrastructure::lending::{DocumentTransactionRepository, LendingService};
use infrastructure::storage::InMemoryDocumentStore;
use infrastructure::user::{DocumentUserRepository, PlaintextCredentials, UserDirectory};

/// Directory service over the document store
pub type DocumentUserDirectory = UserDirectory<DocumentUserRepository, PlaintextCredentials>;
/// Catalog service over the document store
pub type DocumentCatalogService = CatalogService<DocumentBookRepository>;
/// Lending service over the document store
pub type DocumentLendingService =
    LendingService<DocumentBookRepository, DocumentTransactionRepository>;

/// The assembled lending core: directory, catalog and lending engine
/// sharing one capability table and one document store.
#[derive(Debug)]
pub struct LibrarySystem {
    users: Arc<DocumentUserRepository>,
    books: Arc<DocumentBookRepository>,
    directory: Arc<DocumentUserDirectory>,
    catalog: Arc<DocumentCatalogService>,
    lending: Arc<DocumentLendingService>,
    gate: Arc<CapabilityTable>,
}

impl LibrarySystem {
    /// Assemble the services over the given store with the library
    /// capability matrix.
    pub fn new(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Self {
        let gate = Arc::new(CapabilityTable::library());

        let users = Arc::new(DocumentUserRepository::new(
            store.collection(&config.collections.users),
        ));
        let books = Arc::new(DocumentBookRepository::new(
            store.collection(&config.collections.books),
        ));
        let transactions = Arc::new(DocumentTransactionRepository::new(
            store.collection(&config.collections.transactions),
        ));

        let directory = Arc::new(UserDirectory::new(
            users.clone(),
            Arc::new(PlaintextCredentials),
            gate.clone(),
        ));
        let catalog = Arc::new(CatalogService::new(books.clone(), gate.clone()));
        let lending = Arc::new(LendingService::new(
            books.clone(),
            transactions,
            gate.clone(),
            config.lending.loan_period_days,
        ));

        Self {
            users,
            books,
            directory,
            catalog,
            lending,
            gate,
        }
    }

    /// Assemble over a fresh in-memory store.
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::new(Arc::new(InMemoryDocumentStore::new()), config)
    }

    /// Seed the default administrator and sample catalog entry on first
    /// run. Idempotent.
    pub async fn seed_defaults(&self) -> Result<(), DomainError> {
        infrastructure::seed::ensure_seed_data(self.users.as_ref(), self.books.as_ref()).await
    }

    pub fn directory(&self) -> &DocumentUserDirectory {
        &self.directory
    }

    pub fn catalog(&self) -> &DocumentCatalogService {
        &self.catalog
    }

    pub fn lending(&self) -> &DocumentLendingService {
        &self.lending
    }

    pub fn gate(&self) -> &CapabilityTable {
        &self.gate
    }
}
