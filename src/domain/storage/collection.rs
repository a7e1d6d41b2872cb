//! Storage trait definitions

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::filter::{Filter, Update};
use super::Document;

/// Result of a conditional update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents that matched the filter
    pub matched: u64,
    /// Documents actually modified
    pub modified: u64,
}

/// One logical collection of documents.
///
/// `update_one` is the concurrency primitive of this crate: the store
/// evaluates the filter and applies the changes inside a single critical
/// section, so a filter like `copiesAvailable > 0` combined with a
/// decrement can never drive the counter negative, no matter how many
/// callers race on the last copy.
#[async_trait]
pub trait DocumentCollection: Send + Sync + Debug {
    /// First document matching the filter, if any
    async fn find_one(&self, filter: &Filter) -> Result<Option<Document>, DomainError>;

    /// All documents matching the filter, as a one-shot snapshot
    async fn find_many(&self, filter: &Filter) -> Result<Vec<Document>, DomainError>;

    /// Insert a new document
    async fn insert_one(&self, document: Document) -> Result<(), DomainError>;

    /// Atomically apply the changes to the first matching document
    async fn update_one(
        &self,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateOutcome, DomainError>;

    /// Delete the first matching document, returning the number deleted
    async fn delete_one(&self, filter: &Filter) -> Result<u64, DomainError>;

    /// Count matching documents
    async fn count(&self, filter: &Filter) -> Result<u64, DomainError>;
}

/// The store itself: a namespace of collections.
pub trait DocumentStore: Send + Sync + Debug {
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection>;
}
