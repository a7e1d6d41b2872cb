//! Book repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Book, BookChanges, BookQuery};
use crate::domain::DomainError;

/// Repository trait for the book catalog.
///
/// `acquire_copy` and `release_copy` are the lending engine's state
/// transitions. Both must be implemented as a single conditional update on
/// the store: the availability check belongs inside the store's critical
/// section, never in a local read followed by a write (two borrowers of
/// the last copy would otherwise both succeed).
#[async_trait]
pub trait BookRepository: Send + Sync + Debug {
    /// Get a book by ISBN (lookup, not a precondition check)
    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>, DomainError>;

    /// Resolve an available book for borrowing. Printed books only match
    /// with `copiesAvailable > 0`; ebooks always match. Title queries use
    /// the two-phase policy (exact case-insensitive, then substring).
    async fn find_available(&self, query: &BookQuery) -> Result<Option<Book>, DomainError>;

    /// Resolve a printed book currently borrowed by `username`. Ebooks
    /// never match: access does not create borrowed state.
    async fn find_borrowed_by(
        &self,
        query: &BookQuery,
        username: &str,
    ) -> Result<Option<Book>, DomainError>;

    /// Insert a new book; fails with `Duplicate` if the ISBN exists.
    /// Stamps `createdDate` and `lastUpdated`.
    async fn create(&self, book: Book) -> Result<Book, DomainError>;

    /// Merge the named fields into the stored book and refresh
    /// `lastUpdated`, returning whether a book matched
    async fn update_fields(&self, isbn: &str, changes: &BookChanges) -> Result<bool, DomainError>;

    /// Delete a book by ISBN, returning whether one was deleted
    async fn delete_by_isbn(&self, isbn: &str) -> Result<bool, DomainError>;

    /// Snapshot of the whole catalog, order unspecified
    async fn list(&self) -> Result<Vec<Book>, DomainError>;

    /// Check whether an ISBN is taken
    async fn isbn_exists(&self, isbn: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_isbn(isbn).await?.is_some())
    }

    /// Atomically take one copy of a printed book for `borrower`:
    /// decrement the counter only if it is still positive, record the
    /// borrower and refresh `lastUpdated`. Returns `false` when no copy
    /// was available at the moment of the update.
    async fn acquire_copy(&self, isbn: &str, borrower: &str) -> Result<bool, DomainError>;

    /// Atomically give back a copy borrowed by `borrower`: increment the
    /// counter, clear the borrower and refresh `lastUpdated`. Returns
    /// `false` when the book is not currently borrowed by that user.
    async fn release_copy(&self, isbn: &str, borrower: &str) -> Result<bool, DomainError>;
}
