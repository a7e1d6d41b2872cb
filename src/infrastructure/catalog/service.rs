//! Catalog service

use std::sync::Arc;

use crate::domain::authorization::{Capability, CapabilityTable};
use crate::domain::book::{validate_isbn, validate_title, Book, BookChanges, BookRepository};
use crate::domain::user::User;
use crate::domain::DomainError;

/// Book catalog CRUD, keyed by ISBN and gated on the capability table.
#[derive(Debug)]
pub struct CatalogService<R: BookRepository> {
    repository: Arc<R>,
    gate: Arc<CapabilityTable>,
}

impl<R: BookRepository> CatalogService<R> {
    pub fn new(repository: Arc<R>, gate: Arc<CapabilityTable>) -> Self {
        Self { repository, gate }
    }

    /// Add a book on behalf of `actor`. The repository stamps the
    /// store-assigned metadata (`createdDate`, `lastUpdated`).
    pub async fn add_book(&self, actor: &User, book: Book) -> Result<Book, DomainError> {
        self.gate
            .authorize(actor.role_type(), Capability::ManageCatalog)?;

        validate_isbn(book.isbn()).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_title(book.title()).map_err(|e| DomainError::validation(e.to_string()))?;

        let created = self.repository.create(book).await?;
        tracing::info!(isbn = created.isbn(), title = created.title(), "Book added");
        Ok(created)
    }

    /// Lookup by ISBN; absence is `Ok(None)`, not an error.
    pub async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, DomainError> {
        self.repository.get_by_isbn(isbn).await
    }

    /// Merge the named fields into an existing book and refresh its
    /// `lastUpdated` stamp.
    pub async fn update_book(
        &self,
        actor: &User,
        isbn: &str,
        changes: BookChanges,
    ) -> Result<Book, DomainError> {
        self.gate
            .authorize(actor.role_type(), Capability::ManageCatalog)?;

        if let Some(title) = &changes.title {
            validate_title(title).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if !self.repository.update_fields(isbn, &changes).await? {
            return Err(DomainError::not_found(format!(
                "Book with ISBN '{isbn}' not found"
            )));
        }

        self.repository
            .get_by_isbn(isbn)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Book with ISBN '{isbn}' not found")))
    }

    /// Delete a book on behalf of `actor`.
    pub async fn remove_book(&self, actor: &User, isbn: &str) -> Result<(), DomainError> {
        self.gate
            .authorize(actor.role_type(), Capability::RemoveCatalogItem)?;

        if !self.repository.delete_by_isbn(isbn).await? {
            return Err(DomainError::not_found(format!(
                "Book with ISBN '{isbn}' not found"
            )));
        }

        tracing::info!(isbn, "Book removed");
        Ok(())
    }

    /// One-shot snapshot of the catalog, order unspecified.
    pub async fn list_books(&self) -> Result<Vec<Book>, DomainError> {
        self.repository.list().await
    }
}
