//! Document-backed book repository

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::book::{Book, BookChanges, BookQuery, BookRepository};
use crate::domain::storage::{Document, DocumentCollection, Filter, Update};
use crate::domain::DomainError;

const FIELD_ISBN: &str = "isbn";
const FIELD_TITLE: &str = "title";
const FIELD_TYPE: &str = "type";
const FIELD_COPIES: &str = "copiesAvailable";
const FIELD_AVAILABLE: &str = "isAvailable";
const FIELD_BORROWED_BY: &str = "borrowedBy";
const FIELD_CREATED: &str = "createdDate";
const FIELD_UPDATED: &str = "lastUpdated";

const TYPE_PRINTED: &str = "printed";
const TYPE_EBOOK: &str = "ebook";

fn now_value() -> Value {
    serde_json::to_value(Utc::now()).unwrap_or(Value::Null)
}

/// [`BookRepository`] over a `books` document collection.
///
/// Title queries preserve the legacy two-phase policy: an anchored
/// case-insensitive match first, then the raw input as a case-insensitive
/// substring pattern. The fallback can match several records, in which
/// case the store's first match wins, kept for compatibility.
#[derive(Debug)]
pub struct DocumentBookRepository {
    books: Arc<dyn DocumentCollection>,
}

impl DocumentBookRepository {
    pub fn new(books: Arc<dyn DocumentCollection>) -> Self {
        Self { books }
    }

    fn to_document(book: &Book) -> Result<Document, DomainError> {
        match serde_json::to_value(book) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) => Err(DomainError::storage("Book did not serialize to an object")),
            Err(e) => Err(DomainError::storage(format!("Book serialization failed: {e}"))),
        }
    }

    fn from_document(document: Document) -> Result<Book, DomainError> {
        serde_json::from_value(Value::Object(document))
            .map_err(|e| DomainError::storage(format!("Corrupt book record: {e}")))
    }

    fn exact_title(title: &str) -> Filter {
        Filter::regex(FIELD_TITLE, format!("(?i)^{}$", regex::escape(title)))
    }

    fn loose_title(title: &str) -> Filter {
        // The raw input doubles as the pattern, as the original did.
        Filter::regex(FIELD_TITLE, format!("(?i){title}"))
    }

    /// Two-phase title resolution against extra conditions.
    async fn resolve_title(
        &self,
        title: &str,
        base: &[Filter],
    ) -> Result<Option<Document>, DomainError> {
        let mut exact = base.to_vec();
        exact.push(Self::exact_title(title));
        if let Some(document) = self.books.find_one(&Filter::And(exact)).await? {
            return Ok(Some(document));
        }

        let mut loose = base.to_vec();
        loose.push(Self::loose_title(title));
        self.books.find_one(&Filter::And(loose)).await
    }
}

#[async_trait]
impl BookRepository for DocumentBookRepository {
    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>, DomainError> {
        let found = self.books.find_one(&Filter::eq(FIELD_ISBN, isbn)).await?;
        found.map(Self::from_document).transpose()
    }

    async fn find_available(&self, query: &BookQuery) -> Result<Option<Book>, DomainError> {
        match query {
            BookQuery::Isbn(isbn) => {
                let book = self.get_by_isbn(isbn).await?;
                Ok(book.filter(Book::is_available))
            }
            BookQuery::Title(title) => {
                let base = [Filter::eq(FIELD_AVAILABLE, true)];
                let document = self.resolve_title(title, &base).await?;
                document.map(Self::from_document).transpose()
            }
        }
    }

    async fn find_borrowed_by(
        &self,
        query: &BookQuery,
        username: &str,
    ) -> Result<Option<Book>, DomainError> {
        let base = vec![
            Filter::eq(FIELD_TYPE, TYPE_PRINTED),
            Filter::eq(FIELD_BORROWED_BY, username),
        ];

        let document = match query {
            BookQuery::Isbn(isbn) => {
                let mut filters = base;
                filters.push(Filter::eq(FIELD_ISBN, isbn.as_str()));
                self.books.find_one(&Filter::And(filters)).await?
            }
            BookQuery::Title(title) => self.resolve_title(title, &base).await?,
        };

        document.map(Self::from_document).transpose()
    }

    async fn create(&self, book: Book) -> Result<Book, DomainError> {
        if self.isbn_exists(book.isbn()).await? {
            return Err(DomainError::duplicate(format!(
                "Book with ISBN '{}' already exists",
                book.isbn()
            )));
        }

        let mut document = Self::to_document(&book)?;
        let now = now_value();
        document.entry(FIELD_CREATED).or_insert(now.clone());
        document.insert(FIELD_UPDATED.to_string(), now);
        // Ebooks carry the availability flag too, so resolution filters
        // treat both formats uniformly (legacy record shape).
        if document.get(FIELD_TYPE).and_then(Value::as_str) == Some(TYPE_EBOOK) {
            document.insert(FIELD_AVAILABLE.to_string(), Value::from(true));
        }

        let stored = Self::from_document(document.clone())?;
        self.books.insert_one(document).await?;
        Ok(stored)
    }

    async fn update_fields(&self, isbn: &str, changes: &BookChanges) -> Result<bool, DomainError> {
        let mut update = Update::new();

        if let Some(title) = &changes.title {
            update = update.set(FIELD_TITLE, title.as_str());
        }
        if let Some(author) = &changes.author {
            update = update.set("author", author.as_str());
        }
        if let Some(copies) = changes.copies_available {
            update = update
                .set(FIELD_COPIES, copies)
                .set(FIELD_AVAILABLE, copies > 0);
        }
        if let Some(download_url) = &changes.download_url {
            update = update.set("downloadUrl", download_url.as_str());
        }

        // Commerce fields never survive a catalog write.
        update = update
            .unset("price")
            .unset("cost")
            .set(FIELD_UPDATED, now_value());

        let outcome = self
            .books
            .update_one(&Filter::eq(FIELD_ISBN, isbn), &update)
            .await?;
        Ok(outcome.matched > 0)
    }

    async fn delete_by_isbn(&self, isbn: &str) -> Result<bool, DomainError> {
        let deleted = self.books.delete_one(&Filter::eq(FIELD_ISBN, isbn)).await?;
        Ok(deleted > 0)
    }

    async fn list(&self) -> Result<Vec<Book>, DomainError> {
        let documents = self.books.find_many(&Filter::All).await?;

        let mut books = Vec::with_capacity(documents.len());
        for document in documents {
            match Self::from_document(document) {
                Ok(book) => books.push(book),
                Err(e) => tracing::warn!("Skipping unreadable book record: {e}"),
            }
        }

        Ok(books)
    }

    async fn acquire_copy(&self, isbn: &str, borrower: &str) -> Result<bool, DomainError> {
        let filter = Filter::and([
            Filter::eq(FIELD_ISBN, isbn),
            Filter::eq(FIELD_TYPE, TYPE_PRINTED),
            Filter::gt(FIELD_COPIES, 0),
        ]);
        let update = Update::new()
            .inc(FIELD_COPIES, -1)
            .set(FIELD_BORROWED_BY, borrower)
            .set(FIELD_UPDATED, now_value());

        let outcome = self.books.update_one(&filter, &update).await?;
        if outcome.modified == 0 {
            return Ok(false);
        }

        // Keep the stored flag in step once the last copy is gone. The
        // counter condition makes this a no-op while copies remain.
        self.books
            .update_one(
                &Filter::and([Filter::eq(FIELD_ISBN, isbn), Filter::eq(FIELD_COPIES, 0)]),
                &Update::new().set(FIELD_AVAILABLE, false),
            )
            .await?;

        Ok(true)
    }

    async fn release_copy(&self, isbn: &str, borrower: &str) -> Result<bool, DomainError> {
        let filter = Filter::and([
            Filter::eq(FIELD_ISBN, isbn),
            Filter::eq(FIELD_TYPE, TYPE_PRINTED),
            Filter::eq(FIELD_BORROWED_BY, borrower),
        ]);
        let update = Update::new()
            .inc(FIELD_COPIES, 1)
            .set(FIELD_BORROWED_BY, Value::Null)
            .set(FIELD_AVAILABLE, true)
            .set(FIELD_UPDATED, now_value());

        let outcome = self.books.update_one(&filter, &update).await?;
        Ok(outcome.modified > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryCollection;
    use serde_json::json;

    fn repo() -> (DocumentBookRepository, Arc<InMemoryCollection>) {
        let collection = Arc::new(InMemoryCollection::new());
        (DocumentBookRepository::new(collection.clone()), collection)
    }

    #[tokio::test]
    async fn test_create_stamps_metadata() {
        let (repo, _) = repo();

        let stored = repo
            .create(Book::printed("X1", "Go", "A. Donovan", 2))
            .await
            .unwrap();

        assert!(stored.created_date().is_some());
        assert!(stored.last_updated().is_some());
        assert_eq!(stored.copies_available(), Some(2));
    }

    #[tokio::test]
    async fn test_duplicate_isbn() {
        let (repo, _) = repo();
        repo.create(Book::printed("X1", "Go", "A. Donovan", 1))
            .await
            .unwrap();

        let result = repo.create(Book::ebook("X1", "Go", "A. Donovan", "u")).await;
        assert!(matches!(result, Err(DomainError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_find_available_by_isbn_excludes_exhausted() {
        let (repo, _) = repo();
        repo.create(Book::printed("X1", "Go", "A. Donovan", 0))
            .await
            .unwrap();

        let found = repo.find_available(&BookQuery::isbn("X1")).await.unwrap();
        assert!(found.is_none());

        // The book still exists as a lookup target
        assert!(repo.get_by_isbn("X1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_title_resolution_prefers_exact_match() {
        let (repo, _) = repo();
        repo.create(Book::printed("R2", "Rust in Action", "T. McNamara", 1))
            .await
            .unwrap();
        repo.create(Book::printed("R1", "Rust", "S. Klabnik", 1))
            .await
            .unwrap();

        // "Rust in Action" was inserted first and matches as a substring,
        // but the exact phase wins.
        let found = repo
            .find_available(&BookQuery::title("rust"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.isbn(), "R1");

        // Substring fallback still resolves partial input
        let found = repo
            .find_available(&BookQuery::title("in action"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.isbn(), "R2");
    }

    #[tokio::test]
    async fn test_ebook_is_always_resolvable_by_title() {
        let (repo, _) = repo();
        repo.create(Book::ebook("E1", "Async Rust", "M. Gjengset", "https://x/e1"))
            .await
            .unwrap();

        let found = repo
            .find_available(&BookQuery::title("async rust"))
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_acquire_and_release_copy() {
        let (repo, _) = repo();
        repo.create(Book::printed("X1", "Go", "A. Donovan", 1))
            .await
            .unwrap();

        assert!(repo.acquire_copy("X1", "alice").await.unwrap());
        let book = repo.get_by_isbn("X1").await.unwrap().unwrap();
        assert_eq!(book.copies_available(), Some(0));
        assert_eq!(book.borrowed_by(), Some("alice"));
        assert!(!book.is_available());

        // Exhausted: a second borrower loses cleanly
        assert!(!repo.acquire_copy("X1", "bob").await.unwrap());

        // Only the actual borrower can release
        assert!(!repo.release_copy("X1", "bob").await.unwrap());
        assert!(repo.release_copy("X1", "alice").await.unwrap());

        let book = repo.get_by_isbn("X1").await.unwrap().unwrap();
        assert_eq!(book.copies_available(), Some(1));
        assert_eq!(book.borrowed_by(), None);
        assert!(book.is_available());
    }

    #[tokio::test]
    async fn test_acquire_ignores_ebooks() {
        let (repo, _) = repo();
        repo.create(Book::ebook("E1", "Rust", "S. Klabnik", "https://x/e1"))
            .await
            .unwrap();

        assert!(!repo.acquire_copy("E1", "alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_fields_merges_and_strips_price() {
        let (repo, collection) = repo();
        repo.create(Book::printed("X1", "Go", "A. Donovan", 1))
            .await
            .unwrap();

        // A commerce field snuck in through another client
        collection
            .update_one(
                &Filter::eq("isbn", "X1"),
                &Update::new().set("price", 9.99),
            )
            .await
            .unwrap();

        let changes = BookChanges {
            title: Some("The Go Programming Language".to_string()),
            copies_available: Some(0),
            ..Default::default()
        };
        assert!(repo.update_fields("X1", &changes).await.unwrap());

        let document = collection
            .find_one(&Filter::eq("isbn", "X1"))
            .await
            .unwrap()
            .unwrap();
        assert!(!document.contains_key("price"));
        assert_eq!(document.get("isAvailable"), Some(&json!(false)));

        let book = repo.get_by_isbn("X1").await.unwrap().unwrap();
        assert_eq!(book.title(), "The Go Programming Language");
        assert_eq!(book.author(), "A. Donovan");
        assert_eq!(book.copies_available(), Some(0));
    }

    #[tokio::test]
    async fn test_update_fields_missing_isbn() {
        let (repo, _) = repo();
        let updated = repo
            .update_fields("missing", &BookChanges::default())
            .await
            .unwrap();
        assert!(!updated);
    }
}
