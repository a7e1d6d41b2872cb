//! Book entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format-specific payload of a book.
///
/// Serialized with the `type` discriminator the store uses, so a printed
/// book persists as `{"type": "printed", "copiesAvailable": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BookFormat {
    Printed {
        /// Copies currently on the shelf; never negative by construction
        #[serde(rename = "copiesAvailable")]
        copies_available: u32,
        /// Stored availability flag, kept in step with the counter by the
        /// repository's conditional updates. Readers should prefer
        /// [`Book::is_available`], which derives from the counter.
        #[serde(rename = "isAvailable", default)]
        is_available: bool,
        /// Username of the current or most recent borrower (audit trail,
        /// not multi-borrower tracking)
        #[serde(rename = "borrowedBy", default, skip_serializing_if = "Option::is_none")]
        borrowed_by: Option<String>,
    },
    Ebook {
        #[serde(rename = "downloadUrl")]
        download_url: String,
    },
}

/// Book entity, keyed by ISBN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    isbn: String,
    title: String,
    author: String,
    #[serde(flatten)]
    format: BookFormat,
    /// Store-assigned on insert
    #[serde(rename = "createdDate", default, skip_serializing_if = "Option::is_none")]
    created_date: Option<DateTime<Utc>>,
    /// Store-assigned on every mutation
    #[serde(rename = "lastUpdated", default, skip_serializing_if = "Option::is_none")]
    last_updated: Option<DateTime<Utc>>,
}

impl Book {
    /// Create a printed book with the given number of copies
    pub fn printed(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        copies_available: u32,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            format: BookFormat::Printed {
                copies_available,
                is_available: copies_available > 0,
                borrowed_by: None,
            },
            created_date: None,
            last_updated: None,
        }
    }

    /// Create an ebook; ebooks are always available to access
    pub fn ebook(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        download_url: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            format: BookFormat::Ebook {
                download_url: download_url.into(),
            },
            created_date: None,
            last_updated: None,
        }
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn format(&self) -> &BookFormat {
        &self.format
    }

    /// Availability, derived from the copy counter for printed books;
    /// ebooks are always available
    pub fn is_available(&self) -> bool {
        match &self.format {
            BookFormat::Printed {
                copies_available, ..
            } => *copies_available > 0,
            BookFormat::Ebook { .. } => true,
        }
    }

    /// Copy counter for printed books, `None` for ebooks
    pub fn copies_available(&self) -> Option<u32> {
        match &self.format {
            BookFormat::Printed {
                copies_available, ..
            } => Some(*copies_available),
            BookFormat::Ebook { .. } => None,
        }
    }

    /// Current or most recent borrower of a printed book
    pub fn borrowed_by(&self) -> Option<&str> {
        match &self.format {
            BookFormat::Printed { borrowed_by, .. } => borrowed_by.as_deref(),
            BookFormat::Ebook { .. } => None,
        }
    }

    pub fn created_date(&self) -> Option<DateTime<Utc>> {
        self.created_date
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

/// How the lending engine identifies a book: by its ISBN, or by a title
/// lookup (preserved two-phase policy: exact case-insensitive match first,
/// then case-insensitive substring).
#[derive(Debug, Clone, PartialEq)]
pub enum BookQuery {
    Isbn(String),
    Title(String),
}

impl BookQuery {
    pub fn isbn(isbn: impl Into<String>) -> Self {
        Self::Isbn(isbn.into())
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self::Title(title.into())
    }
}

/// Named-field changes for a catalog update. Only lending metadata can be
/// updated; commerce fields have no representation here at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub copies_available: Option<u32>,
    pub download_url: Option<String>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.copies_available.is_none()
            && self.download_url.is_none()
    }
}
