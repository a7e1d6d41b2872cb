//! Transaction entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoanAction {
    /// A printed copy left the shelf
    Borrow,
    /// A printed copy came back
    Return,
    /// An ebook was accessed; no state changed
    AccessEbook,
}

impl std::fmt::Display for LoanAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Borrow => write!(f, "borrow"),
            Self::Return => write!(f, "return"),
            Self::AccessEbook => write!(f, "access-ebook"),
        }
    }
}

/// Immutable, append-only record of one lending event.
///
/// Only the lending service creates these; nothing updates or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    action: LoanAction,
    isbn: String,
    title: String,
    username: String,
    timestamp: DateTime<Utc>,
    /// Due date, present only on borrows of printed books
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(
        action: LoanAction,
        isbn: impl Into<String>,
        title: impl Into<String>,
        username: impl Into<String>,
        timestamp: DateTime<Utc>,
        due_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            action,
            isbn: isbn.into(),
            title: title.into(),
            username: username.into(),
            timestamp,
            due_date,
        }
    }

    pub fn action(&self) -> LoanAction {
        self.action
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }
}
