//! Lending service - the borrow/return state machine

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::authorization::{Capability, CapabilityTable};
use crate::domain::book::{Book, BookFormat, BookQuery, BookRepository};
use crate::domain::transaction::{LoanAction, Transaction, TransactionRepository};
use crate::domain::user::User;
use crate::domain::DomainError;

/// Borrow/return state transitions with transaction logging.
///
/// Printed books move between Available and Borrowed through the copy
/// counter; the decrement is conditional on availability inside the store,
/// so losing a race on the last copy is a normal negative result, never a
/// negative counter. Ebook "borrows" are access events: nothing changes,
/// an `access-ebook` transaction is appended.
#[derive(Debug)]
pub struct LendingService<B: BookRepository, T: TransactionRepository> {
    books: Arc<B>,
    transactions: Arc<T>,
    gate: Arc<CapabilityTable>,
    loan_period: Duration,
}

impl<B: BookRepository, T: TransactionRepository> LendingService<B, T> {
    pub fn new(
        books: Arc<B>,
        transactions: Arc<T>,
        gate: Arc<CapabilityTable>,
        loan_period_days: i64,
    ) -> Self {
        Self {
            books,
            transactions,
            gate,
            loan_period: Duration::days(loan_period_days),
        }
    }

    /// Borrow a book for `actor`.
    ///
    /// `Ok(false)` is the normal negative result: no matching available
    /// book, or the last copy was taken concurrently. Errors are reserved
    /// for denied permission and storage failure.
    pub async fn borrow(&self, actor: &User, query: &BookQuery) -> Result<bool, DomainError> {
        self.gate.authorize(actor.role_type(), Capability::Lend)?;

        let Some(book) = self.books.find_available(query).await? else {
            tracing::debug!(username = actor.username(), ?query, "Borrow failed: no available book");
            return Ok(false);
        };

        let transaction = match book.format() {
            BookFormat::Printed { .. } => {
                if !self.books.acquire_copy(book.isbn(), actor.username()).await? {
                    // Lost the race between resolution and the update
                    tracing::debug!(isbn = book.isbn(), "Borrow failed: copy taken concurrently");
                    return Ok(false);
                }

                let now = Utc::now();
                Transaction::new(
                    LoanAction::Borrow,
                    book.isbn(),
                    book.title(),
                    actor.username(),
                    now,
                    Some(now + self.loan_period),
                )
            }
            BookFormat::Ebook { .. } => Transaction::new(
                LoanAction::AccessEbook,
                book.isbn(),
                book.title(),
                actor.username(),
                Utc::now(),
                None,
            ),
        };

        let action = transaction.action();
        self.transactions.append(transaction).await?;
        tracing::info!(
            isbn = book.isbn(),
            username = actor.username(),
            %action,
            "Lending event recorded"
        );
        Ok(true)
    }

    /// Return a book for `actor`.
    ///
    /// `Ok(false)` when no printed book borrowed by this user matches:
    /// a user cannot return a book they did not borrow, and ebooks never
    /// enter borrowed state.
    pub async fn return_book(&self, actor: &User, query: &BookQuery) -> Result<bool, DomainError> {
        self.gate.authorize(actor.role_type(), Capability::Lend)?;

        let Some(book) = self.books.find_borrowed_by(query, actor.username()).await? else {
            tracing::debug!(username = actor.username(), ?query, "Return failed: no matching loan");
            return Ok(false);
        };

        if !self.books.release_copy(book.isbn(), actor.username()).await? {
            return Ok(false);
        }

        let transaction = Transaction::new(
            LoanAction::Return,
            book.isbn(),
            book.title(),
            actor.username(),
            Utc::now(),
            None,
        );
        self.transactions.append(transaction).await?;
        tracing::info!(isbn = book.isbn(), username = actor.username(), "Return recorded");
        Ok(true)
    }

    /// Snapshot of the transaction log, optionally for one user.
    pub async fn history(&self, username: Option<&str>) -> Result<Vec<Transaction>, DomainError> {
        self.transactions.list(username).await
    }
}
