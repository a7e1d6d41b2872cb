//! Transaction repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Transaction;
use crate::domain::DomainError;

/// Repository trait for the append-only transaction log.
#[async_trait]
pub trait TransactionRepository: Send + Sync + Debug {
    /// Append a record to the log
    async fn append(&self, transaction: Transaction) -> Result<Transaction, DomainError>;

    /// Snapshot of the log, optionally restricted to one user
    async fn list(&self, username: Option<&str>) -> Result<Vec<Transaction>, DomainError>;

    /// Count log entries
    async fn count(&self) -> Result<u64, DomainError>;
}
