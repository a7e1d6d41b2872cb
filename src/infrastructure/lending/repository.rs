//! Document-backed transaction repository

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::storage::{Document, DocumentCollection, Filter};
use crate::domain::transaction::{Transaction, TransactionRepository};
use crate::domain::DomainError;

const FIELD_USERNAME: &str = "username";

/// [`TransactionRepository`] over a `transactions` document collection.
/// Append-only by construction: there is no update or delete path.
#[derive(Debug)]
pub struct DocumentTransactionRepository {
    transactions: Arc<dyn DocumentCollection>,
}

impl DocumentTransactionRepository {
    pub fn new(transactions: Arc<dyn DocumentCollection>) -> Self {
        Self { transactions }
    }

    fn to_document(transaction: &Transaction) -> Result<Document, DomainError> {
        match serde_json::to_value(transaction) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) => Err(DomainError::storage(
                "Transaction did not serialize to an object",
            )),
            Err(e) => Err(DomainError::storage(format!(
                "Transaction serialization failed: {e}"
            ))),
        }
    }

    fn from_document(document: Document) -> Result<Transaction, DomainError> {
        serde_json::from_value(Value::Object(document))
            .map_err(|e| DomainError::storage(format!("Corrupt transaction record: {e}")))
    }
}

#[async_trait]
impl TransactionRepository for DocumentTransactionRepository {
    async fn append(&self, transaction: Transaction) -> Result<Transaction, DomainError> {
        let document = Self::to_document(&transaction)?;
        self.transactions.insert_one(document).await?;
        Ok(transaction)
    }

    async fn list(&self, username: Option<&str>) -> Result<Vec<Transaction>, DomainError> {
        let filter = match username {
            Some(username) => Filter::eq(FIELD_USERNAME, username),
            None => Filter::All,
        };

        let documents = self.transactions.find_many(&filter).await?;
        documents.into_iter().map(Self::from_document).collect()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.transactions.count(&Filter::All).await
    }
}
