//! In-memory document store
//!
//! The default backend for tests and embedded use. Each collection is a
//! vector of documents behind a `tokio::sync::RwLock`; `update_one` holds
//! the write lock across match and mutation, which gives conditional
//! updates (the lending engine's compare-and-swap on the copy counter)
//! their atomicity.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

use crate::domain::storage::{
    Document, DocumentCollection, DocumentStore, Filter, Update, UpdateOutcome,
};
use crate::domain::DomainError;

/// One in-memory collection.
#[derive(Debug, Default)]
pub struct InMemoryCollection {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentCollection for InMemoryCollection {
    async fn find_one(&self, filter: &Filter) -> Result<Option<Document>, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|d| filter.matches(d)).cloned())
    }

    async fn find_many(&self, filter: &Filter) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    async fn insert_one(&self, document: Document) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;
        documents.push(document);
        Ok(())
    }

    async fn update_one(
        &self,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateOutcome, DomainError> {
        let mut documents = self.documents.write().await;

        let Some(document) = documents.iter_mut().find(|d| filter.matches(d)) else {
            return Ok(UpdateOutcome::default());
        };

        let before = document.clone();
        update.apply(document);

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(*document != before),
        })
    }

    async fn delete_one(&self, filter: &Filter) -> Result<u64, DomainError> {
        let mut documents = self.documents.write().await;

        match documents.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count(&self, filter: &Filter) -> Result<u64, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().filter(|d| filter.matches(d)).count() as u64)
    }
}

/// In-memory implementation of [`DocumentStore`]. Collections are created
/// lazily on first access and shared between handles.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<HashMap<String, Arc<InMemoryCollection>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        let mut collections = self.collections.lock().expect("collection registry poisoned");
        collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(InMemoryCollection::new()))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let collection = InMemoryCollection::new();
        collection
            .insert_one(doc(json!({"isbn": "X1", "title": "Go"})))
            .await
            .unwrap();

        let found = collection.find_one(&Filter::eq("isbn", "X1")).await.unwrap();
        assert!(found.is_some());

        let missing = collection.find_one(&Filter::eq("isbn", "X2")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_many_snapshot() {
        let collection = InMemoryCollection::new();
        for isbn in ["A", "B", "C"] {
            collection
                .insert_one(doc(json!({"isbn": isbn, "type": "printed"})))
                .await
                .unwrap();
        }

        let all = collection.find_many(&Filter::All).await.unwrap();
        assert_eq!(all.len(), 3);

        let count = collection.count(&Filter::eq("type", "printed")).await.unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_update_one_only_first_match() {
        let collection = InMemoryCollection::new();
        collection
            .insert_one(doc(json!({"username": "alice", "role": "reader"})))
            .await
            .unwrap();
        collection
            .insert_one(doc(json!({"username": "bob", "role": "reader"})))
            .await
            .unwrap();

        let outcome = collection
            .update_one(
                &Filter::eq("role", "reader"),
                &Update::new().set("role", "student"),
            )
            .await
            .unwrap();

        assert_eq!(outcome.matched, 1);
        assert_eq!(outcome.modified, 1);
        let students = collection.count(&Filter::eq("role", "student")).await.unwrap();
        assert_eq!(students, 1);
    }

    #[tokio::test]
    async fn test_update_one_no_match() {
        let collection = InMemoryCollection::new();
        let outcome = collection
            .update_one(&Filter::eq("isbn", "X1"), &Update::new().set("title", "Go"))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::default());
    }

    #[tokio::test]
    async fn test_delete_one() {
        let collection = InMemoryCollection::new();
        collection
            .insert_one(doc(json!({"isbn": "X1"})))
            .await
            .unwrap();

        assert_eq!(collection.delete_one(&Filter::eq("isbn", "X1")).await.unwrap(), 1);
        assert_eq!(collection.delete_one(&Filter::eq("isbn", "X1")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_conditional_decrement_never_goes_negative() {
        let collection = Arc::new(InMemoryCollection::new());
        collection
            .insert_one(doc(json!({"isbn": "X1", "copiesAvailable": 1})))
            .await
            .unwrap();

        // Many concurrent borrowers race on a single copy; the condition
        // lives in the filter, so exactly one update can win.
        let mut handles = Vec::new();
        for _ in 0..8 {
            let collection = Arc::clone(&collection);
            handles.push(tokio::spawn(async move {
                let outcome = collection
                    .update_one(
                        &Filter::and([Filter::eq("isbn", "X1"), Filter::gt("copiesAvailable", 0)]),
                        &Update::new().inc("copiesAvailable", -1),
                    )
                    .await
                    .unwrap();
                outcome.modified
            }));
        }

        let mut wins = 0;
        for handle in handles {
            wins += handle.await.unwrap();
        }
        assert_eq!(wins, 1);

        let stored = collection.find_one(&Filter::eq("isbn", "X1")).await.unwrap().unwrap();
        assert_eq!(stored.get("copiesAvailable"), Some(&json!(0)));
    }

    #[tokio::test]
    async fn test_store_shares_collections() {
        let store = InMemoryDocumentStore::new();
        store
            .collection("users")
            .insert_one(doc(json!({"username": "alice"})))
            .await
            .unwrap();

        let count = store.collection("users").count(&Filter::All).await.unwrap();
        assert_eq!(count, 1);

        let other = store.collection("books").count(&Filter::All).await.unwrap();
        assert_eq!(other, 0);
    }
}
