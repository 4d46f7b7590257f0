//! In-process document store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use super::{Document, DocumentStore, StoreError};

type Collections = BTreeMap<String, BTreeMap<String, Document>>;

/// A mutation applied to a [`MemoryStore`], recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Set { collection: String, id: String },
    Delete { collection: String, id: String },
}

/// Keeps documents in memory and records every mutation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
    ops: Mutex<Vec<StoreOp>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collections(&self) -> MutexGuard<'_, Collections> {
        self.collections.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, op: StoreOp) {
        self.ops.lock().unwrap_or_else(PoisonError::into_inner).push(op);
    }

    /// Inserts a document without recording a mutation.
    pub fn insert(&self, collection: &str, id: &str, document: Document) {
        self.collections()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
    }

    /// Returns a copy of a document.
    pub fn document(&self, collection: &str, id: &str) -> Option<Document> {
        self.collections()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections().get(collection).map_or(0, BTreeMap::len)
    }

    /// Total number of documents across all collections.
    pub fn total(&self) -> usize {
        self.collections().values().map(BTreeMap::len).sum()
    }

    /// Mutations applied so far, oldest first.
    pub fn mutations(&self) -> Vec<StoreOp> {
        self.ops.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// The whole store as nested JSON: collection, then id, then document.
    pub fn to_json(&self) -> Value {
        let collections = self.collections();
        let object = collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, docs)| {
                let docs = docs
                    .iter()
                    .map(|(id, doc)| (id.clone(), Value::Object(doc.clone())))
                    .collect();
                (name.clone(), Value::Object(docs))
            })
            .collect();
        Value::Object(object)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.document(collection, id))
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<(), StoreError> {
        self.insert(collection, id, document);
        self.record(StoreOp::Set {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Document)>, StoreError> {
        Ok(self
            .collections()
            .get(collection)
            .map(|docs| docs.iter().map(|(id, doc)| (id.clone(), doc.clone())).collect())
            .unwrap_or_default())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        if let Some(docs) = self.collections().get_mut(collection) {
            docs.remove(id);
        }
        self.record(StoreOp::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_set_replaces_document() {
        let store = MemoryStore::new();
        store.set("users", "u1", doc(json!({ "a": 1, "b": 2 }))).await.unwrap();
        store.set("users", "u1", doc(json!({ "a": 3 }))).await.unwrap();

        let stored = store.get("users", "u1").await.unwrap().unwrap();
        assert_eq!(stored, doc(json!({ "a": 3 })));
        assert_eq!(store.count("users"), 1);
        assert_eq!(store.mutations().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let store = MemoryStore::new();
        store.insert("clients", "c1", doc(json!({})));
        store.insert("clients", "c2", doc(json!({})));

        store.delete("clients", "c1").await.unwrap();
        store.delete("clients", "missing").await.unwrap();

        let ids: Vec<String> = store
            .list("clients")
            .await
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, ["c2"]);
        assert!(store.list("nothing").await.unwrap().is_empty());
        assert_eq!(
            store.mutations()[0],
            StoreOp::Delete {
                collection: "clients".to_string(),
                id: "c1".to_string()
            }
        );
    }

    #[test]
    fn test_to_json_skips_empty_collections() {
        let store = MemoryStore::new();
        store.insert("users", "admin001", doc(json!({ "role": "admin" })));
        store.insert("userSettings", "x", doc(json!({})));
        store.collections().get_mut("userSettings").unwrap().clear();

        assert_eq!(
            store.to_json(),
            json!({ "users": { "admin001": { "role": "admin" } } })
        );
    }
}
