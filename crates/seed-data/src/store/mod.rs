//! Document store boundary.
//!
//! The seeder only needs four operations from the backing database: fetch a
//! document, replace a document, list a collection, and delete a document.
//! [`FirestoreStore`] talks to Cloud Firestore (or its emulator) over REST;
//! [`MemoryStore`] keeps everything in process for tests and dry runs.

mod credentials;
mod firestore;
mod memory;
mod value;

use async_trait::async_trait;
use thiserror::Error;

pub use credentials::{ResolvedCredentials, ServiceAccountKey, resolve_credentials};
pub use firestore::FirestoreStore;
pub use memory::{MemoryStore, StoreOp};

/// A schemaless document: field name to JSON value.
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Store returned {status} for {path}: {body}")]
    Status {
        status: reqwest::StatusCode,
        path: String,
        body: String,
    },
    #[error("Invalid document data: {0}")]
    Codec(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid store URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Credentials error: {0}")]
    Credentials(String),
}

/// The capability set the seeder depends on.
///
/// `set` is create-or-replace with last-writer-wins semantics; there is no
/// precondition or transaction support.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches a document, returning `None` if it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Writes a document, replacing any existing one with the same id.
    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<(), StoreError>;

    /// Lists every document in a collection as `(id, document)` pairs.
    async fn list(&self, collection: &str) -> Result<Vec<(String, Document)>, StoreError>;

    /// Deletes a document. Deleting a missing document is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
