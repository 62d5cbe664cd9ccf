//! Read access to the named-collection document store the listings live in.
//!
//! The store is not ours: documents are written by whoever manages the
//! listings, and the site only ever scans a collection or looks one document up.

pub mod firestore;
pub mod sqlite;

use serde_json::{Map, Value};
use thiserror::Error;

pub use firestore::{FirestoreConfig, FirestoreStore};
pub use sqlite::SqliteStore;

/// One document as stored: its key plus loosely-typed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// Access rules on the store refused the read.
    #[error("permission denied reading collection '{collection}'")]
    PermissionDenied { collection: String },

    #[error("{0}")]
    Transport(String),

    #[error("malformed document: {0}")]
    Parse(String),
}

/// Query-by-collection and get-by-id. Implementations are shared across
/// server workers.
pub trait DocumentStore: Send + Sync {
    /// Every document in `collection`. Unknown collections are empty.
    fn list(&self, collection: &str) -> Result<Vec<RawDocument>, StoreError>;

    /// A single document, `None` when the id does not exist.
    fn get(&self, collection: &str, id: &str) -> Result<Option<RawDocument>, StoreError>;
}
