//! Abstraction over the remote path-addressed document store.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::StoreError;

/// Path-addressed document read/write with merge semantics on write.
///
/// Paths are `/`-separated segments (`users/<uid>/cashbook/<year>`). A write
/// merges the supplied top-level fields into the existing document; fields
/// not included stay untouched on the remote side.
pub trait DocumentStore: Send + Sync {
    /// Reads the document at `path`, or `None` when it does not exist.
    fn get(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Merge-writes `fields` into the document at `path`, creating it when
    /// absent.
    fn set_merge(&self, path: &str, fields: Value) -> Result<(), StoreError>;
}

/// Shallow-merges `fields` into `existing`, the way the remote store applies
/// merge writes: top-level fields are replaced wholesale, untouched fields
/// are preserved.
pub fn merge_document(existing: Option<Value>, fields: Value) -> Value {
    match (existing, fields) {
        (Some(Value::Object(mut base)), Value::Object(update)) => {
            for (key, value) in update {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (_, update) => update,
    }
}

/// In-memory document store for hosts without a remote backend and for tests.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a document exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.documents
            .lock()
            .expect("document store mutex poisoned")
            .contains_key(path)
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .documents
            .lock()
            .expect("document store mutex poisoned")
            .get(path)
            .cloned())
    }

    fn set_merge(&self, path: &str, fields: Value) -> Result<(), StoreError> {
        let mut documents = self
            .documents
            .lock()
            .expect("document store mutex poisoned");
        let merged = merge_document(documents.get(path).cloned(), fields);
        documents.insert(path.to_string(), merged);
        Ok(())
    }
}
