//! # Document Store
//!
//! The document store is an external collaborator. The core only needs a
//! keyed JSON document store with an atomic multi-document batch:
//!
//! - `get(collection, id)` → document or absent
//! - `commit(batch)` → every `set`/`delete` in the batch applies, or none do
//!
//! Access control lives in the store's own rule layer; a store refusing a
//! write reports [`StoreError::PermissionDenied`].

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// collection → id → document
pub type Collections = BTreeMap<String, BTreeMap<String, Value>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One write inside a batch
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create or replace a document. With `merge`, top-level fields are
    /// merged into an existing document instead of replacing it.
    Set {
        collection: String,
        id: String,
        document: Value,
        merge: bool,
    },

    /// Remove a document (absent documents are fine)
    Delete { collection: String, id: String },
}

impl WriteOp {
    pub fn collection(&self) -> &str {
        match self {
            WriteOp::Set { collection, .. } | WriteOp::Delete { collection, .. } => collection,
        }
    }
}

/// Writes applied as a single atomic unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, collection: &str, id: &str, document: Value) -> Self {
        self.ops.push(WriteOp::Set {
            collection: collection.to_string(),
            id: id.to_string(),
            document,
            merge: false,
        });
        self
    }

    pub fn merge(mut self, collection: &str, id: &str, document: Value) -> Self {
        self.ops.push(WriteOp::Set {
            collection: collection.to_string(),
            id: id.to_string(),
            document,
            merge: true,
        });
        self
    }

    pub fn delete(mut self, collection: &str, id: &str) -> Self {
        self.ops.push(WriteOp::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        self
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Apply every op to `data` in order
    pub fn apply_to(&self, data: &mut Collections) {
        for op in &self.ops {
            match op {
                WriteOp::Set {
                    collection,
                    id,
                    document,
                    merge,
                } => {
                    let docs = data.entry(collection.clone()).or_default();
                    match (docs.get_mut(id), document) {
                        (Some(Value::Object(existing)), Value::Object(fields)) if *merge => {
                            for (key, value) in fields {
                                existing.insert(key.clone(), value.clone());
                            }
                        }
                        _ => {
                            docs.insert(id.clone(), document.clone());
                        }
                    }
                }
                WriteOp::Delete { collection, id } => {
                    if let Some(docs) = data.get_mut(collection) {
                        docs.remove(id);
                    }
                }
            }
        }
    }
}

/// Keyed JSON document store with atomic batches
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Apply a batch atomically
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;

    /// Write a single document
    async fn set(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError> {
        self.commit(WriteBatch::new().set(collection, id, document)).await
    }

    /// Delete a single document
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.commit(WriteBatch::new().delete(collection, id)).await
    }
}
