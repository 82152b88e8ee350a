//! In-memory document store.
//!
//! Used by tests and by hosts that keep pages in process. Supports failure
//! injection so callers can exercise the "store down" and "rules refused the
//! write" paths without a real backend.

use crate::store::{Collections, DocumentStore, StoreError, WriteBatch};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    data: Collections,
    unavailable: bool,
    denied: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read and write fail with [`StoreError::Unavailable`]
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.inner.write().await.unavailable = unavailable;
    }

    /// Refuse batches that write to `collection`
    pub async fn deny_writes(&self, collection: &str) {
        self.inner.write().await.denied.insert(collection.to_string());
    }

    pub async fn allow_writes(&self, collection: &str) {
        self.inner.write().await.denied.remove(collection);
    }

    pub async fn document_count(&self, collection: &str) -> usize {
        self.inner
            .read()
            .await
            .data
            .get(collection)
            .map_or(0, |docs| docs.len())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let inner = self.inner.read().await;
        if inner.unavailable {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(inner
            .data
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.unavailable {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }

        if let Some(op) = batch.ops().iter().find(|op| inner.denied.contains(op.collection())) {
            return Err(StoreError::PermissionDenied(format!(
                "writes to '{}' are not allowed",
                op.collection()
            )));
        }

        // Apply to a copy so a batch is all-or-nothing
        let mut next = inner.data.clone();
        batch.apply_to(&mut next);
        inner.data = next;

        Ok(())
    }
}
