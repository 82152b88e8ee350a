//! JSON file document store.
//!
//! All collections live in one `store.json` under the root directory. A
//! commit rewrites the whole file through a temp file and a rename, so a
//! crash mid-write leaves the previous contents in place.

use crate::store::{Collections, DocumentStore, StoreError, WriteBatch};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::debug;

const STORE_FILE: &str = "store.json";

#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (or lazily create) a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lock: Mutex::new(()),
        }
    }

    fn path(&self) -> PathBuf {
        self.root.join(STORE_FILE)
    }

    async fn load(&self) -> Result<Collections, StoreError> {
        match tokio::fs::read_to_string(self.path()).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Collections::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, data: &Collections) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let tmp = self.root.join(format!("{}.tmp", STORE_FILE));
        let raw = serde_json::to_string_pretty(data)?;

        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, self.path()).await?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut data = self.load().await?;
        Ok(data.get_mut(collection).and_then(|docs| docs.remove(id)))
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let mut data = self.load().await?;
        batch.apply_to(&mut data);
        self.persist(&data).await?;

        debug!(ops = batch.ops().len(), path = %self.path().display(), "committed batch");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = TempDir::new().unwrap();

        let store = JsonFileStore::new(dir.path());
        store
            .commit(
                WriteBatch::new()
                    .set("pages", "p1", json!({ "pageName": "Home" }))
                    .set("publishedPages", "p1", json!({ "pageName": "Home" })),
            )
            .await
            .unwrap();

        let reopened = JsonFileStore::new(dir.path());
        assert_eq!(
            reopened.get("pages", "p1").await.unwrap().unwrap()["pageName"],
            "Home"
        );
        assert!(reopened.get("publishedPages", "p1").await.unwrap().is_some());
        assert!(!dir.path().join("store.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));

        assert!(store.get("pages", "p1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("store.json"), "{ not json").unwrap();

        let store = JsonFileStore::new(dir.path());
        assert!(matches!(
            store.get("pages", "p1").await,
            Err(StoreError::Serialization(_))
        ));
    }
}
