//! Persistent storage using RocksDB.

use crate::error::{Error, Result};
use crate::KvStore;
use async_trait::async_trait;
use rocksdb::{Options, DB};
use std::path::Path;
use std::sync::Arc;

/// RocksDB-backed store. Database calls run on the blocking pool.
pub struct RocksStore {
    db: Arc<DB>,
}

impl RocksStore {
    /// Open or create storage at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self { db: Arc::new(db) })
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&DB) -> Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || op(&db))
            .await
            .map_err(|e| Error::Backend(format!("storage task failed: {e}")))?
    }
}

#[async_trait]
impl KvStore for RocksStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.blocking(move |db| match db.get(key.as_bytes())? {
            Some(data) => String::from_utf8(data)
                .map(Some)
                .map_err(|_| Error::Backend(format!("value for {key} is not UTF-8"))),
            None => Ok(None),
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let (key, value) = (key.to_string(), value.to_string());
        self.blocking(move |db| Ok(db.put(key.as_bytes(), value.as_bytes())?))
            .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.blocking(move |db| Ok(db.delete(key.as_bytes())?)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn storage_roundtrip() {
        let dir = tempdir().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();

        store.set("inventory-cache", "[]").await.unwrap();
        assert_eq!(
            store.get("inventory-cache").await.unwrap().as_deref(),
            Some("[]")
        );

        store.remove("inventory-cache").await.unwrap();
        assert!(store.get("inventory-cache").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn non_utf8_value_is_an_error() {
        let dir = tempdir().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        store.db.put(b"theme-preference", [0xff, 0xfe, b'd']).unwrap();

        let err = store.get("theme-preference").await.unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
    }

    #[tokio::test]
    async fn reopen_keeps_values() {
        let dir = tempdir().unwrap();
        {
            let store = RocksStore::open(dir.path()).unwrap();
            store.set("hotspots-cache", "[]").await.unwrap();
        }
        let store = RocksStore::open(dir.path()).unwrap();
        assert_eq!(
            store.get("hotspots-cache").await.unwrap().as_deref(),
            Some("[]")
        );
    }
}
