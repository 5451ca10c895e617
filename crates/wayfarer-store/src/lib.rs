//! Wayfarer key-value store.
//!
//! The sync core persists everything through the [`KvStore`] trait: async
//! get/set/remove of string values under string keys, durable across process
//! restarts. The core never depends on a concrete backend.
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map, shared via `Arc` to simulate restarts
//! - [`FileStore`] - one file per key in a data directory
//! - `RocksStore` - RocksDB-backed (feature `rocksdb`)
//! - [`FlakyStore`] - wraps another store and fails on demand
//!
//! # Example
//!
//! ```no_run
//! use wayfarer_store::{FileStore, KvStore};
//!
//! # async fn demo() -> wayfarer_store::Result<()> {
//! let store = FileStore::open("./wayfarer-data").await?;
//! store.set("theme-preference", "dark").await?;
//! assert_eq!(store.get("theme-preference").await?.as_deref(), Some("dark"));
//! # Ok(())
//! # }
//! ```

pub mod error;
mod file;
mod flaky;
mod memory;
#[cfg(feature = "rocksdb")]
mod rocks;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use error::{Error, Result};
pub use file::FileStore;
pub use flaky::FlakyStore;
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb")]
pub use rocks::RocksStore;

/// Key under which the last successfully fetched catalog is cached.
pub const HOTSPOTS_CACHE_KEY: &str = "hotspots-cache";

/// Key holding the user's collected items.
pub const INVENTORY_KEY: &str = "inventory-cache";

/// Key holding the persisted display preference.
pub const THEME_PREFERENCE_KEY: &str = "theme-preference";

/// Durable string key-value storage.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Read and decode a JSON value.
pub async fn get_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// Encode and store a JSON value.
pub async fn put_json<T: Serialize + ?Sized>(store: &dyn KvStore, key: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string(value)?;
    store.set(key, &text).await
}
