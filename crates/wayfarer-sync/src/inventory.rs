//! The user's collected hotspots.
//!
//! Every mutation reads the persisted set, applies the change and writes the
//! full set once. The in-memory copy is only updated after the write
//! succeeded, so what [`InventoryStore::items`] reports is always what a
//! fresh [`InventoryStore::load`] would read back.

use crate::error::{Error, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use wayfarer_models::Hotspot;
use wayfarer_store::{get_json, put_json, KvStore, INVENTORY_KEY};

/// Result of adding an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// An item with the same id is already collected; nothing was written.
    AlreadyPresent,
}

impl AddOutcome {
    /// User-facing notice for `item`, if any.
    pub fn notice(&self, item: &Hotspot) -> Option<String> {
        match self {
            Self::Added => None,
            Self::AlreadyPresent => Some(format!("{} is already in your inventory.", item.name)),
        }
    }
}

/// Inventory backed by the key-value store.
pub struct InventoryStore {
    store: Arc<dyn KvStore>,
    // Held across each read-modify-write so interleaved mutations are not lost.
    items: Mutex<Vec<Hotspot>>,
}

impl InventoryStore {
    /// Create a store with an empty in-memory set. Call [`load`](Self::load)
    /// to pick up the persisted one.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            items: Mutex::new(Vec::new()),
        }
    }

    /// Read the persisted set, replacing the in-memory copy.
    pub async fn load(&self) -> Result<Vec<Hotspot>> {
        let mut items = self.items.lock().await;
        let loaded = self.read_persisted().await?;
        *items = loaded.clone();
        Ok(loaded)
    }

    /// Current in-memory set, in insertion order.
    pub async fn items(&self) -> Vec<Hotspot> {
        self.items.lock().await.clone()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.items.lock().await.iter().any(|item| item.id == id)
    }

    /// Append `item` unless an item with the same id is already collected.
    pub async fn add(&self, item: Hotspot) -> Result<AddOutcome> {
        let mut items = self.items.lock().await;
        let mut updated = self.read_persisted().await?;
        if updated.iter().any(|existing| existing.id == item.id) {
            tracing::info!(id = %item.id, "Item already in inventory");
            *items = updated;
            return Ok(AddOutcome::AlreadyPresent);
        }

        updated.push(item);
        self.persist(&updated).await?;

        tracing::info!(count = updated.len(), "Added item to inventory");
        *items = updated;
        Ok(AddOutcome::Added)
    }

    /// Add the catalog hotspot with `id`.
    pub async fn collect(&self, id: &str, catalog: &[Hotspot]) -> Result<AddOutcome> {
        let hotspot =
            Hotspot::find(catalog, id).ok_or_else(|| Error::UnknownHotspot(id.to_string()))?;
        self.add(hotspot.clone()).await
    }

    /// Remove every item with `item`'s id and return the remaining set.
    pub async fn remove(&self, item: &Hotspot) -> Result<Vec<Hotspot>> {
        self.remove_id(&item.id).await
    }

    /// Remove by id and return the remaining set.
    pub async fn remove_id(&self, id: &str) -> Result<Vec<Hotspot>> {
        let mut items = self.items.lock().await;
        let mut updated = self.read_persisted().await?;
        updated.retain(|i| i.id != id);
        self.persist(&updated).await?;

        tracing::info!(id = %id, count = updated.len(), "Removed item from inventory");
        *items = updated.clone();
        Ok(updated)
    }

    /// Forget every collected item.
    pub async fn clear(&self) -> Result<()> {
        let mut items = self.items.lock().await;
        self.store.remove(INVENTORY_KEY).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to clear inventory");
            Error::from(e)
        })?;
        items.clear();
        Ok(())
    }

    async fn read_persisted(&self) -> Result<Vec<Hotspot>> {
        let persisted: Option<Vec<Hotspot>> = get_json(self.store.as_ref(), INVENTORY_KEY)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to read inventory");
                Error::from(e)
            })?;
        Ok(persisted.unwrap_or_default())
    }

    async fn persist(&self, items: &[Hotspot]) -> Result<()> {
        put_json(self.store.as_ref(), INVENTORY_KEY, items)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to persist inventory");
                Error::from(e)
            })
    }
}
