//! Companion - owns the stores handed to the presentation layer.
//!
//! Created once on app start and shut down on exit. Screens receive the
//! stores from here instead of reaching for shared global state.

use crate::catalog::{CatalogCache, CatalogLoad, CatalogSource, HttpCatalogClient};
use crate::config::{StoreBackend, SyncConfig};
use crate::error::{Error, Result};
use crate::inventory::InventoryStore;
use crate::map::MapScene;
use crate::preference::{Appearance, EnvAppearance, FixedAppearance, PreferenceStore};
use crate::tracker::{LocationFeed, PositionTracker};
use std::sync::Arc;
use wayfarer_models::Hotspot;
use wayfarer_store::{FileStore, KvStore};

/// What the home screen shows on entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub catalog: CatalogLoad,
    pub inventory: Vec<Hotspot>,
}

/// The sync core, wired.
pub struct Companion {
    config: SyncConfig,
    catalog: CatalogCache,
    inventory: InventoryStore,
    preferences: PreferenceStore,
    tracker: PositionTracker,
}

impl Companion {
    /// Wire the production collaborators: the configured store in
    /// `data_dir`, HTTP catalog client, host appearance (unless overridden)
    /// and `feed`.
    pub async fn open(config: SyncConfig, feed: Arc<dyn LocationFeed>) -> Result<Self> {
        let store = open_store(&config).await?;
        let source: Arc<dyn CatalogSource> = Arc::new(HttpCatalogClient::new(
            config.catalog_url.clone(),
            config.fetch_timeout,
        )?);
        let appearance: Arc<dyn Appearance> = match config.appearance {
            Some(pref) => Arc::new(FixedAppearance(pref)),
            None => Arc::new(EnvAppearance),
        };

        Self::from_parts(config, store, source, appearance, feed).await
    }

    /// Wire arbitrary collaborators. Loads the persisted inventory if it is
    /// readable.
    pub async fn from_parts(
        config: SyncConfig,
        store: Arc<dyn KvStore>,
        source: Arc<dyn CatalogSource>,
        appearance: Arc<dyn Appearance>,
        feed: Arc<dyn LocationFeed>,
    ) -> Result<Self> {
        let catalog = CatalogCache::new(source, Arc::clone(&store));
        let inventory = InventoryStore::new(Arc::clone(&store));
        let preferences = PreferenceStore::new(store, appearance);
        let tracker = PositionTracker::new(feed, config.watch.clone());

        // An unreadable inventory must not keep the catalog from starting;
        // the error resurfaces from `home()` and `inventory().load()`.
        match inventory.load().await {
            Ok(items) => tracing::info!(
                catalog_url = %config.catalog_url,
                inventory = items.len(),
                "Companion ready"
            ),
            Err(e) => tracing::error!(
                catalog_url = %config.catalog_url,
                error = %e,
                "Companion ready, inventory unreadable"
            ),
        }

        Ok(Self {
            config,
            catalog,
            inventory,
            preferences,
            tracker,
        })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    pub fn inventory(&self) -> &InventoryStore {
        &self.inventory
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    /// Load catalog and inventory side by side.
    pub async fn home(&self) -> Result<HomeView> {
        let (catalog, inventory) = tokio::join!(self.catalog.load(), self.inventory.load());
        Ok(HomeView {
            catalog,
            inventory: inventory?,
        })
    }

    /// Map contents: the whole catalog, or just the hotspot `focus`.
    ///
    /// A focused hotspot is looked up in the catalog first and then in the
    /// inventory, so collected items can still be shown offline.
    pub async fn map_scene(&self, focus: Option<&str>) -> Result<MapScene> {
        let catalog = self.catalog.load().await;
        let Some(id) = focus else {
            return Ok(MapScene::overview(catalog.hotspots()));
        };

        if let Some(hotspot) = Hotspot::find(catalog.hotspots(), id) {
            return Ok(MapScene::focused(hotspot));
        }
        let collected = self.inventory.items().await;
        Hotspot::find(&collected, id)
            .map(MapScene::focused)
            .ok_or_else(|| Error::UnknownHotspot(id.to_string()))
    }

    /// Tear down: end any tracking session.
    pub async fn shutdown(&self) {
        self.tracker.stop().await;
        tracing::info!("Companion shut down");
    }
}

async fn open_store(config: &SyncConfig) -> Result<Arc<dyn KvStore>> {
    match config.backend {
        StoreBackend::File => Ok(Arc::new(FileStore::open(&config.data_dir).await?)),
        #[cfg(feature = "rocksdb")]
        StoreBackend::Rocks => Ok(Arc::new(wayfarer_store::RocksStore::open(
            &config.data_dir,
        )?)),
        #[cfg(not(feature = "rocksdb"))]
        StoreBackend::Rocks => Err(Error::Config(
            "rocksdb backend requested but not compiled in".to_string(),
        )),
    }
}
