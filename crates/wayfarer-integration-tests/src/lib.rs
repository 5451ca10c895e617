//! Shared fixtures for the scenario tests in `tests/`.

use std::sync::Arc;
use std::time::Duration;
use wayfarer_models::{Coordinates, DisplayPreference, Hotspot};
use wayfarer_store::KvStore;
use wayfarer_sync::{
    ChannelFeed, Companion, FixedAppearance, HttpCatalogClient, Result, SyncConfig,
    WatchOptions,
};

pub fn fountain() -> Hotspot {
    Hotspot::new(
        "1",
        "Fountain",
        "Splashes on the hour",
        Coordinates::new(51.9225, 4.4792),
    )
}

pub fn windmill() -> Hotspot {
    Hotspot::new(
        "2",
        "Windmill",
        "De Distilleerketel",
        Coordinates::new(51.9066, 4.4456),
    )
}

/// JSON body the remote endpoint serves for `hotspots`.
pub fn catalog_body(hotspots: &[Hotspot]) -> String {
    serde_json::to_string(hotspots).unwrap_or_else(|_| "[]".to_string())
}

/// Companion talking HTTP to `catalog_url` and persisting into `store`.
///
/// Building a second companion on the same store is how the scenarios
/// simulate a process restart.
pub async fn companion(
    catalog_url: &str,
    store: Arc<dyn KvStore>,
    host: DisplayPreference,
    feed: Arc<ChannelFeed>,
) -> Result<Companion> {
    let config = SyncConfig {
        catalog_url: catalog_url.to_string(),
        fetch_timeout: Duration::from_secs(2),
        watch: WatchOptions::unthrottled(),
        ..SyncConfig::default()
    };
    let source = Arc::new(HttpCatalogClient::new(
        config.catalog_url.clone(),
        config.fetch_timeout,
    )?);
    Companion::from_parts(config, store, source, Arc::new(FixedAppearance(host)), feed).await
}
