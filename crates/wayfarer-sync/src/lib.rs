//! Wayfarer Sync - offline-first state core for the companion app
//!
//! Keeps remote hotspot data, the user's collected inventory, the display
//! preference and live position samples consistent across restarts and
//! network failures. Presentation reads from and issues requests to the
//! stores exposed here; it never touches storage or the network itself.
//!
//! # Architecture
//!
//! - **Catalog**: remote fetch with last-known-good cache fallback
//! - **Inventory**: deduplicated collected items, persisted on every change
//! - **Preference**: light/dark, falling back to the host appearance
//! - **Tracker**: permission-gated location session with a path trail
//! - **Companion**: wires the above for one app lifetime
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use wayfarer_sync::{ChannelFeed, Companion, SyncConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SyncConfig::from_env()?;
//!     let app = Companion::open(config, Arc::new(ChannelFeed::granted())).await?;
//!     let home = app.home().await?;
//!     println!("{} hotspots ({})", home.catalog.hotspots().len(), home.catalog.freshness());
//!     app.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod companion;
pub mod config;
pub mod error;
pub mod inventory;
pub mod map;
pub mod preference;
pub mod tracker;

pub use catalog::{CatalogCache, CatalogLoad, CatalogSource, Freshness, HttpCatalogClient};
pub use companion::{Companion, HomeView};
pub use config::{StoreBackend, SyncConfig, DEFAULT_CATALOG_URL};
pub use error::{Error, Result};
pub use inventory::{AddOutcome, InventoryStore};
pub use map::MapScene;
pub use preference::{Appearance, EnvAppearance, FixedAppearance, PreferenceStore};
pub use tracker::{
    ChannelFeed, FeedSubscription, LocationFeed, PermissionStatus, PositionTracker,
    SubscriptionId, TrackerSnapshot, TrackerState, WatchOptions, PERMISSION_DENIED_MESSAGE,
};
