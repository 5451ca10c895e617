//! Hotspot catalog: remote source plus last-known-good local cache.
//!
//! [`CatalogCache::load`] tries the remote once. A successful fetch replaces
//! the cached copy wholesale; any failure falls back to the cache, and then to
//! an empty catalog. Callers branch on the closed [`CatalogLoad`] set and never
//! see the underlying network error.

mod client;

pub use client::HttpCatalogClient;

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use wayfarer_models::Hotspot;
use wayfarer_store::{get_json, put_json, KvStore, HOTSPOTS_CACHE_KEY};

/// Anything that can produce the authoritative hotspot list.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Hotspot>>;
}

/// Where the displayed catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Cached,
    Empty,
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fresh => "fresh",
            Self::Cached => "cached",
            Self::Empty => "empty",
        })
    }
}

/// Outcome of a catalog load.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogLoad {
    /// Fetched from the remote just now.
    ///
    /// `cache_error` is `None` when the cache now holds the same list, and
    /// carries the storage failure when the list could not be cached.
    Fresh {
        hotspots: Vec<Hotspot>,
        cache_error: Option<String>,
    },
    /// Remote unavailable; last successfully fetched list.
    Cached(Vec<Hotspot>),
    /// Remote unavailable and nothing cached. Show "no data available".
    Empty,
}

impl CatalogLoad {
    pub fn freshness(&self) -> Freshness {
        match self {
            Self::Fresh { .. } => Freshness::Fresh,
            Self::Cached(_) => Freshness::Cached,
            Self::Empty => Freshness::Empty,
        }
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        match self {
            Self::Fresh { hotspots, .. } | Self::Cached(hotspots) => hotspots,
            Self::Empty => &[],
        }
    }

    pub fn into_hotspots(self) -> Vec<Hotspot> {
        match self {
            Self::Fresh { hotspots, .. } | Self::Cached(hotspots) => hotspots,
            Self::Empty => Vec::new(),
        }
    }

    /// Storage failure that kept a fresh list out of the cache.
    pub fn cache_error(&self) -> Option<&str> {
        match self {
            Self::Fresh { cache_error, .. } => cache_error.as_deref(),
            _ => None,
        }
    }

    /// True when there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.hotspots().is_empty()
    }
}

/// Catalog cache manager.
pub struct CatalogCache {
    source: Arc<dyn CatalogSource>,
    store: Arc<dyn KvStore>,
}

impl CatalogCache {
    pub fn new(source: Arc<dyn CatalogSource>, store: Arc<dyn KvStore>) -> Self {
        Self { source, store }
    }

    /// Fetch the catalog, falling back to the cached copy, then to empty.
    pub async fn load(&self) -> CatalogLoad {
        match self.source.fetch().await {
            Ok(hotspots) => {
                let cache_error =
                    match put_json(self.store.as_ref(), HOTSPOTS_CACHE_KEY, &hotspots).await {
                        Ok(()) => None,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to cache fetched catalog");
                            Some(e.to_string())
                        }
                    };
                tracing::info!(count = hotspots.len(), "Loaded fresh catalog");
                CatalogLoad::Fresh {
                    hotspots,
                    cache_error,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Catalog fetch failed, trying local cache");
                self.load_cached().await
            }
        }
    }

    /// Read the cached catalog without touching the remote.
    pub async fn load_cached(&self) -> CatalogLoad {
        match get_json::<Vec<Hotspot>>(self.store.as_ref(), HOTSPOTS_CACHE_KEY).await {
            Ok(Some(hotspots)) => {
                tracing::info!(count = hotspots.len(), "Using cached catalog");
                CatalogLoad::Cached(hotspots)
            }
            Ok(None) => {
                tracing::error!("No cache found and fetch failed");
                CatalogLoad::Empty
            }
            Err(e) => {
                tracing::error!(error = %e, "Cached catalog unreadable");
                CatalogLoad::Empty
            }
        }
    }
}
