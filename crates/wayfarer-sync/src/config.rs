//! Configuration for the sync core.

use crate::error::{Error, Result};
use crate::tracker::WatchOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use wayfarer_models::DisplayPreference;

/// Remote catalog used when no override is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://yimingeling.github.io/prog7api/hotspots.json";

/// Backend for the persistent key-value store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// One JSON file per key under the data directory
    #[default]
    File,
    /// RocksDB database in the data directory (feature `rocksdb`)
    Rocks,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "rocksdb" | "rocks" => Ok(Self::Rocks),
            other => Err(format!("unknown store backend {other:?}, expected file or rocksdb")),
        }
    }
}

/// Configuration for a Wayfarer companion.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Remote hotspot catalog endpoint
    pub catalog_url: String,

    /// Data directory for the store
    pub data_dir: PathBuf,

    /// Which store lives in `data_dir`
    pub backend: StoreBackend,

    /// Upper bound for the single catalog request
    pub fetch_timeout: Duration,

    /// Throttling requested from the location feed
    pub watch: WatchOptions,

    /// Host appearance override (otherwise detected by the host)
    pub appearance: Option<DisplayPreference>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            data_dir: PathBuf::from("./wayfarer-data"),
            backend: StoreBackend::File,
            fetch_timeout: Duration::from_secs(10),
            watch: WatchOptions::default(),
            appearance: None,
        }
    }
}

impl SyncConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("WAYFARER_CATALOG_URL") {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::Config(format!(
                    "WAYFARER_CATALOG_URL must be an http(s) URL, got {url:?}"
                )));
            }
            config.catalog_url = url;
        }

        if let Some(dir) = lookup("WAYFARER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(backend) = parse_var::<StoreBackend, _>(&lookup, "WAYFARER_STORE")? {
            config.backend = backend;
        }

        if let Some(ms) = parse_var::<u64, _>(&lookup, "WAYFARER_FETCH_TIMEOUT_MS")? {
            config.fetch_timeout = Duration::from_millis(ms);
        }

        if let Some(ms) = parse_var::<u64, _>(&lookup, "WAYFARER_WATCH_INTERVAL_MS")? {
            config.watch.min_interval = Duration::from_millis(ms);
        }

        if let Some(meters) = parse_var::<f64, _>(&lookup, "WAYFARER_WATCH_DISTANCE_M")? {
            if !(meters.is_finite() && meters >= 0.0) {
                return Err(Error::Config(format!(
                    "WAYFARER_WATCH_DISTANCE_M must be a non-negative number, got {meters}"
                )));
            }
            config.watch.min_distance_m = meters;
        }

        config.appearance = parse_var::<DisplayPreference, _>(&lookup, "WAYFARER_APPEARANCE")?;

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("{name}: {e}"))),
        None => Ok(None),
    }
}
