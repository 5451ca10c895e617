//! Persisted light/dark display preference.

use crate::error::Result;
use std::sync::Arc;
use wayfarer_models::DisplayPreference;
use wayfarer_store::{KvStore, THEME_PREFERENCE_KEY};

/// The host environment's current appearance mode.
pub trait Appearance: Send + Sync {
    fn current(&self) -> DisplayPreference;
}

/// Host appearance that never changes. Used when the mode is configured.
#[derive(Debug, Clone, Copy)]
pub struct FixedAppearance(pub DisplayPreference);

impl Appearance for FixedAppearance {
    fn current(&self) -> DisplayPreference {
        self.0
    }
}

/// Desktop/terminal appearance of the machine running the process.
///
/// Looks at `GTK_THEME` (a `:dark` variant or a theme name containing
/// `dark`) and then at the terminal's `COLORFGBG` background colour. Anything
/// undetectable is reported as light.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvAppearance;

impl Appearance for EnvAppearance {
    fn current(&self) -> DisplayPreference {
        detect_appearance(
            std::env::var("GTK_THEME").ok().as_deref(),
            std::env::var("COLORFGBG").ok().as_deref(),
        )
    }
}

fn detect_appearance(gtk_theme: Option<&str>, colorfgbg: Option<&str>) -> DisplayPreference {
    if let Some(theme) = gtk_theme {
        if theme.to_ascii_lowercase().contains("dark") {
            return DisplayPreference::Dark;
        }
    }
    // "fg;bg" or "fg;default;bg"; ANSI backgrounds 0-6 and 8 are dark.
    let background = colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(bg) if bg <= 6 || bg == 8 => DisplayPreference::Dark,
        _ => DisplayPreference::Light,
    }
}

/// Display preference backed by the key-value store.
pub struct PreferenceStore {
    store: Arc<dyn KvStore>,
    appearance: Arc<dyn Appearance>,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn KvStore>, appearance: Arc<dyn Appearance>) -> Self {
        Self { store, appearance }
    }

    /// Persisted preference, or the host's current appearance when none is
    /// stored. The derived value is not written back.
    pub async fn get(&self) -> Result<DisplayPreference> {
        if let Some(raw) = self.store.get(THEME_PREFERENCE_KEY).await? {
            match raw.parse::<DisplayPreference>() {
                Ok(pref) => return Ok(pref),
                Err(e) => tracing::warn!(error = %e, "Ignoring stored display preference"),
            }
        }
        Ok(self.appearance.current())
    }

    /// Persist `pref`; visible to the next [`get`](Self::get).
    pub async fn set(&self, pref: DisplayPreference) -> Result<()> {
        self.store.set(THEME_PREFERENCE_KEY, pref.as_str()).await?;
        tracing::info!(preference = %pref, "Saved display preference");
        Ok(())
    }

    /// Switch to the opposite of the current preference and return it.
    pub async fn toggle(&self) -> Result<DisplayPreference> {
        let next = self.get().await?.opposite();
        self.set(next).await?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use wayfarer_store::{FlakyStore, MemoryStore};

    fn prefs(store: Arc<dyn KvStore>, host: DisplayPreference) -> PreferenceStore {
        PreferenceStore::new(store, Arc::new(FixedAppearance(host)))
    }

    #[test]
    fn detects_host_appearance() {
        assert_eq!(detect_appearance(Some("Adwaita:dark"), None), DisplayPreference::Dark);
        assert_eq!(detect_appearance(Some("Adwaita"), None), DisplayPreference::Light);
        assert_eq!(detect_appearance(None, Some("15;0")), DisplayPreference::Dark);
        assert_eq!(detect_appearance(None, Some("0;default;15")), DisplayPreference::Light);
        assert_eq!(detect_appearance(None, None), DisplayPreference::Light);
    }

    #[tokio::test]
    async fn unset_follows_host_without_writing() {
        let store = Arc::new(MemoryStore::new());
        let dark_host = prefs(store.clone(), DisplayPreference::Dark);

        assert_eq!(dark_host.get().await.unwrap(), DisplayPreference::Dark);
        assert!(store.is_empty().await);

        let light_host = prefs(store.clone(), DisplayPreference::Light);
        assert_eq!(light_host.get().await.unwrap(), DisplayPreference::Light);
    }

    #[tokio::test]
    async fn set_survives_restart() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        prefs(store.clone(), DisplayPreference::Light)
            .set(DisplayPreference::Dark)
            .await
            .unwrap();

        let restarted = prefs(store, DisplayPreference::Light);
        assert_eq!(restarted.get().await.unwrap(), DisplayPreference::Dark);
    }

    #[tokio::test]
    async fn stored_as_bare_word() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        prefs(store.clone(), DisplayPreference::Light)
            .set(DisplayPreference::Dark)
            .await
            .unwrap();
        assert_eq!(
            store.get(THEME_PREFERENCE_KEY).await.unwrap().as_deref(),
            Some("dark")
        );
    }

    #[tokio::test]
    async fn toggle_flips_and_persists() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let preferences = prefs(store, DisplayPreference::Light);

        assert_eq!(preferences.toggle().await.unwrap(), DisplayPreference::Dark);
        assert_eq!(preferences.get().await.unwrap(), DisplayPreference::Dark);
        assert_eq!(preferences.toggle().await.unwrap(), DisplayPreference::Light);
        assert_eq!(preferences.get().await.unwrap(), DisplayPreference::Light);
    }

    #[tokio::test]
    async fn garbage_value_falls_back_to_host() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        store.set(THEME_PREFERENCE_KEY, "sepia").await.unwrap();

        let preferences = prefs(store, DisplayPreference::Dark);
        assert_eq!(preferences.get().await.unwrap(), DisplayPreference::Dark);
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let flaky = Arc::new(FlakyStore::new(Arc::new(MemoryStore::new())));
        flaky.fail_writes(true);
        let preferences = prefs(flaky.clone(), DisplayPreference::Light);

        let err = preferences.set(DisplayPreference::Dark).await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));

        flaky.fail_writes(false);
        assert_eq!(preferences.get().await.unwrap(), DisplayPreference::Light);
    }
}
