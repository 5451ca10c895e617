//! Tracing setup shared by Wayfarer binaries.
//!
//! Filter directives come from `RUST_LOG`; without it the caller's default
//! applies (e.g. `"wayfarer=info"`). Output goes to stderr so it never mixes
//! with command output on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directives: info for Wayfarer crates, warnings for everything else.
pub const DEFAULT_DIRECTIVES: &str = "warn,wayfarer=info,wayfarer_sync=info,wayfarer_store=info";

/// Build the filter from `RUST_LOG`, falling back to `default_directives`.
pub fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn try_init(default_directives: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(default_directives))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}

/// Install the global subscriber, ignoring a second call.
pub fn init(default_directives: &str) {
    if try_init(default_directives).is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init(DEFAULT_DIRECTIVES);
        init(DEFAULT_DIRECTIVES);
        assert!(try_init(DEFAULT_DIRECTIVES).is_err());
    }

    #[test]
    fn default_directives_parse() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVES).is_ok());
    }
}
