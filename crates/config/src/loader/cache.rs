//! Validate-once access to the application configuration.
//!
//! Responsibilities:
//! - Own the environment source and a single cache slot for the built `Config`.
//! - Hand out the same `Arc<Config>` on every successful call.
//!
//! Does NOT handle:
//! - Invalidation or refresh; the slot goes from empty to filled exactly once.
//!
//! Invariants:
//! - Once filled, the environment is never read again through this loader.
//! - A failed load leaves the slot empty; nothing partial is cached.
//! - Concurrent first callers may each validate; the first stored value wins
//!   and every caller receives it.

use std::sync::{Arc, OnceLock};

use super::builder::ConfigLoader;
use super::env::{EnvSource, SystemEnv};
use super::error::ConfigError;
use crate::types::Config;

/// Reads, validates and caches the application configuration.
///
/// Construct one at process startup and pass it (or the `Arc<Config>` it
/// returns) to the components that need configuration.
#[derive(Debug)]
pub struct EnvironmentLoader<S = SystemEnv> {
    source: S,
    slot: OnceLock<Arc<Config>>,
}

impl EnvironmentLoader<SystemEnv> {
    /// Loader backed by the process environment.
    pub fn new() -> Self {
        Self::with_source(SystemEnv)
    }
}

impl Default for EnvironmentLoader<SystemEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EnvSource> EnvironmentLoader<S> {
    /// Loader backed by an arbitrary environment source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            slot: OnceLock::new(),
        }
    }

    /// Return the validated configuration, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvironment`] listing every invalid
    /// variable. The failure is logged before it is returned, and the next
    /// call validates again.
    pub fn get_configuration(&self) -> Result<Arc<Config>, ConfigError> {
        if let Some(config) = self.slot.get() {
            return Ok(Arc::clone(config));
        }

        tracing::debug!("Loading environment configuration");
        let config = Arc::new(ConfigLoader::new().from_source(&self.source).build()?);
        Ok(Arc::clone(self.slot.get_or_init(|| config)))
    }

    /// The cached configuration, without triggering a load.
    pub fn cached(&self) -> Option<Arc<Config>> {
        self.slot.get().cloned()
    }

    /// Whether a configuration has been loaded and cached.
    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    /// The environment source this loader reads from.
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CONFIG_ENV_VARS, DATABASE_URL_ENV, NEXTAUTH_SECRET_ENV};
    use crate::loader::env::MapEnv;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::thread;

    /// Source that counts reads per variable.
    struct CountingEnv {
        inner: MapEnv,
        reads: Mutex<HashMap<String, usize>>,
    }

    impl CountingEnv {
        fn new(inner: MapEnv) -> Self {
            Self {
                inner,
                reads: Mutex::new(HashMap::new()),
            }
        }

        fn reads_of(&self, key: &str) -> usize {
            self.reads.lock().unwrap().get(key).copied().unwrap_or(0)
        }
    }

    impl EnvSource for CountingEnv {
        fn var(&self, key: &str) -> Option<String> {
            *self.reads.lock().unwrap().entry(key.to_string()).or_default() += 1;
            self.inner.var(key)
        }
    }

    fn valid_env() -> MapEnv {
        MapEnv::new()
            .with_var(DATABASE_URL_ENV, "postgres://u:p@host/db")
            .with_var(NEXTAUTH_SECRET_ENV, "s3cret")
    }

    #[test]
    fn test_repeated_calls_return_same_instance() {
        let loader = EnvironmentLoader::with_source(valid_env());

        let first = loader.get_configuration().unwrap();
        let second = loader.get_configuration().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_environment_read_at_most_once() {
        let loader = EnvironmentLoader::with_source(CountingEnv::new(valid_env()));

        for _ in 0..3 {
            loader.get_configuration().unwrap();
        }

        for var in CONFIG_ENV_VARS {
            assert_eq!(loader.source().reads_of(var), 1, "{var} read more than once");
        }
    }

    #[test]
    fn test_cached_does_not_trigger_load() {
        let loader = EnvironmentLoader::with_source(CountingEnv::new(valid_env()));

        assert!(loader.cached().is_none());
        assert!(!loader.is_loaded());
        assert_eq!(loader.source().reads_of(DATABASE_URL_ENV), 0);

        let config = loader.get_configuration().unwrap();
        assert!(loader.is_loaded());
        assert!(Arc::ptr_eq(&config, &loader.cached().unwrap()));
    }

    #[test]
    fn test_failure_is_not_cached() {
        let loader = EnvironmentLoader::with_source(CountingEnv::new(MapEnv::new()));

        let err = loader.get_configuration().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvironment(_)));
        assert!(loader.cached().is_none());

        // A second attempt validates again.
        assert!(loader.get_configuration().is_err());
        assert_eq!(loader.source().reads_of(DATABASE_URL_ENV), 2);
    }

    #[test]
    fn test_concurrent_first_calls_agree() {
        let loader = Arc::new(EnvironmentLoader::with_source(valid_env()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let loader = Arc::clone(&loader);
                thread::spawn(move || loader.get_configuration().unwrap())
            })
            .collect();
        let configs: Vec<Arc<Config>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let cached = loader.cached().unwrap();
        for config in &configs {
            assert!(Arc::ptr_eq(config, &cached));
        }
    }
}
