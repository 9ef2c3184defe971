//! Environment variable sources for configuration.
//!
//! Responsibilities:
//! - Abstract "read variable K" behind [`EnvSource`] so the loader can be fed
//!   the process environment or an in-memory map.
//! - Apply environment values to a [`ConfigLoader`] instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Validating values (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Builder values already set are not overwritten by the environment.
//! - `NODE_ENV` is trimmed, and treated as unset when empty or whitespace-only.
//! - The URLs and the secret are passed through untouched; set-but-empty is
//!   distinct from unset.

use secrecy::SecretString;
use std::collections::HashMap;

use super::builder::ConfigLoader;
use crate::constants::{
    BACKEND_URL_ENV, DATABASE_URL_ENV, NEXTAUTH_SECRET_ENV, NEXTAUTH_URL_ENV, NODE_ENV_ENV,
};

/// Read access to a set of environment variables.
///
/// Does **not** require `Send + Sync`; [`super::EnvironmentLoader`] is only
/// shareable across threads when its source is.
pub trait EnvSource {
    /// Raw value of `key`, or `None` if unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Zero-sized type, delegates to `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment, for tests and for hosts that assemble variables themselves.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    source_var_or_none(&SystemEnv, key)
}

/// [`env_var_or_none`] against an arbitrary source.
pub(crate) fn source_var_or_none<S: EnvSource + ?Sized>(source: &S, key: &str) -> Option<String> {
    source.var(key).and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment variable configuration to the loader.
///
/// Each variable is read exactly once. Values set through builder methods win.
pub fn apply_env<S: EnvSource + ?Sized>(loader: &mut ConfigLoader, source: &S) {
    if let Some(mode) = source_var_or_none(source, NODE_ENV_ENV)
        && loader.environment_mode().is_none()
    {
        loader.set_environment_mode(Some(mode));
    }
    if let Some(url) = source.var(DATABASE_URL_ENV)
        && loader.database_url().is_none()
    {
        loader.set_database_url(Some(url));
    }
    if let Some(secret) = source.var(NEXTAUTH_SECRET_ENV)
        && !loader.has_auth_secret()
    {
        loader.set_auth_secret(Some(SecretString::new(secret.into())));
    }
    if let Some(url) = source.var(NEXTAUTH_URL_ENV)
        && loader.auth_public_url().is_none()
    {
        loader.set_auth_public_url(Some(url));
    }
    if let Some(url) = source.var(BACKEND_URL_ENV)
        && loader.backend_url().is_none()
    {
        loader.set_backend_url(Some(url));
    }
}
