//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` collecting raw values from the
//!   environment and from direct builder methods.
//! - Validate the collected values and build the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable reading (delegated to env.rs).
//! - Caching the built configuration (see cache.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - `build()` reports every invalid field, not just the first.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::{ExposeSecret, SecretString};

use super::env::{EnvSource, SystemEnv, apply_env};
use super::error::{ConfigError, FieldError, FieldErrors};
use crate::constants::{
    BACKEND_URL_ENV, DATABASE_URL_ENV, DOTENV_DISABLED_ENV, NEXTAUTH_SECRET_ENV,
    NEXTAUTH_URL_ENV, NODE_ENV_ENV,
};
use crate::types::{Config, ConfigUrl, EnvironmentMode};

/// Configuration loader that builds config from environment variables and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    environment_mode: Option<String>,
    database_url: Option<String>,
    auth_secret: Option<SecretString>,
    auth_public_url: Option<String>,
    backend_url: Option<String>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(DOTENV_DISABLED_ENV).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing). Variables
    /// already present in the process environment are not overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            tracing::debug!("Skipping .env loading ({DOTENV_DISABLED_ENV} is set)");
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from the process environment.
    pub fn from_env(self) -> Self {
        self.from_source(&SystemEnv)
    }

    /// Read configuration from an arbitrary environment source.
    ///
    /// Values already set through builder methods are kept.
    pub fn from_source<S: EnvSource + ?Sized>(mut self, source: &S) -> Self {
        apply_env(&mut self, source);
        self
    }

    /// Set the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = Some(mode.as_str().to_string());
        self
    }

    /// Set the database connection string.
    pub fn with_database_url(mut self, url: String) -> Self {
        self.database_url = Some(url);
        self
    }

    /// Set the authentication secret.
    pub fn with_auth_secret(mut self, secret: String) -> Self {
        self.auth_secret = Some(SecretString::new(secret.into()));
        self
    }

    /// Set the public URL of the authentication subsystem.
    pub fn with_auth_public_url(mut self, url: String) -> Self {
        self.auth_public_url = Some(url);
        self
    }

    /// Set the backend URL.
    pub fn with_backend_url(mut self, url: String) -> Self {
        self.backend_url = Some(url);
        self
    }

    /// Validate the collected values and build the final configuration.
    ///
    /// On failure, every invalid variable is logged at `error` level and
    /// returned in [`ConfigError::InvalidEnvironment`].
    ///
    /// Only `NODE_ENV` is trimmed. The URLs and the secret are validated and
    /// stored exactly as supplied, so a blank URL is invalid rather than unset.
    pub fn build(self) -> Result<Config, ConfigError> {
        let environment_mode = resolve_environment_mode(self.environment_mode.as_deref());
        let database_url = required_url(DATABASE_URL_ENV, self.database_url.as_deref());
        let auth_secret = required_secret(NEXTAUTH_SECRET_ENV, self.auth_secret);
        let auth_public_url = optional_url(NEXTAUTH_URL_ENV, self.auth_public_url.as_deref());
        let backend_url = optional_url(BACKEND_URL_ENV, self.backend_url.as_deref());

        match (database_url, auth_secret, auth_public_url, backend_url) {
            (Ok(database_url), Ok(auth_secret), Ok(auth_public_url), Ok(backend_url)) => {
                tracing::debug!(
                    environment_mode = %environment_mode,
                    auth_public_url = auth_public_url.is_some(),
                    backend_url = backend_url.is_some(),
                    "Environment configuration validated"
                );
                Ok(Config {
                    environment_mode,
                    database_url,
                    auth_secret,
                    auth_public_url,
                    backend_url,
                })
            }
            (database_url, auth_secret, auth_public_url, backend_url) => {
                let errors: FieldErrors = [
                    database_url.err(),
                    auth_secret.err(),
                    auth_public_url.err(),
                    backend_url.err(),
                ]
                .into_iter()
                .flatten()
                .collect();
                tracing::error!(
                    vars = %errors.vars().join(","),
                    fields = ?errors.to_map(),
                    "Invalid environment variables"
                );
                Err(ConfigError::InvalidEnvironment(errors))
            }
        }
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn environment_mode(&self) -> Option<&String> {
        self.environment_mode.as_ref()
    }

    pub(crate) fn database_url(&self) -> Option<&String> {
        self.database_url.as_ref()
    }

    pub(crate) fn has_auth_secret(&self) -> bool {
        self.auth_secret.is_some()
    }

    pub(crate) fn auth_public_url(&self) -> Option<&String> {
        self.auth_public_url.as_ref()
    }

    pub(crate) fn backend_url(&self) -> Option<&String> {
        self.backend_url.as_ref()
    }

    pub(crate) fn set_environment_mode(&mut self, mode: Option<String>) {
        self.environment_mode = mode;
    }

    pub(crate) fn set_database_url(&mut self, url: Option<String>) {
        self.database_url = url;
    }

    pub(crate) fn set_auth_secret(&mut self, secret: Option<SecretString>) {
        self.auth_secret = secret;
    }

    pub(crate) fn set_auth_public_url(&mut self, url: Option<String>) {
        self.auth_public_url = url;
    }

    pub(crate) fn set_backend_url(&mut self, url: Option<String>) {
        self.backend_url = url;
    }
}

/// Resolve the runtime mode, falling back to production when unset or unrecognized.
fn resolve_environment_mode(raw: Option<&str>) -> EnvironmentMode {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        tracing::debug!("{NODE_ENV_ENV} is not set, defaulting to production");
        return EnvironmentMode::default();
    };
    raw.parse().unwrap_or_else(|e| {
        tracing::warn!("{NODE_ENV_ENV}: {e}, defaulting to production");
        EnvironmentMode::default()
    })
}

fn required_url(var: &'static str, raw: Option<&str>) -> Result<ConfigUrl, FieldError> {
    let raw = raw.ok_or_else(|| FieldError::missing(var))?;
    ConfigUrl::parse(raw).map_err(|e| FieldError::invalid_url(var, e))
}

fn optional_url(var: &'static str, raw: Option<&str>) -> Result<Option<ConfigUrl>, FieldError> {
    raw.map(|raw| ConfigUrl::parse(raw).map_err(|e| FieldError::invalid_url(var, e)))
        .transpose()
}

fn required_secret(
    var: &'static str,
    secret: Option<SecretString>,
) -> Result<SecretString, FieldError> {
    match secret {
        None => Err(FieldError::missing(var)),
        Some(secret) if secret.expose_secret().is_empty() => Err(FieldError::empty(var)),
        Some(secret) => Ok(secret),
    }
}
