//! Configuration types for the web application.
//!
//! Responsibilities:
//! - Define the validated [`Config`] handed to dependents.
//! - Define [`EnvironmentMode`] and its lenient fallback to production.
//! - Define [`ConfigUrl`], a validated URL that keeps its input verbatim.
//! - Provide a redacted, serializable [`ConfigSummary`] for diagnostics.
//!
//! Does NOT handle:
//! - Reading or validating environment variables (see `loader`).
//!
//! Invariants:
//! - `auth_secret` is a `secrecy::SecretString` and never appears in `Debug` output.
//! - The password component of `database_url` is masked in `Debug` and summaries.
//! - URL fields return exactly the string that was supplied; parsing only validates.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::constants::{REDACTED, REDACTED_PASSWORD};

/// Runtime mode of the application, read from `NODE_ENV`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
    Development,
    Test,
    #[default]
    Production,
}

impl EnvironmentMode {
    /// All recognized modes.
    pub const ALL: [EnvironmentMode; 3] = [
        EnvironmentMode::Development,
        EnvironmentMode::Test,
        EnvironmentMode::Production,
    ];

    /// The exact `NODE_ENV` spelling for this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            EnvironmentMode::Development => "development",
            EnvironmentMode::Test => "test",
            EnvironmentMode::Production => "production",
        }
    }

    pub const fn is_development(self) -> bool {
        matches!(self, EnvironmentMode::Development)
    }

    pub const fn is_test(self) -> bool {
        matches!(self, EnvironmentMode::Test)
    }

    pub const fn is_production(self) -> bool {
        matches!(self, EnvironmentMode::Production)
    }
}

impl fmt::Display for EnvironmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the recognized mode names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized environment mode '{0}' (expected development, test or production)")]
pub struct UnknownEnvironmentMode(pub String);

impl FromStr for EnvironmentMode {
    type Err = UnknownEnvironmentMode;

    /// Matching is exact: `Production` or `PROD` are not recognized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownEnvironmentMode(s.to_string()))
    }
}

/// A URL that passed validation, kept exactly as supplied.
///
/// Parsing normalizes (trailing `/`, lowercase host, default port removal);
/// dependents that splice paths onto the value need the original text, so
/// [`ConfigUrl::as_str`] returns the input and [`ConfigUrl::as_url`] the parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigUrl {
    raw: String,
    parsed: Url,
}

impl ConfigUrl {
    /// Validate `raw` as an absolute URL.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            parsed,
        })
    }

    /// The value exactly as it was supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed, normalized URL.
    pub fn as_url(&self) -> &Url {
        &self.parsed
    }
}

impl fmt::Display for ConfigUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for ConfigUrl {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

/// Validated application configuration.
///
/// Built once by [`crate::ConfigLoader::build`] and shared read-only
/// afterwards, usually as an `Arc<Config>` from [`crate::EnvironmentLoader`].
#[derive(Clone)]
pub struct Config {
    /// Runtime mode; `Production` when `NODE_ENV` is unset or unrecognized.
    pub environment_mode: EnvironmentMode,
    /// Connection string for the persistence layer.
    pub database_url: ConfigUrl,
    /// Session signing secret for the authentication subsystem.
    pub auth_secret: SecretString,
    /// Public URL of the authentication subsystem, if configured.
    pub auth_public_url: Option<ConfigUrl>,
    /// Upstream backend for the rewrite layer, if configured.
    pub backend_url: Option<ConfigUrl>,
}

impl Config {
    /// Load and validate configuration from the process environment.
    ///
    /// This does not cache; use [`crate::EnvironmentLoader`] to validate once
    /// and share the result.
    pub fn from_env() -> Result<Self, crate::ConfigError> {
        crate::ConfigLoader::new().from_env().build()
    }

    /// Redacted view of this configuration, safe to print or serialize.
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            environment_mode: self.environment_mode,
            database_url: redact_url(&self.database_url),
            auth_secret: REDACTED.to_string(),
            auth_public_url: self.auth_public_url.as_ref().map(redact_url),
            backend_url: self.backend_url.as_ref().map(redact_url),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment_mode", &self.environment_mode)
            .field("database_url", &redact_url(&self.database_url))
            .field("auth_secret", &self.auth_secret)
            .field(
                "auth_public_url",
                &self.auth_public_url.as_ref().map(redact_url),
            )
            .field("backend_url", &self.backend_url.as_ref().map(redact_url))
            .finish()
    }
}

/// Printable view of a [`Config`] with secrets masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub environment_mode: EnvironmentMode,
    pub database_url: String,
    pub auth_secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_public_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,
}

/// Render a URL with its password component replaced.
///
/// Passwordless URLs are rendered verbatim; masked ones use the parsed form.
fn redact_url(url: &ConfigUrl) -> String {
    if url.as_url().password().is_none() {
        return url.as_str().to_string();
    }
    let mut masked = url.as_url().clone();
    // Only fails for cannot-be-a-base URLs, which cannot carry a password.
    let _ = masked.set_password(Some(REDACTED_PASSWORD));
    masked.to_string()
}
