//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for all configuration loading failures.
//! - Carry a field-keyed report of every invalid environment variable.
//!
//! Invariants:
//! - Field errors name the variable and the reason, never the offending value.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::collections::BTreeMap;
use std::fmt;
use std::io::ErrorKind;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more variables are missing or malformed.
    #[error("Invalid environment variables: {0}")]
    InvalidEnvironment(FieldErrors),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    /// The field report, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ConfigError::InvalidEnvironment(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Why a single variable failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Required variable is unset.
    Missing,
    /// Required variable is set to the empty string.
    Empty,
    /// Value is present but does not parse as an absolute URL.
    InvalidUrl { reason: String },
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorKind::Missing => f.write_str("Required"),
            FieldErrorKind::Empty => f.write_str("Must not be empty"),
            FieldErrorKind::InvalidUrl { reason } => write!(f, "Invalid url ({reason})"),
        }
    }
}

/// A validation failure for one named variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub var: &'static str,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn missing(var: &'static str) -> Self {
        Self {
            var,
            kind: FieldErrorKind::Missing,
        }
    }

    pub fn empty(var: &'static str) -> Self {
        Self {
            var,
            kind: FieldErrorKind::Empty,
        }
    }

    pub fn invalid_url(var: &'static str, err: url::ParseError) -> Self {
        Self {
            var,
            kind: FieldErrorKind::InvalidUrl {
                reason: err.to_string(),
            },
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.var, self.kind)
    }
}

/// Every field failure from one validation pass, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// The failure recorded for `var`, if any.
    pub fn get(&self, var: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.var == var)
    }

    pub fn contains(&self, var: &str) -> bool {
        self.get(var).is_some()
    }

    /// Names of the failing variables, in declaration order.
    pub fn vars(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.var).collect()
    }

    /// Flattened `variable -> messages` view, suitable for logs and JSON output.
    pub fn to_map(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut map: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for error in &self.0 {
            map.entry(error.var).or_default().push(error.kind.to_string());
        }
        map
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
