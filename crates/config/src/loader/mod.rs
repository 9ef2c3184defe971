//! Configuration loader for environment variables.
//!
//! Responsibilities:
//! - Read the application's variables from an [`EnvSource`] (the process environment by default).
//! - Validate every variable and report all failures together.
//! - Cache the first successful result in an [`EnvironmentLoader`].
//! - Optionally load a `.env` file, gated by `DOTENV_DISABLED`.
//!
//! Does NOT handle:
//! - Reloading or refreshing configuration after it has been built.
//! - Merging several environments or fetching remote configuration.
//!
//! Invariants / Assumptions:
//! - Builder overrides take precedence over environment values.
//! - Only `NODE_ENV` is trimmed; other values are validated and kept exactly as supplied.
//! - A failed build emits a `tracing::error!` naming every failing variable before returning.

mod builder;
mod cache;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use cache::EnvironmentLoader;
pub use env::{EnvSource, MapEnv, SystemEnv, env_var_or_none};
pub use error::{ConfigError, FieldError, FieldErrorKind, FieldErrors};

#[cfg(test)]
mod tests;
