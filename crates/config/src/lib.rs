//! Environment configuration for the web application.
//!
//! This crate reads the application's environment variables, validates them
//! and hands out a typed [`Config`]. Dependents receive an
//! [`EnvironmentLoader`] (or the `Arc<Config>` it yields) at startup instead of
//! reading the process environment themselves.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{
    ConfigError, ConfigLoader, EnvSource, EnvironmentLoader, FieldError, FieldErrorKind,
    FieldErrors, MapEnv, SystemEnv, env_var_or_none,
};
pub use types::{Config, ConfigSummary, ConfigUrl, EnvironmentMode};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
