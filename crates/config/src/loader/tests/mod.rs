//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test builder methods and defaults.
//! - Test environment variable handling and precedence.
//! - Test validation of required and optional variables.
//! - Test `.env` loading behavior.
//! - Test the events emitted when validation fails.
//!
//! Invariants:
//! - Tests that touch the process environment use `serial_test` and `env_lock()`.
//! - Other tests feed the loader through `MapEnv` and need no locking.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

use crate::constants::{DATABASE_URL_ENV, NEXTAUTH_SECRET_ENV};
use crate::loader::env::MapEnv;

pub mod basic_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Minimal valid environment: the two required variables.
pub fn required_env() -> MapEnv {
    MapEnv::new()
        .with_var(DATABASE_URL_ENV, "postgres://u:p@host/db")
        .with_var(NEXTAUTH_SECRET_ENV, "s3cret")
}
