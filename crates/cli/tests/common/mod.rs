//! Shared test utilities for webapp-env integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic command factory that prevents dotenv loading.
//! - Clear application variables inherited from the host.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.

use assert_cmd::Command;
use webapp_config::constants::CONFIG_ENV_VARS;

/// Returns a hermetic `webapp-env` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Application variables are cleared to ensure no leakage from the host.
pub fn webapp_env_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("webapp-env");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env_remove("RUST_LOG");
    for var in CONFIG_ENV_VARS {
        cmd.env_remove(var);
    }

    cmd
}

/// Returns a hermetic command with the two required variables set.
#[allow(dead_code)]
pub fn webapp_env_cmd_valid() -> Command {
    let mut cmd = webapp_env_cmd();
    cmd.env("DATABASE_URL", "postgres://u:p@host/db")
        .env("NEXTAUTH_SECRET", "s3cret");
    cmd
}
