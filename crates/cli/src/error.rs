//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that deploy scripts can use to tell a bad
//!   environment apart from other failures.
//! - Map configuration errors to exit codes.
//!
//! Invariants:
//! - Exit code 2 always means the application configuration is invalid.

use webapp_config::ConfigError;

/// Structured exit codes for webapp-env.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - the environment is valid.
    Success = 0,

    /// General error - `.env` loading or output failure.
    GeneralError = 1,

    /// Invalid configuration - one or more variables are missing or malformed.
    ///
    /// Startup must not proceed; fix the environment rather than retrying.
    InvalidConfiguration = 2,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::InvalidEnvironment(_) => ExitCode::InvalidConfiguration,
            ConfigError::DotenvParse { .. }
            | ConfigError::DotenvIo { .. }
            | ConfigError::DotenvUnknown => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no ConfigError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map_or(ExitCode::GeneralError, ExitCode::from)
    }
}
