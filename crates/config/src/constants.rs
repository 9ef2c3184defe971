//! Environment variable names and defaults shared across the workspace.
//!
//! Dependents should never read these variables directly; they exist so the
//! loader, the CLI and the tests agree on spelling.

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Runtime mode (`development`, `test` or `production`).
pub const NODE_ENV_ENV: &str = "NODE_ENV";

/// Connection string for the persistence layer. Required.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Secret used by the authentication subsystem to sign sessions. Required.
pub const NEXTAUTH_SECRET_ENV: &str = "NEXTAUTH_SECRET";

/// Public URL the authentication subsystem is reachable on. Optional.
pub const NEXTAUTH_URL_ENV: &str = "NEXTAUTH_URL";

/// Upstream backend used by the proxy/rewrite layer. Optional.
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

/// Every variable the loader reads, in validation order.
pub const CONFIG_ENV_VARS: [&str; 5] = [
    NODE_ENV_ENV,
    DATABASE_URL_ENV,
    NEXTAUTH_SECRET_ENV,
    NEXTAUTH_URL_ENV,
    BACKEND_URL_ENV,
];

/// Set to `1` or `true` to skip `.env` loading.
pub const DOTENV_DISABLED_ENV: &str = "DOTENV_DISABLED";

// =============================================================================
// Display
// =============================================================================

/// Placeholder printed in place of secret values.
pub const REDACTED: &str = "[REDACTED]";

/// Placeholder substituted for the password component of URLs.
pub const REDACTED_PASSWORD: &str = "****";
