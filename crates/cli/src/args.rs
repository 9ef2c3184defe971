//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//!
//! Non-responsibilities:
//! - Does not read application variables; those go through `webapp_config` only.

use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "webapp-env")]
#[command(
    about = "Validate the web application's environment configuration",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  webapp-env\n  webapp-env --format json\n  DOTENV_DISABLED=1 webapp-env --quiet\n"
)]
pub struct Cli {
    /// Output format for the redacted configuration summary
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only validate; print nothing on success
    #[arg(short, long)]
    pub quiet: bool,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
