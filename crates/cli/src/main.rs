//! webapp-env - startup check for the web application's environment.
//!
//! Responsibilities:
//! - Load `.env`, validate the application variables once, and report the result.
//! - Exit with a structured code so deploy scripts can fail fast.
//!
//! Does NOT handle:
//! - Validation rules themselves (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing, as the application itself would.
//! - Logs go to stderr; stdout only carries the rendered report.

mod args;
mod error;
mod output;

use anyhow::Context;
use args::Cli;
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use webapp_config::{ConfigLoader, EnvironmentLoader};

fn main() {
    // Load .env file first so the loader sees the same variables the app would
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(e.exit_code().as_i32());
    }
    std::process::exit(ExitCode::Success.as_i32());
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let loader = EnvironmentLoader::new();

    let config = match loader.get_configuration() {
        Ok(config) => config,
        Err(err) => {
            if !cli.quiet
                && let Some(errors) = err.field_errors()
            {
                print!("{}", output::render_field_errors(errors, cli.format)?);
            }
            return Err(err).context("Failed to load configuration");
        }
    };

    tracing::info!(
        environment_mode = %config.environment_mode,
        "Environment configuration is valid"
    );

    if !cli.quiet {
        print!("{}", output::render_summary(&config.summary(), cli.format)?);
    }
    Ok(())
}
