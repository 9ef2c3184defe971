//! Rendering of validation results.
//!
//! Responsibilities:
//! - Render a redacted configuration summary as text or JSON.
//! - Render a field error report as text or JSON.
//!
//! Invariants:
//! - Only `ConfigSummary` values are rendered; raw secrets never reach this module.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use webapp_config::{ConfigSummary, FieldErrors};

use crate::args::OutputFormat;

/// JSON document printed for a run.
#[derive(Debug, Serialize)]
struct ReportOutput<'a> {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<&'a ConfigSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<&'static str, Vec<String>>>,
}

/// Render a successful validation.
pub fn render_summary(summary: &ConfigSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(&ReportOutput {
            valid: true,
            config: Some(summary),
            errors: None,
        }),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "Environment configuration is valid")?;
            writeln!(out, "  environment_mode: {}", summary.environment_mode)?;
            writeln!(out, "  database_url:     {}", summary.database_url)?;
            writeln!(out, "  auth_secret:      {}", summary.auth_secret)?;
            writeln!(
                out,
                "  auth_public_url:  {}",
                summary.auth_public_url.as_deref().unwrap_or("(unset)")
            )?;
            writeln!(
                out,
                "  backend_url:      {}",
                summary.backend_url.as_deref().unwrap_or("(unset)")
            )?;
            Ok(out)
        }
    }
}

/// Render a failed validation.
pub fn render_field_errors(errors: &FieldErrors, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(&ReportOutput {
            valid: false,
            config: None,
            errors: Some(errors.to_map()),
        }),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "Invalid environment variables:")?;
            for error in errors {
                writeln!(out, "  {}: {}", error.var, error.kind)?;
            }
            Ok(out)
        }
    }
}

fn render_json(report: &ReportOutput<'_>) -> Result<String> {
    let mut out = serde_json::to_string_pretty(report)?;
    out.push('\n');
    Ok(out)
}
