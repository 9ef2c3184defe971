//! Basic tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test the documented example environment.
//! - Test defaults for unset optional variables.
//! - Test that builder overrides take precedence over the environment.

use secrecy::ExposeSecret;

use super::required_env;
use crate::constants::{BACKEND_URL_ENV, DATABASE_URL_ENV, NEXTAUTH_URL_ENV, NODE_ENV_ENV};
use crate::loader::builder::ConfigLoader;
use crate::types::EnvironmentMode;

#[test]
fn test_minimal_environment_builds() {
    let config = ConfigLoader::new()
        .from_source(&required_env())
        .build()
        .unwrap();

    assert_eq!(config.environment_mode, EnvironmentMode::Production);
    assert_eq!(config.database_url.as_str(), "postgres://u:p@host/db");
    assert_eq!(config.auth_secret.expose_secret(), "s3cret");
    assert!(config.auth_public_url.is_none());
    assert!(config.backend_url.is_none());
}

#[test]
fn test_full_environment_builds() {
    let env = required_env()
        .with_var(NODE_ENV_ENV, "development")
        .with_var(NEXTAUTH_URL_ENV, "http://localhost:3000")
        .with_var(BACKEND_URL_ENV, "https://api.example.com/v1");

    let config = ConfigLoader::new().from_source(&env).build().unwrap();

    assert_eq!(config.environment_mode, EnvironmentMode::Development);
    assert_eq!(
        config.auth_public_url.as_ref().map(|u| u.as_str()),
        Some("http://localhost:3000")
    );
    assert_eq!(
        config.backend_url.as_ref().map(|u| u.as_str()),
        Some("https://api.example.com/v1")
    );
}

#[test]
fn test_builder_only_configuration() {
    let config = ConfigLoader::new()
        .with_environment_mode(EnvironmentMode::Test)
        .with_database_url("mysql://root@localhost/app".to_string())
        .with_auth_secret("builder-secret".to_string())
        .with_backend_url("http://backend:8080".to_string())
        .build()
        .unwrap();

    assert_eq!(config.environment_mode, EnvironmentMode::Test);
    assert_eq!(config.database_url.as_url().scheme(), "mysql");
    assert_eq!(config.auth_secret.expose_secret(), "builder-secret");
    assert_eq!(
        config.backend_url.as_ref().and_then(|u| u.as_url().port()),
        Some(8080)
    );
}

#[test]
fn test_urls_are_kept_exactly_as_supplied() {
    let env = required_env()
        .with_var(NEXTAUTH_URL_ENV, "HTTPS://App.Example.COM:443/auth")
        .with_var(BACKEND_URL_ENV, "http://localhost:8080");

    let config = ConfigLoader::new().from_source(&env).build().unwrap();

    assert_eq!(
        config.auth_public_url.as_ref().map(|u| u.as_str()),
        Some("HTTPS://App.Example.COM:443/auth")
    );
    assert_eq!(
        config.backend_url.as_ref().map(|u| u.as_str()),
        Some("http://localhost:8080")
    );
    // Dependents appending a path must not end up with a doubled slash.
    let rewrite = format!("{}/api", config.backend_url.as_ref().unwrap());
    assert_eq!(rewrite, "http://localhost:8080/api");
}

#[test]
fn test_builder_overrides_environment() {
    let env = required_env()
        .with_var(NODE_ENV_ENV, "development")
        .with_var(BACKEND_URL_ENV, "https://from-env.example.com");

    let config = ConfigLoader::new()
        .with_environment_mode(EnvironmentMode::Test)
        .with_database_url("postgres://override/db".to_string())
        .with_auth_secret("override-secret".to_string())
        .from_source(&env)
        .build()
        .unwrap();

    assert_eq!(config.environment_mode, EnvironmentMode::Test);
    assert_eq!(config.database_url.as_str(), "postgres://override/db");
    assert_eq!(config.auth_secret.expose_secret(), "override-secret");
    // Not overridden, so the environment value is used.
    assert_eq!(
        config.backend_url.as_ref().and_then(|u| u.as_url().host_str()),
        Some("from-env.example.com")
    );
}

#[test]
fn test_environment_fills_gaps_left_by_builder() {
    let env = required_env().with_var(DATABASE_URL_ENV, "postgres://env-host/db");

    let config = ConfigLoader::new()
        .with_auth_secret("builder-secret".to_string())
        .from_source(&env)
        .build()
        .unwrap();

    assert_eq!(config.database_url.as_url().host_str(), Some("env-host"));
    assert_eq!(config.auth_secret.expose_secret(), "builder-secret");
}
