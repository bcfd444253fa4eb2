//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{SignMeUpError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_client_config(&settings.client)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(SignMeUpError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(SignMeUpError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    if !config.base_path.is_empty() && !config.base_path.starts_with('/') {
        return Err(SignMeUpError::Config(
            format!("Server base path must start with '/': {}", config.base_path)
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(SignMeUpError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(SignMeUpError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(SignMeUpError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate API client configuration
fn validate_client_config(config: &super::ClientConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(SignMeUpError::Config(
            "API URL is required".to_string()
        ));
    }

    if !config.api_url.starts_with('/') {
        url::Url::parse(&config.api_url)?;
    }

    if config.timeout_seconds == 0 {
        return Err(SignMeUpError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(SignMeUpError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(SignMeUpError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
