//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while building configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value was empty or absent.
    #[error("Missing required configuration value: {name}")]
    MissingValue { name: &'static str },

    /// `JIRA_DOMAIN` could not be turned into a base URL.
    #[error("Invalid Jira domain '{domain}': {message}")]
    InvalidDomain { domain: String, message: String },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse settings in '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Validation error in the settings file.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },
}
