//! Error types for Dadu
//!
//! This module defines the error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Dadu operations
///
/// Most of these never reach the user: provider failures are absorbed by
/// the assistant and turned into fallback replies, and import failures are
/// reported as a plain `false`.
#[derive(Error, Debug)]
pub enum DaduError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Completion service errors (bad status, error payload, empty reply)
    #[error("Provider error: {0}")]
    Provider(String),

    /// No API key configured for the completion service
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Chat history import rejected
    #[error("Import error: {0}")]
    Import(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Dadu operations
///
/// Uses `anyhow::Error` so callers can attach context while propagating.
pub type Result<T> = anyhow::Result<T>;
