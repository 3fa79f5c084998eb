//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric environment variable could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    ParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// The sub-request bound must allow at least one sub-request.
    #[error("invalid max sub-requests '{value}': must be at least 1")]
    InvalidMaxSubRequests { value: usize },

    /// The cache namespace may not be empty or contain the key separator.
    #[error("invalid cache namespace '{value}'")]
    InvalidNamespace { value: String },

    /// A routed model identifier may not be empty.
    #[error("model identifier for the {level} tier is empty")]
    EmptyModelId { level: &'static str },
}
