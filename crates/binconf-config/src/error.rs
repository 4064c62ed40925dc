//! Configuration model errors

use thiserror::Error;

/// Errors that can occur while reading or writing configuration entities
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A JSON value has the wrong shape for the entity being decoded
    #[error("Malformed {entity}: expected JSON {expected}, got {found}")]
    MalformedInput {
        /// Entity being decoded
        entity: String,
        /// JSON type the entity requires
        expected: &'static str,
        /// JSON type actually found
        found: &'static str,
    },

    /// Unknown duplicate policy name
    #[error("Invalid duplicate policy: '{0}' (expected 'keep' or 'replace')")]
    InvalidPolicy(String),

    /// Failed to parse or serialize JSON text
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Failed to read or write a configuration file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
