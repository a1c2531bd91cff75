//! Error types for Solidafy Ledger
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for Solidafy Ledger
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Change Log Errors
    // ============================================================================
    #[error("Operator '{method}' failed for '{name}': {message}")]
    Operator {
        name: String,
        method: String,
        message: String,
    },

    // ============================================================================
    // Store Errors
    // ============================================================================
    #[error("Store error: {message}")]
    Store { message: String },

    #[error("DuckDB error: {0}")]
    Database(#[from] duckdb::Error),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode input: {message}")]
    Decode { message: String },

    // ============================================================================
    // Arrow/Parquet Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an operator error for a single change record
    pub fn operator(
        name: impl Into<String>,
        method: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Operator {
            name: name.into(),
            method: method.into(),
            message: message.into(),
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Create a file-not-found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Check if this error is confined to a single change record.
    ///
    /// Record-level errors never abort a run; everything else does.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            Error::Operator { .. }
                | Error::Store { .. }
                | Error::Database(_)
        )
    }
}

/// Result type alias for Solidafy Ledger
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("products");
        assert_eq!(err.to_string(), "Missing required config field: products");

        let err = Error::operator("Widget", "price_abs", "invalid float literal");
        assert_eq!(
            err.to_string(),
            "Operator 'price_abs' failed for 'Widget': invalid float literal"
        );

        let err = Error::file_not_found("data/missing.text");
        assert_eq!(err.to_string(), "File not found: data/missing.text");
    }

    #[test]
    fn test_is_record_level() {
        assert!(Error::operator("a", "price_abs", "bad").is_record_level());
        assert!(Error::store("constraint").is_record_level());

        assert!(!Error::config("test").is_record_level());
        assert!(!Error::file_not_found("x").is_record_level());
        assert!(!Error::Io(std::io::Error::other("disk")).is_record_level());
    }

    #[test]
    fn test_from_anyhow_is_transparent() {
        let err: Error = anyhow::anyhow!("upstream failed").into();
        assert!(matches!(err, Error::Anyhow(_)));
        assert_eq!(err.to_string(), "upstream failed");
        assert!(!err.is_record_level());
    }
}
