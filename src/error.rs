// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for the verbosity instrumentation engine.
//!
//! This module provides strongly-typed errors for different parts of the crate,
//! using `thiserror` for ergonomic error definitions and `anyhow` for error propagation.

use thiserror::Error;

/// Errors raised while declaring instrumentation metadata.
///
/// These are programmer errors: they surface when an instrumented type builds
/// its registry, before any traced call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstrumentError {
    #[error("Invalid declaration for {method}: parameter {position} is out of range for arity {arity}")]
    InvalidDeclaration {
        method: String,
        position: usize,
        arity: usize,
    },

    #[error("Method declared twice with different arity: {method} ({first} vs {second})")]
    ConflictingArity {
        method: String,
        first: usize,
        second: usize,
    },

    #[error("Method was never declared: {0}")]
    NotInstrumented(String),
}

/// Errors produced by the data readers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    /// The reader was asked to reject the query.
    #[error("wrong query {0}")]
    WrongQuery(String),

    #[error("Failed to encode query: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for ReaderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid config format: {0}")]
    InvalidFormat(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("IO error reading config: {0}")]
    IoError(String),

    #[error("YAML parsing error: {0}")]
    YamlError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl ConfigError {
    /// Create an invalid value error for a named field.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::IoError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::YamlError(err.to_string())
    }
}

/// Result type alias using anyhow for flexible error handling.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_query_display() {
        let err = ReaderError::WrongQuery("{\"select\": \"x\"}".to_string());
        assert_eq!(err.to_string(), "wrong query {\"select\": \"x\"}");
    }

    #[test]
    fn test_invalid_declaration_display() {
        let err = InstrumentError::InvalidDeclaration {
            method: "query@Reader".to_string(),
            position: 4,
            arity: 3,
        };
        let display = err.to_string();
        assert!(display.contains("query@Reader"));
        assert!(display.contains("parameter 4"));
        assert!(display.contains("arity 3"));
    }

    #[test]
    fn test_not_instrumented_display() {
        let err = InstrumentError::NotInstrumented("quer@Reader".to_string());
        assert_eq!(err.to_string(), "Method was never declared: quer@Reader");
    }

    #[test]
    fn test_config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::NotFound(_)));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_config_error_from_json() {
        let result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid json");
        let json_err = result.unwrap_err();
        let config_err: ConfigError = json_err.into();
        assert!(matches!(config_err, ConfigError::JsonError(_)));
    }

    #[test]
    fn test_config_error_from_yaml() {
        let result: std::result::Result<serde_yaml::Value, _> = serde_yaml::from_str("a: [1, 2");
        let config_err: ConfigError = result.unwrap_err().into();
        assert!(matches!(config_err, ConfigError::YamlError(_)));
    }

    #[test]
    fn test_reader_error_from_json() {
        let result: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let reader_err: ReaderError = result.unwrap_err().into();
        assert!(matches!(reader_err, ReaderError::Encode(_)));
    }
}
