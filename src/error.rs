// src/error.rs

//! Unified error handling for the notifier.

use std::fmt;

use thiserror::Error;

/// Result type alias for notifier operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Required environment variables are absent or empty
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingConfiguration(Vec<String>),

    /// Status endpoint unreachable or answered with a non-success code
    #[error("Endpoint {endpoint} is unavailable: {reason}")]
    Transport { endpoint: String, reason: String },

    /// Status endpoint body is not valid JSON
    #[error("Response from {endpoint} is not valid JSON: {reason}")]
    Decode { endpoint: String, reason: String },

    /// Payload is missing an expected key
    #[error("Invalid API response: {0}")]
    InvalidResponseShape(String),

    /// Payload value has an unexpected type
    #[error("Unexpected field type: {0}")]
    WrongFieldType(String),

    /// Homework status outside the known verdicts
    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    /// Chat message could not be delivered
    #[error("Message delivery failed: {0}")]
    Delivery(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Create a transport error for the given endpoint.
    pub fn transport(endpoint: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a decode error for the given endpoint.
    pub fn decode(endpoint: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a response shape error.
    pub fn shape(message: impl Into<String>) -> Self {
        Self::InvalidResponseShape(message.into())
    }

    /// Create a field type error.
    pub fn field_type(message: impl Into<String>) -> Self {
        Self::WrongFieldType(message.into())
    }

    /// Create a delivery error.
    pub fn delivery(message: impl fmt::Display) -> Self {
        Self::Delivery(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
