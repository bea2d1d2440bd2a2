//! Core error types for sensirise-core.
//!
//! Errors are handled at the layer where they occur: a classifier failure
//! becomes a step-local rejection, a malformed alarm time is rejected at the
//! registry boundary, and nothing propagates far enough to stop the tick loop.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sensirise-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Classifier-related errors
    #[error("Classifier error: {0}")]
    Classify(#[from] ClassifyError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Alarm time string did not parse as `HH:MM`
    #[error("Invalid alarm time '{input}': expected 24-hour HH:MM")]
    InvalidTime { input: String },

    /// Hour component outside 0..=23
    #[error("Hour {hour} out of range (0-23)")]
    HourOutOfRange { hour: u8 },

    /// Minute component outside 0..=59
    #[error("Minute {minute} out of range (0-59)")]
    MinuteOutOfRange { minute: u8 },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Classifier-boundary errors.
///
/// Any of these surface to the orchestrator as an "inconclusive" step
/// outcome, never as a hard failure.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// No classifier endpoint configured
    #[error("No classifier endpoint configured")]
    NotConfigured,

    /// Endpoint URL did not parse
    #[error("Invalid classifier endpoint: {0}")]
    InvalidEndpoint(String),

    /// Request could not be sent
    #[error("Classifier request failed: {0}")]
    Request(String),

    /// Endpoint answered with a non-success status
    #[error("Classifier endpoint returned HTTP {status}")]
    Http { status: u16 },

    /// Response body did not match the expected shape
    #[error("Malformed classifier response: {0}")]
    MalformedResponse(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
