//! Error types for the fitcheck outfit analysis service.
//!
//! Errors are organized by stage to provide clear, actionable error messages
//! that include relevant context (model names, HTTP status codes, specific
//! issues).

use thiserror::Error;

/// Top-level error type for fitcheck operations.
#[derive(Error, Debug)]
pub enum FitcheckError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Outfit analysis errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// LLM suggestion errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Outfit analysis errors, organized by stage.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image decoding failed
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Model files missing or failed to load
    #[error("Model error for {name}: {message}")]
    Model { name: String, message: String },

    /// ONNX inference failed
    #[error("Inference error in {stage}: {message}")]
    Inference { stage: String, message: String },
}

/// LLM chat completion errors.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Request failed to reach the provider or the response was unusable
    #[error("{message}")]
    Request {
        message: String,
        status_code: Option<u16>,
    },
}

impl LlmError {
    /// The HTTP status code of the failed call, when one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LlmError::Request { status_code, .. } => *status_code,
        }
    }
}

/// Convenience type alias for fitcheck results.
pub type Result<T> = std::result::Result<T, FitcheckError>;

/// Convenience type alias for analysis-specific results.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
