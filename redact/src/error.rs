//! Error types for the redaction host

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the redaction host
pub type Result<T> = std::result::Result<T, RedactError>;

/// Errors that can occur while loading inputs or writing composited frames
#[derive(Error, Debug)]
pub enum RedactError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid tracker configuration: {0}")]
    TrackerConfig(#[from] masktrack::ConfigError),

    #[error("Font loading failed: {0}")]
    FontError(String),

    #[error("Malformed detection record at line {line}: {message}")]
    DetectionRecord { line: usize, message: String },

    #[error("Frame {index} is {actual:?}, expected {expected:?}")]
    FrameSize {
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("No frames found in {0}")]
    NoFrames(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl RedactError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn font<S: Into<String>>(msg: S) -> Self {
        Self::FontError(msg.into())
    }

    pub fn record<S: Into<String>>(line: usize, msg: S) -> Self {
        Self::DetectionRecord {
            line,
            message: msg.into(),
        }
    }
}
