//! Error types shared across FaceTrigger crates.
//!
//! The detector core never fails; these errors belong to the layers around
//! it (configuration files, recorded frame streams, the CLI).

use std::path::PathBuf;

/// Top-level error type for FaceTrigger operations.
#[derive(Debug, thiserror::Error)]
pub enum FaceTriggerError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Frame stream error at line {line}: {message}")]
    Frame { line: usize, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unknown blend shape: {name}")]
    UnknownKey { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using FaceTriggerError.
pub type FaceTriggerResult<T> = Result<T, FaceTriggerError>;

impl FaceTriggerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn frame(line: usize, msg: impl Into<String>) -> Self {
        Self::Frame {
            line,
            message: msg.into(),
        }
    }

    pub fn unknown_key(name: impl Into<String>) -> Self {
        Self::UnknownKey { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_error_reports_line_number() {
        let err = FaceTriggerError::frame(12, "expected value");
        assert_eq!(
            err.to_string(),
            "Frame stream error at line 12: expected value"
        );
    }

    #[test]
    fn unknown_key_names_the_key() {
        let err = FaceTriggerError::unknown_key("earWiggle");
        assert_eq!(err.to_string(), "Unknown blend shape: earWiggle");
    }

    #[test]
    fn io_errors_convert_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FaceTriggerError = io.into();
        assert!(matches!(err, FaceTriggerError::Io(_)));
        assert_eq!(err.to_string(), "gone");
    }
}
