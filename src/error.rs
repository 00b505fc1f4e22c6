//! Error handling for HLP
//!
//! Decode failures are ordinary data: callers branch on them and fall back to
//! a default chain. Everything else goes through `HlpError`.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for HLP operations
pub type Result<T> = std::result::Result<T, HlpError>;

/// Why a single layer segment was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayerFault {
    #[error("missing ',' between side and back fields")]
    MissingComma,

    #[error("empty field")]
    EmptyField,

    #[error("'{0}' is neither a decimal number nor a hex digit")]
    InvalidValue(String),

    #[error("value {0} is outside 0-15")]
    OutOfRange(u32),
}

/// Failure to decode the canonical text form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("no input")]
    Empty,

    #[error("layer {index}: {reason}")]
    MalformedLayer { index: usize, reason: LayerFault },
}

impl DecodeError {
    /// 0-based index of the first offending segment.
    ///
    /// Empty input reports index 0.
    pub fn failure_index(&self) -> usize {
        match self {
            DecodeError::Empty => 0,
            DecodeError::MalformedLayer { index, .. } => *index,
        }
    }

    /// Short marker shown in front of the rejected text
    pub fn banner(&self) -> String {
        format!("Err_layer_{}", self.failure_index())
    }
}

/// Main error type for HLP operations
#[derive(Error, Debug)]
pub enum HlpError {
    #[error("Gate reference {value} is outside 0-15")]
    InvalidReference { value: u32 },

    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid command '{input}': {reason}")]
    InvalidCommand { input: String, reason: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HlpError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            HlpError::InvalidReference { .. } => "INVALID_REFERENCE",
            HlpError::Decode(_) => "DECODE_FAILED",
            HlpError::InvalidCommand { .. } => "INVALID_COMMAND",
            HlpError::InvalidConfig { .. } => "INVALID_CONFIG",
            HlpError::FileNotFound { .. } => "FILE_NOT_FOUND",
            HlpError::Io(_) => "IO_ERROR",
            HlpError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if the editing session can simply continue
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HlpError::Decode(_) | HlpError::InvalidCommand { .. } | HlpError::InvalidReference { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            HlpError::Decode(_) => vec![
                "Each layer is written as 'side,back; '",
                "Values are 0-15 in decimal or a single hex digit",
                "Prefix a value with '*' to put that gate in subtract mode",
            ],
            HlpError::InvalidCommand { .. } => vec![
                "Commands: insert N, remove N, bump N side|back +|-, toggle N side|back, load TEXT",
                "Layer indices start at 0",
            ],
            HlpError::InvalidConfig { .. } => vec!["max_layers must be at least 1"],
            HlpError::FileNotFound { .. } => vec!["Check the file path is correct"],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_index() {
        assert_eq!(DecodeError::Empty.failure_index(), 0);
        let err = DecodeError::MalformedLayer {
            index: 3,
            reason: LayerFault::MissingComma,
        };
        assert_eq!(err.failure_index(), 3);
        assert_eq!(err.banner(), "Err_layer_3");
        assert_eq!(DecodeError::Empty.banner(), "Err_layer_0");
    }

    #[test]
    fn test_error_codes() {
        let err: HlpError = DecodeError::Empty.into();
        assert_eq!(err.error_code(), "DECODE_FAILED");
        assert!(err.is_recoverable());
        assert!(!err.recovery_suggestions().is_empty());

        let err = HlpError::InvalidConfig {
            reason: "max_layers is 0".to_string(),
        };
        assert_eq!(err.error_code(), "INVALID_CONFIG");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = DecodeError::MalformedLayer {
            index: 1,
            reason: LayerFault::OutOfRange(16),
        };
        assert_eq!(err.to_string(), "layer 1: value 16 is outside 0-15");
    }
}
