//! Error handling for DryWet
//!
//! The signal path itself never fails. Errors only come from the edges:
//! file I/O, parameter lookup by key, and bus layout negotiation.

use thiserror::Error;

/// Result type alias for DryWet operations
pub type Result<T> = std::result::Result<T, DryWetError>;

/// Main error type for DryWet operations
#[derive(Error, Debug)]
pub enum DryWetError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // Host Errors
    #[error("Unsupported bus layout: {inputs} input / {outputs} output channels")]
    UnsupportedLayout { inputs: usize, outputs: usize },

    // Parameter Errors
    #[error("Unknown parameter: {key}")]
    UnknownParameter { key: String },

    #[error("Invalid value {value} for parameter {key}")]
    InvalidParameterValue { key: String, value: f32 },

    // Configuration Errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DryWetError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            DryWetError::FileNotFound { .. } => "FILE_NOT_FOUND",
            DryWetError::InvalidAudio { .. } => "INVALID_AUDIO",
            DryWetError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            DryWetError::UnsupportedLayout { .. } => "UNSUPPORTED_LAYOUT",
            DryWetError::UnknownParameter { .. } => "UNKNOWN_PARAMETER",
            DryWetError::InvalidParameterValue { .. } => "INVALID_PARAMETER_VALUE",
            DryWetError::InvalidConfig { .. } => "INVALID_CONFIG",
            DryWetError::Io(_) => "IO_ERROR",
            DryWetError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            DryWetError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            DryWetError::InvalidAudio { .. } => vec![
                "Try converting the file to WAV format first",
                "The file may be corrupted - try re-exporting from source",
            ],
            DryWetError::UnsupportedFormat { .. } | DryWetError::UnsupportedLayout { .. } => vec![
                "Only mono or stereo audio is supported",
                "Input and output channel counts must match",
            ],
            DryWetError::UnknownParameter { .. } => {
                vec!["Run 'drywet-cli params' to list parameter keys"]
            }
            _ => vec![],
        }
    }
}
