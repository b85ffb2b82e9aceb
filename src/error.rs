//! Error handling for pcmwav
//!
//! Every failure is returned to the immediate caller. Transforms never leave a
//! buffer half-updated, so after an error the buffer still holds its last
//! good state.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pcmwav operations
pub type Result<T> = std::result::Result<T, WavError>;

/// Main error type for pcmwav operations
#[derive(Error, Debug)]
pub enum WavError {
    // Codec Errors
    #[error("Bad magic at offset {offset}: expected {expected:?}, found {found:?}")]
    BadMagic {
        offset: usize,
        expected: &'static str,
        found: String,
    },

    #[error("Truncated stream: {context}")]
    TruncatedStream { context: String },

    #[error("Unsupported bit depth: {bits} (supported: 8, 16, 32, 64)")]
    UnsupportedBitDepth { bits: u16 },

    #[error("Unsupported format tag: {format_tag} (only linear PCM = 1)")]
    UnsupportedFormat { format_tag: u16 },

    #[error("Missing chunk: {tag:?} must appear before the sample data")]
    MissingChunk { tag: &'static str },

    // Sample Model Errors
    #[error("Channel count mismatch: expected {expected}, found {found}")]
    ChannelCountMismatch { expected: u16, found: u16 },

    #[error("Sample width mismatch: buffer is {expected}-bit but sample is {found}-bit")]
    SampleWidthMismatch { expected: u16, found: u16 },

    #[error("Integer cast failure: {value} cannot be represented as an integer sample")]
    IntegerCastFailure { value: f64 },

    #[error("Overflow: {context}")]
    Overflow { context: String },

    // Transform Errors
    #[error("Invalid speed factor: {factor} (must be positive and finite)")]
    InvalidFactor { factor: f64 },

    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate { rate: u32 },

    #[error("Invalid resampler configuration: {reason}")]
    InvalidConfig { reason: String },

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WavError {
    pub(crate) fn truncated(context: impl Into<String>) -> Self {
        WavError::TruncatedStream {
            context: context.into(),
        }
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        WavError::Overflow {
            context: context.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            WavError::BadMagic { .. } => "BAD_MAGIC",
            WavError::TruncatedStream { .. } => "TRUNCATED_STREAM",
            WavError::UnsupportedBitDepth { .. } => "UNSUPPORTED_BIT_DEPTH",
            WavError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            WavError::MissingChunk { .. } => "MISSING_CHUNK",
            WavError::ChannelCountMismatch { .. } => "CHANNEL_COUNT_MISMATCH",
            WavError::SampleWidthMismatch { .. } => "SAMPLE_WIDTH_MISMATCH",
            WavError::IntegerCastFailure { .. } => "INTEGER_CAST_FAILURE",
            WavError::Overflow { .. } => "OVERFLOW",
            WavError::InvalidFactor { .. } => "INVALID_FACTOR",
            WavError::InvalidSampleRate { .. } => "INVALID_SAMPLE_RATE",
            WavError::InvalidConfig { .. } => "INVALID_CONFIG",
            WavError::FileNotFound { .. } => "FILE_NOT_FOUND",
            WavError::Io(_) => "IO_ERROR",
            WavError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error was raised while decoding a byte stream
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            WavError::BadMagic { .. }
                | WavError::TruncatedStream { .. }
                | WavError::UnsupportedBitDepth { .. }
                | WavError::UnsupportedFormat { .. }
                | WavError::MissingChunk { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            WavError::BadMagic { .. } => vec![
                "The input is not a RIFF/WAVE file",
                "Convert the file to uncompressed PCM WAV first",
            ],
            WavError::TruncatedStream { .. } => vec![
                "The file ends before its headers say it should",
                "The file may be corrupted - try re-exporting from source",
            ],
            WavError::UnsupportedBitDepth { .. } => {
                vec!["Re-export the audio as 8, 16, 32 or 64-bit integer PCM"]
            }
            WavError::UnsupportedFormat { .. } => {
                vec!["Only linear PCM is supported - convert float or compressed audio first"]
            }
            WavError::ChannelCountMismatch { .. } => vec![
                "Mono conversion needs a stereo input and stereo conversion needs a mono input",
                "Only mono and stereo tracks can be combined",
            ],
            WavError::Overflow { .. } => vec![
                "The result would not fit in a WAV header field",
                "Use a smaller factor or a shorter input",
            ],
            WavError::InvalidFactor { .. } => vec!["Use a positive speed factor such as 1.5 or 2"],
            WavError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = WavError::BadMagic {
            offset: 0,
            expected: "RIFF",
            found: "RIFX".to_string(),
        };
        assert_eq!(err.error_code(), "BAD_MAGIC");
        assert!(err.is_decode_error());

        let err = WavError::overflow("sample rate");
        assert_eq!(err.error_code(), "OVERFLOW");
        assert!(!err.is_decode_error());
    }

    #[test]
    fn test_recovery_suggestions() {
        let err = WavError::ChannelCountMismatch {
            expected: 2,
            found: 1,
        };
        assert!(!err.recovery_suggestions().is_empty());

        let err = WavError::IntegerCastFailure { value: f64::NAN };
        assert!(err.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: WavError = io.into();
        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(err.to_string().contains("denied"));
    }
}
