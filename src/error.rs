//! Error types for the audio analysis engine

use std::fmt;

/// Errors that can occur during audio analysis
///
/// Per-detector soft failures (too few peaks to derive a beat interval) never
/// surface here; they are absorbed inside the detectors via documented
/// fallbacks and sentinel values. Only input validation and pipeline-level
/// invalidity reach the caller.
#[derive(Debug, Clone)]
pub enum AnalysisError {
    /// Invalid input parameters (empty buffer, zero sample rate, ...)
    InvalidInput(String),

    /// Audio decoding error in the I/O wrapper
    DecodingError(String),

    /// The pipeline produced a non-finite or non-positive final value
    InvalidResult(String),

    /// An external analysis capability failed to initialize
    CapabilityUnavailable(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            AnalysisError::InvalidResult(msg) => write!(f, "Invalid analysis result: {}", msg),
            AnalysisError::CapabilityUnavailable(msg) => {
                write!(f, "Analysis capability unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AnalysisError::InvalidInput("empty buffer".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty buffer");

        let err = AnalysisError::InvalidResult("BPM is NaN".to_string());
        assert_eq!(err.to_string(), "Invalid analysis result: BPM is NaN");
    }
}
