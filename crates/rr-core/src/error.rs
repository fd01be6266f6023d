//! Error handling for the respiration-rate comparison pipeline
//!
//! Every failure is a per-recording data-quality condition: callers record
//! it against the offending pair and move on, there are no retries.

use core::fmt;

/// Result type alias for pipeline operations
pub type RrResult<T> = Result<T, RrError>;

/// Error type covering all pipeline stages
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RrError {
    /// Too few samples for the requested operation
    InsufficientData {
        /// Pipeline stage that hit the minimum
        stage: &'static str,
        /// Minimum sample count required
        required: usize,
        /// Sample count actually available
        actual: usize,
    },

    /// Offset search window larger than the available samples,
    /// or the real-time overlap of the two signals is too short
    AlignmentFailed {
        /// Description of the failed search
        reason: String,
    },

    /// Fewer than two peaks detected during rate extraction
    InsufficientPeaks {
        /// Number of peaks found
        found: usize,
    },

    /// Series data violates a structural contract
    InvalidSeries {
        /// Description of the violation
        reason: String,
    },

    /// Invalid parameter value
    InvalidConfig {
        /// Description of the configuration error
        reason: String,
    },
}

impl fmt::Display for RrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RrError::InsufficientData { stage, required, actual } => {
                write!(
                    f,
                    "Insufficient data in stage '{}': {} samples required, {} available",
                    stage, required, actual
                )
            }
            RrError::AlignmentFailed { reason } => {
                write!(f, "Alignment failed: {}", reason)
            }
            RrError::InsufficientPeaks { found } => {
                write!(
                    f,
                    "Insufficient peaks for rate extraction: found {}, need at least 2",
                    found
                )
            }
            RrError::InvalidSeries { reason } => {
                write!(f, "Invalid series: {}", reason)
            }
            RrError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
        }
    }
}

impl std::error::Error for RrError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = RrError::InsufficientData {
            stage: "resample",
            required: 2,
            actual: 1,
        };
        let display = format!("{}", error);
        assert!(display.contains("resample"));
        assert!(display.contains("2"));
        assert!(display.contains("1"));
    }

    #[test]
    fn test_peak_error_display() {
        let error = RrError::InsufficientPeaks { found: 1 };
        assert!(format!("{}", error).contains("found 1"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = RrError::InvalidSeries { reason: "test".to_string() };
        let error2 = RrError::InvalidSeries { reason: "test".to_string() };
        assert_eq!(error1, error2);
    }
}
