//! Configuration for the comparison pipeline

use rr_core::{RrError, RrResult};
use serde::{Deserialize, Serialize};

/// Parameters for one camera/belt comparison run.
///
/// All durations are expressed in seconds and converted internally using
/// `time_scale` (timestamp units per second; 1000.0 for millisecond
/// timestamps as delivered by both device readers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Significance level for the correlation confidence interval
    pub alpha: f64,
    /// Window size of the median filter applied to the camera signal
    pub median_window: usize,
    /// Timestamp units per second
    pub time_scale: f64,
    /// Guard window excluded from each end of the offset search, in seconds
    pub guard_secs: f64,
    /// Common comparison window all recordings are cropped to, in seconds
    pub ceiling_secs: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            alpha: 0.01,
            // 14 for the median method; the mean method tolerates up to 18
            median_window: 14,
            time_scale: 1000.0,
            guard_secs: 3.0,
            ceiling_secs: 56.0,
        }
    }
}

impl CompareConfig {
    pub fn validate(&self) -> RrResult<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(RrError::InvalidConfig {
                reason: format!("alpha must be in (0, 1), got {}", self.alpha),
            });
        }
        if self.median_window == 0 {
            return Err(RrError::InvalidConfig {
                reason: "median filter window must be at least 1".to_string(),
            });
        }
        if self.time_scale <= 0.0 {
            return Err(RrError::InvalidConfig {
                reason: format!("time scale must be positive, got {}", self.time_scale),
            });
        }
        if self.guard_secs <= 0.0 {
            return Err(RrError::InvalidConfig {
                reason: format!("guard window must be positive, got {}s", self.guard_secs),
            });
        }
        if self.ceiling_secs <= 2.0 * self.guard_secs {
            return Err(RrError::InvalidConfig {
                reason: format!(
                    "comparison ceiling {}s must exceed twice the guard window {}s",
                    self.ceiling_secs, self.guard_secs
                ),
            });
        }
        Ok(())
    }
}
