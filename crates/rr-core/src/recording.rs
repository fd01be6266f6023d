//! Recording identity and per-recording result types

use crate::error::RrResult;
use crate::time_series::TimeSeries;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smoothing method applied to the camera signal before rate extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMethod {
    Mean,
    Median,
}

impl std::fmt::Display for FilterMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterMethod::Mean => write!(f, "mean"),
            FilterMethod::Median => write!(f, "median"),
        }
    }
}

/// Parameters identifying one recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordingKey {
    /// Proband (subject) id
    pub proband: u8,
    /// Breathing rate the proband was instructed to follow (breaths/min)
    pub paced_bpm: u16,
    /// Camera distance to the proband in meters
    pub distance_m: u8,
    /// Nominal camera sampling rate in frames/second
    pub sampling_fps: u16,
    /// Smoothing method for the camera signal
    pub method: FilterMethod,
}

impl std::fmt::Display for RecordingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}bpm_{}m_{}fps_{}_prob{}",
            self.paced_bpm, self.distance_m, self.sampling_fps, self.method, self.proband
        )
    }
}

/// One camera/belt recording of the same physical event window.
///
/// Both series must overlap in real time for at least several periods of
/// the paced breathing rate, otherwise alignment will reject the pair.
/// Pairs are processed independently and never share mutable state.
#[derive(Debug, Clone)]
pub struct RecordingPair {
    /// Unique identifier for this pair
    pub id: Uuid,
    /// Recording parameters
    pub key: RecordingKey,
    /// Depth-camera displacement series (C)
    pub camera: TimeSeries,
    /// Respiration-belt force series (RB), the ground truth
    pub belt: TimeSeries,
}

impl RecordingPair {
    pub fn new(key: RecordingKey, camera: TimeSeries, belt: TimeSeries) -> Self {
        RecordingPair {
            id: Uuid::new_v4(),
            key,
            camera,
            belt,
        }
    }
}

/// Statistics derived from comparing one camera series to its belt
/// reference. Computed once per pair, then only read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    /// Pearson correlation coefficient between the aligned, filtered
    /// camera series and the aligned belt series
    pub correlation: f64,
    /// Two-sided p-value of the correlation
    pub p_value: f64,
    /// Lower confidence bound of the correlation
    pub ci_low: f64,
    /// Upper confidence bound of the correlation
    pub ci_high: f64,
    /// Breathing rate extracted from the camera series (breaths/min)
    pub camera_bpm: f64,
    /// Breathing rate extracted from the belt series (breaths/min)
    pub belt_bpm: f64,
    /// Absolute rate error in breaths/min
    pub abs_error_bpm: f64,
    /// Rate error relative to the belt rate, in percent
    pub rel_error_pct: f64,
}

/// Capability to deliver raw recording pairs.
///
/// Device-specific readers (depth-camera capture files, belt exports) live
/// behind this trait and are responsible for unit conversion, NaN removal
/// and mean-centering before the data reaches the pipeline.
pub trait RecordingSource {
    fn load_pair(&self, key: &RecordingKey) -> RrResult<RecordingPair>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        let key = RecordingKey {
            proband: 4,
            paced_bpm: 15,
            distance_m: 2,
            sampling_fps: 15,
            method: FilterMethod::Median,
        };
        assert_eq!(key.to_string(), "15bpm_2m_15fps_median_prob4");
    }

    #[test]
    fn test_pair_ids_unique() {
        let key = RecordingKey {
            proband: 1,
            paced_bpm: 10,
            distance_m: 1,
            sampling_fps: 15,
            method: FilterMethod::Median,
        };
        let series = TimeSeries::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        let a = RecordingPair::new(key, series.clone(), series.clone());
        let b = RecordingPair::new(key, series.clone(), series);
        assert_ne!(a.id, b.id);
    }
}
