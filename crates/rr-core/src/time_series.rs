//! TimeSeries: core container for one measurement channel

use crate::error::{RrError, RrResult};
use serde::{Deserialize, Serialize};

/// One-dimensional measurement over time.
///
/// Timestamps are strictly increasing and free of NaN; both invariants are
/// enforced at construction. Raw series carry irregular device timestamps
/// with an arbitrary start; resampled series are uniformly stepped and
/// start at time zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<f64>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a new series, validating the structural invariants
    pub fn new(timestamps: Vec<f64>, values: Vec<f64>) -> RrResult<Self> {
        if timestamps.len() != values.len() {
            return Err(RrError::InvalidSeries {
                reason: format!(
                    "timestamp count {} doesn't match value count {}",
                    timestamps.len(),
                    values.len()
                ),
            });
        }

        if timestamps.iter().any(|t| t.is_nan()) || values.iter().any(|v| v.is_nan()) {
            return Err(RrError::InvalidSeries {
                reason: "series contains NaN entries".to_string(),
            });
        }

        if timestamps.windows(2).any(|w| w[1] <= w[0]) {
            return Err(RrError::InvalidSeries {
                reason: "timestamps must be strictly increasing".to_string(),
            });
        }

        Ok(TimeSeries { timestamps, values })
    }

    /// Build a uniformly stepped series starting at time zero
    pub fn from_uniform(step: f64, values: Vec<f64>) -> RrResult<Self> {
        if step <= 0.0 || step.is_nan() {
            return Err(RrError::InvalidConfig {
                reason: format!("sample step must be positive, got {}", step),
            });
        }
        let timestamps = (0..values.len()).map(|i| i as f64 * step).collect();
        TimeSeries::new(timestamps, values)
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Time spanned between first and last sample
    pub fn duration(&self) -> f64 {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Median step between consecutive timestamps.
    ///
    /// Robust against isolated clock dropouts in raw device data, which is
    /// why the comparator derives the native sampling rate from it rather
    /// than from the mean step.
    pub fn median_step(&self) -> RrResult<f64> {
        if self.len() < 2 {
            return Err(RrError::InsufficientData {
                stage: "median_step",
                required: 2,
                actual: self.len(),
            });
        }

        let mut steps: Vec<f64> = self.timestamps.windows(2).map(|w| w[1] - w[0]).collect();
        steps.sort_by(|a, b| a.total_cmp(b));

        let mid = steps.len() / 2;
        if steps.len() % 2 == 0 {
            Ok((steps[mid - 1] + steps[mid]) / 2.0)
        } else {
            Ok(steps[mid])
        }
    }

    /// Index of the sample nearest to `time` (earlier index wins on ties)
    pub fn nearest_index(&self, time: f64) -> usize {
        let n = self.timestamps.len();
        if n == 0 {
            return 0;
        }
        let insert = self.timestamps.partition_point(|&t| t < time);
        if insert == 0 {
            return 0;
        }
        if insert == n {
            return n - 1;
        }
        let before = (time - self.timestamps[insert - 1]).abs();
        let after = (self.timestamps[insert] - time).abs();
        if before <= after {
            insert - 1
        } else {
            insert
        }
    }

    /// Return a copy with the mean removed from the values.
    ///
    /// Both device readers deliver mean-centered data; this is kept here so
    /// synthetic inputs can be normalized the same way.
    pub fn mean_centered(&self) -> TimeSeries {
        if self.values.is_empty() {
            return self.clone();
        }
        let mean = self.values.iter().sum::<f64>() / self.values.len() as f64;
        TimeSeries {
            timestamps: self.timestamps.clone(),
            values: self.values.iter().map(|v| v - mean).collect(),
        }
    }

    /// Basic statistics over the values
    pub fn stats(&self) -> SeriesStats {
        SeriesStats::calculate(&self.values)
    }

    /// Decompose into (timestamps, values)
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.timestamps, self.values)
    }
}

/// Basic statistics for a series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesStats {
    pub mean: f64,
    pub rms: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub peak_to_peak: f64,
}

impl SeriesStats {
    pub fn calculate(data: &[f64]) -> Self {
        if data.is_empty() {
            return Self {
                mean: 0.0,
                rms: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                peak_to_peak: 0.0,
            };
        }

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let rms = (data.iter().map(|x| x * x).sum::<f64>() / n).sqrt();
        let std_dev = (data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();

        let min = data.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = data.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));

        Self {
            mean,
            rms,
            std_dev,
            min,
            max,
            peak_to_peak: max - min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_creation() {
        let series = TimeSeries::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.duration(), 2.0);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = TimeSeries::new(vec![0.0, 1.0], vec![1.0]);
        assert!(matches!(result, Err(RrError::InvalidSeries { .. })));
    }

    #[test]
    fn test_non_monotonic_rejected() {
        let result = TimeSeries::new(vec![0.0, 2.0, 1.0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(RrError::InvalidSeries { .. })));

        // Equal timestamps are also rejected
        let result = TimeSeries::new(vec![0.0, 1.0, 1.0], vec![1.0, 2.0, 3.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_nan_rejected() {
        let result = TimeSeries::new(vec![0.0, 1.0], vec![1.0, f64::NAN]);
        assert!(matches!(result, Err(RrError::InvalidSeries { .. })));
    }

    #[test]
    fn test_median_step() {
        // One dropout step of 5.0 among regular 1.0 steps
        let series =
            TimeSeries::new(vec![0.0, 1.0, 2.0, 3.0, 8.0], vec![0.0; 5]).unwrap();
        assert_eq!(series.median_step().unwrap(), 1.0);
    }

    #[test]
    fn test_nearest_index() {
        let series = TimeSeries::new(vec![0.0, 10.0, 20.0], vec![0.0; 3]).unwrap();
        assert_eq!(series.nearest_index(-3.0), 0);
        assert_eq!(series.nearest_index(4.0), 0);
        assert_eq!(series.nearest_index(5.0), 0); // earlier index wins on ties
        assert_eq!(series.nearest_index(6.0), 1);
        assert_eq!(series.nearest_index(25.0), 2);
    }

    #[test]
    fn test_mean_centering() {
        let series = TimeSeries::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap();
        let centered = series.mean_centered();
        assert!(centered.stats().mean.abs() < 1e-12);
    }

    #[test]
    fn test_uniform_constructor() {
        let series = TimeSeries::from_uniform(0.5, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.timestamps(), &[0.0, 0.5, 1.0]);
        assert!(TimeSeries::from_uniform(0.0, vec![1.0]).is_err());
    }
}
