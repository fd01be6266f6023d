//! Batch execution over a set of recordings
//!
//! A failed pair must not abort the rest of the cohort; every outcome is
//! recorded and the failures stay inspectable next to the completed
//! results.

use crate::compare::{Comparator, PairResult};
use rr_core::{RecordingKey, RecordingSource, RrError, RrResult};

/// One processed recording, completed or failed
#[derive(Debug)]
pub struct PairOutcome {
    pub key: RecordingKey,
    pub result: RrResult<PairResult>,
}

/// Aggregate medians over a set of completed pairs
#[derive(Debug, Clone, Copy)]
pub struct BatchSummary {
    pub pairs: usize,
    pub median_correlation: f64,
    pub median_abs_error_bpm: f64,
    pub median_rel_error_pct: f64,
}

/// Results of one batch run, in input order
#[derive(Debug)]
pub struct BatchReport {
    outcomes: Vec<PairOutcome>,
}

/// Load and compare every key from `source`, collecting all outcomes.
pub fn run_batch(
    source: &dyn RecordingSource,
    keys: &[RecordingKey],
    comparator: &Comparator,
) -> BatchReport {
    let outcomes = keys
        .iter()
        .map(|&key| PairOutcome {
            key,
            result: source
                .load_pair(&key)
                .and_then(|pair| comparator.compare(&pair)),
        })
        .collect();

    BatchReport { outcomes }
}

impl BatchReport {
    /// Assemble a report from outcomes produced elsewhere, e.g. by a
    /// worker pool.
    pub fn from_outcomes(outcomes: Vec<PairOutcome>) -> Self {
        BatchReport { outcomes }
    }

    pub fn outcomes(&self) -> &[PairOutcome] {
        &self.outcomes
    }

    pub fn completed(&self) -> impl Iterator<Item = &PairResult> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&RecordingKey, &RrError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.key, e)))
    }

    /// Median summary over all completed pairs, `None` when nothing completed.
    pub fn summary(&self) -> Option<BatchSummary> {
        self.summary_where(|_| true)
    }

    /// Median summary over the completed pairs whose key matches `pred`.
    ///
    /// Cohort-level groupings (by distance, paced rate, proband subset)
    /// are expressed as predicates over the key.
    pub fn summary_where(&self, pred: impl Fn(&RecordingKey) -> bool) -> Option<BatchSummary> {
        let selected: Vec<&PairResult> = self.completed().filter(|r| pred(&r.key)).collect();
        if selected.is_empty() {
            return None;
        }

        let collect =
            |f: fn(&PairResult) -> f64| -> Vec<f64> { selected.iter().map(|&r| f(r)).collect() };

        Some(BatchSummary {
            pairs: selected.len(),
            median_correlation: median(collect(|r| r.metrics.correlation)),
            median_abs_error_bpm: median(collect(|r| r.metrics.abs_error_bpm)),
            median_rel_error_pct: median(collect(|r| r.metrics.rel_error_pct)),
        })
    }
}

/// Median with the usual midpoint average for even counts
fn median(mut data: Vec<f64>) -> f64 {
    data.sort_by(|a, b| a.total_cmp(b));
    let n = data.len();
    if n % 2 == 1 {
        data[n / 2]
    } else {
        (data[n / 2 - 1] + data[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompareConfig;
    use rr_core::{FilterMethod, RecordingPair, TimeSeries};
    use std::f64::consts::PI;

    struct SyntheticSource;

    impl RecordingSource for SyntheticSource {
        fn load_pair(&self, key: &RecordingKey) -> RrResult<RecordingPair> {
            if key.proband == 3 {
                return Err(RrError::InvalidSeries {
                    reason: format!("no recording on disk for {}", key),
                });
            }

            let rate_hz = f64::from(key.paced_bpm) / 60.0;
            let wave = move |t_ms: f64| {
                let t = t_ms / 1000.0;
                (1.0 + 0.3 * (2.0 * PI * 0.02 * t).sin()) * (2.0 * PI * rate_hz * t).sin()
            };

            let fps = f64::from(key.sampling_fps);
            let offset = f64::from(key.proband) * 120.0;
            let n_cam = (70.0 * fps) as usize;
            let cam_ts: Vec<f64> = (0..n_cam)
                .map(|i| offset + i as f64 * 1000.0 / fps)
                .collect();
            let cam_vals: Vec<f64> = cam_ts.iter().map(|&t| wave(t)).collect();

            let n_belt = 720usize;
            let belt_ts: Vec<f64> = (0..n_belt).map(|i| i as f64 * 100.0).collect();
            let belt_vals: Vec<f64> = belt_ts.iter().map(|&t| wave(t)).collect();

            Ok(RecordingPair::new(
                *key,
                TimeSeries::new(cam_ts, cam_vals)?,
                TimeSeries::new(belt_ts, belt_vals)?,
            ))
        }
    }

    fn key(proband: u8, paced_bpm: u16) -> RecordingKey {
        RecordingKey {
            proband,
            paced_bpm,
            distance_m: 1,
            sampling_fps: 15,
            method: FilterMethod::Median,
        }
    }

    fn report() -> BatchReport {
        let keys = vec![key(1, 15), key(2, 15), key(3, 15), key(4, 10)];
        let comparator = Comparator::new(CompareConfig::default()).unwrap();
        run_batch(&SyntheticSource, &keys, &comparator)
    }

    #[test]
    fn test_failures_do_not_abort_the_batch() {
        let report = report();
        assert_eq!(report.outcomes().len(), 4);
        assert_eq!(report.completed().count(), 3);

        let failures: Vec<_> = report.failed().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0.proband, 3);
    }

    #[test]
    fn test_summary_covers_completed_pairs() {
        let summary = report().summary().unwrap();
        assert_eq!(summary.pairs, 3);
        assert!(summary.median_correlation > 0.9);
        assert!(summary.median_abs_error_bpm < 1.0);
    }

    #[test]
    fn test_summary_where_filters_by_key() {
        let report = report();
        let slow = report.summary_where(|k| k.paced_bpm == 10).unwrap();
        assert_eq!(slow.pairs, 1);
        assert!(report.summary_where(|k| k.distance_m == 3).is_none());
    }

    #[test]
    fn test_median_midpoint_for_even_counts() {
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(vec![5.0, 1.0, 3.0]), 3.0);
    }
}
