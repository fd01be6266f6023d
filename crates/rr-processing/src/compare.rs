//! Per-recording comparison pipeline
//!
//! Ties the stages together for one camera/belt pair: resample both
//! signals to the camera frame rate, discover and correct the clock
//! offset, smooth the camera trace, extract both breathing rates and
//! score the agreement.

use crate::align::align;
use crate::config::CompareConfig;
use crate::correlation::pearson_with_ci;
use crate::filters::{mean_filter, median_filter};
use crate::rate::breathing_rate;
use crate::resample::resample;
use rr_core::{ComparisonMetrics, FilterMethod, RecordingKey, RecordingPair, RrResult};

/// Outcome of comparing one recording pair
#[derive(Debug, Clone)]
pub struct PairResult {
    pub key: RecordingKey,
    /// Clock offset recovered by the alignment search, in grid steps
    pub lag_steps: i64,
    /// Correlation at the winning alignment offset, before filtering
    pub peak_correlation: f64,
    pub metrics: ComparisonMetrics,
}

/// Validated pipeline runner; construct once, reuse across pairs.
#[derive(Debug, Clone)]
pub struct Comparator {
    config: CompareConfig,
}

impl Comparator {
    pub fn new(config: CompareConfig) -> RrResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Run the full pipeline on one pair.
    ///
    /// The belt signal is deliberately left unfiltered on both the rate
    /// and the correlation path; it serves as the reference the filtered
    /// camera signal is judged against.
    pub fn compare(&self, pair: &RecordingPair) -> RrResult<PairResult> {
        let cfg = &self.config;
        // The camera's native rate, recovered from its own timing rather
        // than trusted from the key; jittered steps round back to the
        // nominal fps.
        let freq = (cfg.time_scale / pair.camera.median_step()?).round();
        let step = cfg.time_scale / freq;

        let camera = resample(&pair.camera, freq, cfg.time_scale)?;
        let belt = resample(&pair.belt, freq, cfg.time_scale)?;

        let aligned = align(&camera, &belt, freq, cfg)?;

        let camera_values = match pair.key.method {
            FilterMethod::Median => median_filter(aligned.camera.values(), cfg.median_window),
            FilterMethod::Mean => mean_filter(aligned.camera.values(), cfg.median_window),
        };
        let belt_values = aligned.belt.values();

        let paced = f64::from(pair.key.paced_bpm);
        let camera_bpm = breathing_rate(&camera_values, step, cfg.time_scale, paced)?;
        let belt_bpm = breathing_rate(belt_values, step, cfg.time_scale, paced)?;

        let abs_error_bpm = (camera_bpm - belt_bpm).abs();
        let rel_error_pct = abs_error_bpm / belt_bpm * 100.0;

        let n = camera_values.len().min(belt_values.len());
        let corr = pearson_with_ci(&camera_values[..n], &belt_values[..n], cfg.alpha)?;

        Ok(PairResult {
            key: pair.key,
            lag_steps: aligned.lag_steps,
            peak_correlation: aligned.peak_correlation,
            metrics: ComparisonMetrics {
                correlation: corr.r,
                p_value: corr.p_value,
                ci_low: corr.ci_low,
                ci_high: corr.ci_high,
                camera_bpm,
                belt_bpm,
                abs_error_bpm,
                rel_error_pct,
            },
        })
    }
}
