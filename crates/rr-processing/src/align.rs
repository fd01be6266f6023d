//! Temporal alignment of two uniformly resampled signals
//!
//! The camera and belt recordings start and stop at different real times
//! and carry unsynchronized clocks. Both series arrive here on grids of
//! identical step size; the relative offset is discovered by sliding the
//! longer series across the guard-cropped shorter one, one grid step at a
//! time, and maximizing the Pearson correlation of the overlap.

use crate::config::CompareConfig;
use crate::correlation::pearson;
use rr_core::{RrError, RrResult, TimeSeries};

/// Offset-corrected, equal-origin, ceiling-cropped pair of series
#[derive(Debug, Clone)]
pub struct Alignment {
    pub camera: TimeSeries,
    pub belt: TimeSeries,
    /// Recovered lag of the shorter series in grid steps. Zero for a pair
    /// that was already aligned.
    pub lag_steps: i64,
    /// Correlation coefficient at the winning offset
    pub peak_correlation: f64,
}

/// Align `camera` and `belt`, both uniformly stepped at `freq` samples
/// per second and starting at time zero.
///
/// The guard window (`config.guard_secs` per end) is excluded from the
/// search to avoid edge artifacts; the winning offset is the first index
/// with maximal correlation. Afterwards both series are re-anchored to the
/// later-starting one (nearest-sample crop, no interpolation) and cropped
/// to the common comparison ceiling so every recording contributes an
/// equal-duration segment to the statistics.
pub fn align(
    camera: &TimeSeries,
    belt: &TimeSeries,
    freq: f64,
    config: &CompareConfig,
) -> RrResult<Alignment> {
    let step = config.time_scale / freq;
    let crop = (config.guard_secs * config.time_scale / step).ceil() as usize;

    let camera_is_short = camera.len() <= belt.len();
    let (short, long) = if camera_is_short {
        (camera, belt)
    } else {
        (belt, camera)
    };
    let delta = long.len() - short.len();

    // The guard-cropped window must leave enough samples for a meaningful
    // correlation at every slide position.
    if short.len() < 2 * crop + 4 {
        return Err(RrError::AlignmentFailed {
            reason: format!(
                "overlap of {} samples is shorter than the {}-sample search window",
                short.len(),
                2 * crop + 4
            ),
        });
    }

    let window = &short.values()[crop..short.len() - crop];

    let mut best_idx = 0usize;
    let mut best_r = f64::NEG_INFINITY;
    for i in 0..=(delta + 2 * crop) {
        let candidate = &long.values()[i..i + window.len()];
        let r = pearson(candidate, window);
        // Strict comparison keeps the first occurrence on ties
        if r > best_r {
            best_r = r;
            best_idx = i;
        }
    }

    // Shift the shorter series so its guard-boundary sample lands on the
    // longer series' winning sample.
    let shift = long.timestamps()[best_idx] - short.timestamps()[crop];
    let lag_steps = best_idx as i64 - crop as i64;

    let mut ts_cam = camera.timestamps().to_vec();
    let val_cam = camera.values().to_vec();
    let mut ts_belt = belt.timestamps().to_vec();
    let val_belt = belt.values().to_vec();

    if camera_is_short {
        for t in &mut ts_cam {
            *t += shift;
        }
    } else {
        for t in &mut ts_belt {
            *t += shift;
        }
    }

    let shifted_cam = TimeSeries::new(ts_cam, val_cam)?;
    let shifted_belt = TimeSeries::new(ts_belt, val_belt)?;

    // Re-anchor both series to the later-starting one; the earlier series
    // loses its samples before the anchor (nearest sample, no
    // interpolation)
    let limit = config.ceiling_secs * config.time_scale + step;
    let (camera, belt) = if shifted_cam.timestamps()[0] < shifted_belt.timestamps()[0] {
        let anchor = shifted_belt.timestamps()[0];
        let idx = shifted_cam.nearest_index(anchor);
        (
            rezero(shifted_cam, idx, anchor, limit)?,
            rezero(shifted_belt, 0, anchor, limit)?,
        )
    } else {
        let anchor = shifted_cam.timestamps()[0];
        let idx = shifted_belt.nearest_index(anchor);
        (
            rezero(shifted_cam, 0, anchor, limit)?,
            rezero(shifted_belt, idx, anchor, limit)?,
        )
    };

    Ok(Alignment {
        camera,
        belt,
        lag_steps,
        peak_correlation: best_r,
    })
}

/// Drop the first `skip` samples, re-zero timestamps against `anchor` and
/// crop to the comparison window.
fn rezero(series: TimeSeries, skip: usize, anchor: f64, limit: f64) -> RrResult<TimeSeries> {
    let (timestamps, values) = series.into_parts();
    let mut timestamps: Vec<f64> = timestamps[skip..]
        .iter()
        .map(|t| round6(t - anchor))
        .collect();
    let mut values = values[skip..].to_vec();

    let keep = timestamps.partition_point(|&t| t <= limit);
    timestamps.truncate(keep);
    values.truncate(keep);

    TimeSeries::new(timestamps, values)
}

fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}
