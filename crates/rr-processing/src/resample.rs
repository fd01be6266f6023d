//! Resampling of irregular device timestamps onto a uniform grid

use rr_core::{RrError, RrResult, TimeSeries};

/// Resample `series` onto a uniform grid at `freq` samples per second.
///
/// The input timestamps are shifted so the first sample sits at time zero,
/// then the values are linearly interpolated onto a grid of step
/// `time_scale / freq` covering the same span. The grid never extends past
/// the last input sample, so no extrapolation takes place.
pub fn resample(series: &TimeSeries, freq: f64, time_scale: f64) -> RrResult<TimeSeries> {
    if freq <= 0.0 {
        return Err(RrError::InvalidConfig {
            reason: format!("target frequency must be positive, got {}", freq),
        });
    }
    if series.len() < 2 {
        return Err(RrError::InsufficientData {
            stage: "resample",
            required: 2,
            actual: series.len(),
        });
    }

    let start = series.timestamps()[0];
    let span = series.duration();
    let step = time_scale / freq;

    let count = (span / step).floor() as usize;
    if count == 0 {
        return Err(RrError::InvalidSeries {
            reason: format!(
                "{}-sample series spans {:.3} time units, less than one {:.3}-unit step",
                series.len(),
                span,
                step
            ),
        });
    }

    let grid: Vec<f64> = (0..=count).map(|i| i as f64 * step).collect();
    let values = interp_linear(&grid, series.timestamps(), series.values(), start);

    TimeSeries::new(grid, values)
}

/// Linear interpolation of `(times - origin, values)` at the query points.
///
/// Query points must lie within the shifted input range, which `resample`
/// guarantees by flooring the grid length.
fn interp_linear(queries: &[f64], times: &[f64], values: &[f64], origin: f64) -> Vec<f64> {
    let n = times.len();
    let mut out = Vec::with_capacity(queries.len());
    let mut i = 0usize;

    for &q in queries {
        let t = q + origin;
        while i + 1 < n && times[i + 1] < t {
            i += 1;
        }
        if i + 1 >= n {
            out.push(values[n - 1]);
            continue;
        }
        let (t0, t1) = (times[i], times[i + 1]);
        let f = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0);
        out.push(values[i] + (values[i + 1] - values[i]) * f);
    }

    out
}
