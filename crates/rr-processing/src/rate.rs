//! Breathing-rate extraction via peak picking
//!
//! The rate is derived from the mean interval between inhalation peaks
//! rather than from a spectral estimate, which keeps it honest for short
//! recordings where a single FFT bin would span several breaths per
//! minute.

use rr_core::{RrError, RrResult};

/// Indices of local maxima separated by at least `min_distance` samples.
///
/// Plateaus report their midpoint. When two candidate peaks violate the
/// distance constraint the higher one survives; equal heights keep the
/// earlier index.
pub fn find_peaks(data: &[f64], min_distance: usize) -> Vec<usize> {
    let n = data.len();
    let mut candidates = Vec::new();

    let mut i = 1usize;
    while i + 1 < n {
        if data[i] > data[i - 1] {
            // Walk over a possible plateau
            let mut j = i;
            while j + 1 < n && data[j + 1] == data[i] {
                j += 1;
            }
            if j + 1 < n && data[j + 1] < data[i] {
                candidates.push((i + j) / 2);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }

    if min_distance <= 1 || candidates.len() < 2 {
        return candidates;
    }

    // Greedy selection from the highest peak down
    let mut order = candidates.clone();
    order.sort_by(|&a, &b| data[b].total_cmp(&data[a]).then(a.cmp(&b)));

    let mut kept: Vec<usize> = Vec::with_capacity(order.len());
    for idx in order {
        if kept
            .iter()
            .all(|&k| idx.abs_diff(k) >= min_distance)
        {
            kept.push(idx);
        }
    }

    kept.sort_unstable();
    kept
}

/// Breathing rate in breaths per minute from a uniformly sampled signal.
///
/// `step` is the grid step in timestamp units and `paced_bpm` the rate the
/// proband was instructed to breathe at; it only sets the minimum peak
/// distance (80% of the expected breath period) and does not bias the
/// estimate itself.
pub fn breathing_rate(
    values: &[f64],
    step: f64,
    time_scale: f64,
    paced_bpm: f64,
) -> RrResult<f64> {
    if !(paced_bpm > 0.0) || !(step > 0.0) {
        return Err(RrError::InvalidConfig {
            reason: format!(
                "paced rate and grid step must be positive, got {} bpm at step {}",
                paced_bpm, step
            ),
        });
    }

    let samples_per_breath = (60.0 * time_scale / paced_bpm / step).round();
    let min_distance = ((0.8 * samples_per_breath).round() as usize).max(1);

    let peaks = find_peaks(values, min_distance);
    if peaks.len() < 2 {
        return Err(RrError::InsufficientPeaks { found: peaks.len() });
    }

    let gaps = peaks.len() - 1;
    let mean_gap = peaks
        .windows(2)
        .map(|w| (w[1] - w[0]) as f64)
        .sum::<f64>()
        / gaps as f64;

    Ok(60.0 * time_scale / (mean_gap * step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_find_peaks_simple() {
        let data = vec![0.0, 1.0, 0.0, 2.0, 0.0, 3.0, 0.0];
        assert_eq!(find_peaks(&data, 1), vec![1, 3, 5]);
    }

    #[test]
    fn test_plateau_reports_midpoint() {
        let data = vec![0.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(find_peaks(&data, 1), vec![2]);
    }

    #[test]
    fn test_distance_keeps_higher_peak() {
        let data = vec![0.0, 1.0, 0.5, 3.0, 0.0];
        assert_eq!(find_peaks(&data, 4), vec![3]);
    }

    #[test]
    fn test_endpoints_are_not_peaks() {
        let data = vec![5.0, 1.0, 2.0, 1.0, 6.0];
        assert_eq!(find_peaks(&data, 1), vec![2]);
    }

    #[test]
    fn test_rate_of_paced_sine() {
        // 15 breaths per minute sampled at 15 fps for 60 seconds
        let step = 1000.0 / 15.0;
        let values: Vec<f64> = (0..900)
            .map(|i| (2.0 * PI * 0.25 * i as f64 * step / 1000.0).sin())
            .collect();

        let bpm = breathing_rate(&values, step, 1000.0, 15.0).unwrap();
        assert!((bpm - 15.0).abs() < 0.2, "got {} bpm", bpm);
    }

    #[test]
    fn test_rate_of_slow_sine() {
        // 10 breaths per minute at 10 fps
        let step = 100.0;
        let values: Vec<f64> = (0..700)
            .map(|i| (2.0 * PI / 6.0 * i as f64 * step / 1000.0).sin())
            .collect();

        let bpm = breathing_rate(&values, step, 1000.0, 10.0).unwrap();
        assert!((bpm - 10.0).abs() < 0.2, "got {} bpm", bpm);
    }

    #[test]
    fn test_two_peaks_are_enough_for_a_rate() {
        // Peaks 10 samples apart at 100 ms step, one breath per second
        let mut values = vec![0.0; 13];
        values[1] = 1.0;
        values[11] = 1.0;

        let bpm = breathing_rate(&values, 100.0, 1000.0, 60.0).unwrap();
        assert!((bpm - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_peak_is_rejected() {
        let mut values = vec![0.0; 20];
        values[9] = 1.0;

        let result = breathing_rate(&values, 100.0, 1000.0, 60.0);
        assert!(matches!(result, Err(RrError::InsufficientPeaks { found: 1 })));
    }

    #[test]
    fn test_flat_signal_has_no_peaks() {
        let values = vec![1.0; 600];
        let result = breathing_rate(&values, 66.67, 1000.0, 15.0);
        assert!(matches!(result, Err(RrError::InsufficientPeaks { found: 0 })));
    }
}
