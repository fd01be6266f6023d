//! Rank and smoothing filters for the camera signal
//!
//! The belt signal is clean enough to use as-is; the camera trace carries
//! depth-estimation outliers that the peak picker would otherwise count as
//! breaths. Both filters use a reflected boundary so the output keeps the
//! input length.

/// Sliding median of `data` over a window of `window` samples.
///
/// For an even window the upper of the two middle elements is taken, so
/// the filter is a pure rank filter and never invents values. Windows of
/// size 0 or 1 pass the data through unchanged.
pub fn median_filter(data: &[f64], window: usize) -> Vec<f64> {
    rank_window(data, window, |buf| {
        buf.sort_by(|a, b| a.total_cmp(b));
        buf[buf.len() / 2]
    })
}

/// Sliding arithmetic mean of `data` over a window of `window` samples.
pub fn mean_filter(data: &[f64], window: usize) -> Vec<f64> {
    rank_window(data, window, |buf| {
        buf.iter().sum::<f64>() / buf.len() as f64
    })
}

fn rank_window(data: &[f64], window: usize, reduce: impl Fn(&mut [f64]) -> f64) -> Vec<f64> {
    if data.is_empty() || window <= 1 {
        return data.to_vec();
    }

    let n = data.len();
    let left = window / 2;
    let mut buf = vec![0.0; window];
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        for (k, slot) in buf.iter_mut().enumerate() {
            let idx = i as isize - left as isize + k as isize;
            *slot = data[reflect(idx, n)];
        }
        out.push(reduce(&mut buf));
    }

    out
}

/// Reflected boundary index: (d c b a | a b c d | d c b a)
fn reflect(mut idx: isize, n: usize) -> usize {
    let n = n as isize;
    loop {
        if idx < 0 {
            idx = -idx - 1;
        } else if idx >= n {
            idx = 2 * n - idx - 1;
        } else {
            return idx as usize;
        }
    }
}
