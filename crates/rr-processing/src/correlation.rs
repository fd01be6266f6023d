//! Pearson correlation with Fisher-transform confidence bounds

use rr_core::{RrError, RrResult};
use std::f64::consts::SQRT_2;

/// Correlation coefficient with significance and confidence interval
#[derive(Debug, Clone, Copy)]
pub struct Correlation {
    pub r: f64,
    pub p_value: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

/// Plain Pearson correlation coefficient of two equal-length windows.
///
/// Returns 0.0 when either window has zero variance, so the alignment
/// search can slide over flat segments without aborting.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    if x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (cov, var_x, var_y) =
        x.iter()
            .zip(y.iter())
            .fold((0.0, 0.0, 0.0), |(cov, vx, vy), (&xi, &yi)| {
                let dx = xi - mean_x;
                let dy = yi - mean_y;
                (cov + dx * dy, vx + dx * dx, vy + dy * dy)
            });

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

/// Pearson correlation with p-value and a two-sided confidence interval
/// at significance level `alpha`.
///
/// The interval comes from the Fisher transform: z = atanh(r) with
/// standard error 1/sqrt(n-3), bounds mapped back through tanh. The
/// p-value uses the same large-sample normal approximation.
pub fn pearson_with_ci(x: &[f64], y: &[f64], alpha: f64) -> RrResult<Correlation> {
    if x.len() != y.len() {
        return Err(RrError::InvalidSeries {
            reason: format!("length mismatch: {} vs {}", x.len(), y.len()),
        });
    }
    if x.len() <= 3 {
        return Err(RrError::InsufficientData {
            stage: "correlation",
            required: 4,
            actual: x.len(),
        });
    }
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(RrError::InvalidConfig {
            reason: format!("alpha must be in (0, 1), got {}", alpha),
        });
    }

    let r = pearson(x, y);
    if r == 0.0 && (constant(x) || constant(y)) {
        return Err(RrError::InvalidSeries {
            reason: "correlation undefined for constant input".to_string(),
        });
    }

    // atanh(±1) is ±inf; tanh maps the bounds back to ±1, which is the
    // degenerate interval we want for a perfect correlation.
    let z = r.atanh();
    let se = 1.0 / ((x.len() - 3) as f64).sqrt();

    let p_value = libm::erfc(z.abs() / se / SQRT_2);

    let zc = normal_quantile(1.0 - alpha / 2.0);
    let ci_low = (z - zc * se).tanh();
    let ci_high = (z + zc * se).tanh();

    Ok(Correlation {
        r,
        p_value,
        ci_low,
        ci_high,
    })
}

fn constant(data: &[f64]) -> bool {
    data.windows(2).all(|w| w[0] == w[1])
}

/// Quantile function of the standard normal distribution.
///
/// Peter Acklam's rational approximation, |relative error| < 1.15e-9 over
/// the open unit interval. `p` must lie strictly between 0 and 1.
pub fn normal_quantile(p: f64) -> f64 {
    debug_assert!(p > 0.0 && p < 1.0);

    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];

    const P_LOW: f64 = 0.02425;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}
