//! Breathing signal simulator with device-like timing imperfections

use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rr_core::{RrError, RrResult, TimeSeries};
use serde::{Deserialize, Serialize};

/// Configuration for one simulated breathing recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    /// Paced breathing rate in breaths per minute
    pub paced_bpm: f64,
    /// Nominal sampling rate in Hz
    pub sampling_rate: f64,
    /// Recording length in seconds
    pub duration_secs: f64,
    /// Clock offset of this device against the session start, in seconds
    pub start_offset_secs: f64,
    /// Breathing amplitude in signal units
    pub amplitude: f64,
    /// Uniform timestamp jitter bound in milliseconds; must stay below
    /// half the sampling step so timestamps remain strictly increasing
    pub timestamp_jitter_ms: f64,
    /// Noise configuration
    pub noise: NoiseConfig,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

/// Noise components of a simulated recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Gaussian noise standard deviation (0.0 = no noise)
    pub gaussian_std: f64,
    /// Baseline wander amplitude
    pub baseline_wander: f64,
    /// Depth-estimation dropout probability (0.0 to 1.0)
    pub artifact_prob: f64,
    /// Dropout spike amplitude
    pub artifact_amp: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            gaussian_std: 0.02,
            baseline_wander: 0.05,
            artifact_prob: 0.005,
            artifact_amp: 1.5,
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            paced_bpm: 15.0,
            sampling_rate: 15.0,
            duration_secs: 70.0,
            start_offset_secs: 0.0,
            amplitude: 1.0,
            timestamp_jitter_ms: 0.0,
            noise: NoiseConfig::default(),
            seed: None,
        }
    }
}

impl BreathingConfig {
    pub fn validate(&self) -> RrResult<()> {
        if !(self.paced_bpm > 0.0) {
            return Err(RrError::InvalidConfig {
                reason: format!("paced rate must be positive, got {} bpm", self.paced_bpm),
            });
        }
        if !(self.sampling_rate > 0.0) {
            return Err(RrError::InvalidConfig {
                reason: format!("sampling rate must be positive, got {} Hz", self.sampling_rate),
            });
        }
        if !(self.duration_secs > 0.0) {
            return Err(RrError::InvalidConfig {
                reason: format!("duration must be positive, got {}s", self.duration_secs),
            });
        }
        let half_step = 500.0 / self.sampling_rate;
        if self.timestamp_jitter_ms < 0.0 || self.timestamp_jitter_ms >= half_step {
            return Err(RrError::InvalidConfig {
                reason: format!(
                    "timestamp jitter {} ms must lie in [0, {}) at {} Hz",
                    self.timestamp_jitter_ms, half_step, self.sampling_rate
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.noise.artifact_prob) {
            return Err(RrError::InvalidConfig {
                reason: format!(
                    "artifact probability must be in [0, 1], got {}",
                    self.noise.artifact_prob
                ),
            });
        }
        Ok(())
    }
}

/// Breathing signal simulator
pub struct BreathingSimulator {
    config: BreathingConfig,
    rng: rand::rngs::StdRng,
    normal_dist: Normal<f64>,
}

impl BreathingSimulator {
    pub fn new(config: BreathingConfig) -> RrResult<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

        let rng = rand::rngs::StdRng::seed_from_u64(seed);
        let normal_dist = Normal::new(0.0, config.noise.gaussian_std).map_err(|e| {
            RrError::InvalidConfig {
                reason: format!("gaussian noise level rejected: {}", e),
            }
        })?;

        Ok(BreathingSimulator {
            config,
            rng,
            normal_dist,
        })
    }

    /// Generate the full recording as millisecond-stamped samples.
    ///
    /// The waveform carries a slow amplitude modulation on top of the paced
    /// sinusoid, as real breathing does; it also keeps the offset search
    /// from locking onto the wrong breath.
    pub fn generate(&mut self) -> RrResult<TimeSeries> {
        let cfg = &self.config;
        let n = (cfg.duration_secs * cfg.sampling_rate) as usize;
        let step = 1000.0 / cfg.sampling_rate;
        let offset = cfg.start_offset_secs * 1000.0;
        let breath_hz = cfg.paced_bpm / 60.0;

        let mut timestamps = Vec::with_capacity(n);
        let mut values = Vec::with_capacity(n);

        let jitter = cfg.timestamp_jitter_ms;
        for i in 0..n {
            let mut t = offset + i as f64 * step;
            if jitter > 0.0 {
                t += self.rng.gen_range(-jitter..jitter);
            }
            timestamps.push(t);
            values.push(self.sample_at(t, breath_hz));
        }

        // Device readers deliver mean-centered data; match that here
        Ok(TimeSeries::new(timestamps, values)?.mean_centered())
    }

    fn sample_at(&mut self, t_ms: f64, breath_hz: f64) -> f64 {
        let t = t_ms / 1000.0;
        let cfg = &self.config;

        let envelope = 1.0 + 0.2 * (2.0 * std::f64::consts::PI * 0.03 * t).sin();
        let mut value =
            cfg.amplitude * envelope * (2.0 * std::f64::consts::PI * breath_hz * t).sin();

        value += cfg.noise.baseline_wander * (2.0 * std::f64::consts::PI * 0.05 * t).sin();
        value += self.normal_dist.sample(&mut self.rng);

        if self.rng.gen::<f64>() < cfg.noise.artifact_prob {
            value += cfg.noise.artifact_amp * self.rng.gen_range(-1.0..1.0);
        }

        value
    }

    pub fn config(&self) -> &BreathingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config(seed: u64) -> BreathingConfig {
        BreathingConfig {
            noise: NoiseConfig {
                gaussian_std: 0.0,
                baseline_wander: 0.0,
                artifact_prob: 0.0,
                artifact_amp: 0.0,
            },
            seed: Some(seed),
            ..BreathingConfig::default()
        }
    }

    #[test]
    fn test_generated_length_matches_duration() {
        let mut sim = BreathingSimulator::new(quiet_config(1)).unwrap();
        let series = sim.generate().unwrap();
        assert_eq!(series.len(), (70.0 * 15.0) as usize);
        assert_eq!(series.timestamps()[0], 0.0);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let mut config = BreathingConfig::default();
        config.seed = Some(42);
        config.timestamp_jitter_ms = 5.0;

        let a = BreathingSimulator::new(config.clone()).unwrap().generate().unwrap();
        let b = BreathingSimulator::new(config).unwrap().generate().unwrap();
        assert_eq!(a.timestamps(), b.timestamps());
        assert_eq!(a.values(), b.values());
    }

    #[test]
    fn test_jittered_timestamps_stay_increasing() {
        let mut config = quiet_config(7);
        config.timestamp_jitter_ms = 30.0;

        let mut sim = BreathingSimulator::new(config).unwrap();
        // TimeSeries::new enforces strict monotonicity, so generation
        // succeeding is the assertion
        let series = sim.generate().unwrap();
        assert!(series.len() > 0);
    }

    #[test]
    fn test_start_offset_shifts_timestamps() {
        let mut config = quiet_config(3);
        config.start_offset_secs = 0.5;

        let series = BreathingSimulator::new(config).unwrap().generate().unwrap();
        assert_eq!(series.timestamps()[0], 500.0);
    }

    #[test]
    fn test_excessive_jitter_rejected() {
        let mut config = BreathingConfig::default();
        // Half step at 15 Hz is 33.3 ms
        config.timestamp_jitter_ms = 40.0;
        assert!(matches!(
            BreathingSimulator::new(config),
            Err(RrError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_amplitude_bounds_respected() {
        let mut config = quiet_config(11);
        config.amplitude = 2.0;

        let series = BreathingSimulator::new(config).unwrap().generate().unwrap();
        let stats = series.stats();
        assert!(stats.mean.abs() < 1e-9);
        // Envelope peaks at 1.2x amplitude, plus a little slack for the
        // mean removal
        assert!(stats.max <= 2.45);
        assert!(stats.min >= -2.45);
        assert!(stats.std_dev > 0.5);
    }
}
