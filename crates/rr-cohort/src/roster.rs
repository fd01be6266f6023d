//! Study roster and key enumeration
//!
//! Probands 3 and 10 are excluded from the evaluation (incomplete belt
//! recordings); proband 3 still appears in the sex table because the
//! exclusion happened after enrollment.

use rr_core::{FilterMethod, RecordingKey};

pub const PROBANDS: [u8; 8] = [1, 2, 4, 5, 6, 7, 8, 9];
pub const MALE_PROBANDS: [u8; 5] = [3, 5, 7, 8, 9];
pub const PACED_RATES: [u16; 2] = [10, 15];
pub const DISTANCES_M: [u8; 3] = [1, 2, 3];
pub const CAMERA_FPS: u16 = 15;

pub fn is_male(proband: u8) -> bool {
    MALE_PROBANDS.contains(&proband)
}

/// Every recording key of the study, in a stable order
pub fn cohort_keys(method: FilterMethod) -> Vec<RecordingKey> {
    let mut keys = Vec::with_capacity(PROBANDS.len() * PACED_RATES.len() * DISTANCES_M.len());
    for &paced_bpm in &PACED_RATES {
        for &distance_m in &DISTANCES_M {
            for &proband in &PROBANDS {
                keys.push(RecordingKey {
                    proband,
                    paced_bpm,
                    distance_m,
                    sampling_fps: CAMERA_FPS,
                    method,
                });
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cohort_size() {
        let keys = cohort_keys(FilterMethod::Median);
        assert_eq!(keys.len(), 48);
    }

    #[test]
    fn test_keys_are_unique() {
        let keys = cohort_keys(FilterMethod::Median);
        let unique: std::collections::HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn test_sex_classification() {
        assert!(is_male(5));
        assert!(is_male(9));
        assert!(!is_male(1));
        assert!(!is_male(4));
    }
}
