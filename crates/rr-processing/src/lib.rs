//! RR-Processing: temporal alignment and breathing-rate extraction
//!
//! Implements the per-recording comparison pipeline: resampling both
//! signals onto a common grid, discovering their relative time offset via
//! a sliding-window correlation search, cropping to a common interval, and
//! comparing the breathing rates extracted from each side.

pub mod align;
pub mod batch;
pub mod compare;
pub mod config;
pub mod correlation;
pub mod filters;
pub mod rate;
pub mod resample;

pub use align::{align, Alignment};
pub use batch::{run_batch, BatchReport, BatchSummary, PairOutcome};
pub use compare::{Comparator, PairResult};
pub use config::CompareConfig;
pub use correlation::{pearson, pearson_with_ci, Correlation};
pub use filters::{mean_filter, median_filter};
pub use rate::{breathing_rate, find_peaks};
pub use resample::resample;
