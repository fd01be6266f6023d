//! RR-Core: Foundation types for respiration-rate comparison
//!
//! Core containers and identity types shared by the resampling, alignment
//! and rate-extraction stages.

pub mod error;
pub mod recording;
pub mod time_series;

pub use error::{RrError, RrResult};
pub use recording::*;
pub use time_series::*;
