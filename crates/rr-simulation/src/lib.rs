//! RR-Simulation: synthetic breathing recordings
//!
//! Generates camera-like and belt-like breathing traces with controllable
//! clock offset, timestamp jitter and noise, for testing and development
//! without access to the recording hardware.

pub mod breathing_simulator;
pub mod cohort;

pub use breathing_simulator::*;
pub use cohort::*;
