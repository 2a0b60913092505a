//! Recovery simulation and estimation.
//!
//! `simulator` turns a patient identifier into a 7-day recovery curve;
//! `estimator` turns that curve into the narrative a doctor starts editing from.

pub mod estimator;
pub mod simulator;

pub use estimator::{assess, estimate, RecoveryEstimate};
pub use simulator::{daily_increments, seed_for, simulate, simulate_for};
