//! Shared value types used across the solver and the kinematics integrator

pub mod units;

pub use units::{Celsius, Meters, Seconds, ThermalDiffusivity};
