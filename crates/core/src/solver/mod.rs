//! Radial heat conduction solver module
//!
//! Explicit (forward-Euler) integration of the one-dimensional heat equation
//! in slab, cylindrical or spherical coordinates.
//!
//! # Layout
//!
//! - [`SimulationConfig`]: immutable run parameters, optionally derived from
//!   [`PhysicalInputs`]
//! - [`TemperatureField`] / [`SpatialGrid`]: the per-shell state and radii
//! - [`compute_time_derivative`]: the pure finite-difference kernel
//! - [`ThermalDiffusionStepper`]: owns the field and advances it
//!
//! # Example
//!
//! ```rust
//! use radial_heat_core::solver::{PhysicalInputs, SimulationConfig, ThermalDiffusionStepper};
//!
//! let config = SimulationConfig::from_inputs(&PhysicalInputs::default()).unwrap();
//! let mut stepper = ThermalDiffusionStepper::new(config).unwrap();
//! stepper.step();
//! assert_eq!(stepper.iteration(), 1);
//! ```

mod config;
mod fields;
mod heat_transfer;
mod stepper;

// Re-exports
pub use config::{ConfigError, Geometry, PhysicalInputs, SimulationConfig, STABILITY_LIMIT};
pub use fields::{SpatialGrid, TemperatureField};
pub use heat_transfer::{
    apply_forward_euler, compute_time_derivative, time_derivative_into, HeatTransferParams,
};
pub use stepper::ThermalDiffusionStepper;
