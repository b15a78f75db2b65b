//! Radial Heat Conduction Core Library
//!
//! Explicit finite-difference solver for transient heat conduction in a slab,
//! cylinder or sphere, plus a small free-fall integrator.
//!
//! ## Conduction
//!
//! - [`SimulationConfig`] fixes every parameter before the run starts
//! - [`ThermalDiffusionStepper`] owns the temperature field and advances it
//!   with forward Euler, holding the surface temperature fixed and mirroring
//!   the centre rate
//! - [`ConductionRun`] drives the stepper and hands field copies to a
//!   [`SnapshotSink`] at a fixed cadence
//!
//! ## Kinematics
//!
//! - [`FreeFall`] yields the `(t, x, v)` series of a falling body until it
//!   passes the ground

// Core types and utilities
pub mod core_types;

pub mod kinematics;
pub mod simulation;
pub mod solver;

// Re-export core types
pub use core_types::{Celsius, Meters, Seconds, ThermalDiffusivity};

pub use kinematics::{FallState, FreeFall, FreeFallError, STANDARD_GRAVITY};
pub use simulation::{
    run_simulation, ConductionRun, FnSink, RunSummary, Snapshot, SnapshotRecorder, SnapshotSink,
    TracingSink,
};
pub use solver::{
    compute_time_derivative, ConfigError, Geometry, PhysicalInputs, SimulationConfig, SpatialGrid,
    TemperatureField, ThermalDiffusionStepper,
};
