//! Run configuration for the radial conduction solver
//!
//! A [`SimulationConfig`] is the immutable set of scalars the stepper needs:
//! diffusivity, temperatures, domain extent, geometry exponent, grid and time
//! steps, step count and snapshot cadence. It is either built explicitly with
//! [`SimulationConfig::new`] or derived from a handful of physical inputs with
//! [`SimulationConfig::from_inputs`], which applies the time scaling of the
//! reference 4 cm slab scenario.

use crate::core_types::{Celsius, Meters, Seconds, ThermalDiffusivity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-extent the time scaling is normalised against (m)
const REFERENCE_HALF_EXTENT: f64 = 0.005;

/// Total simulated time per unit of `(rmax / 0.005)²` (s)
const TOTAL_TIME_FACTOR: f64 = 100.0 * 1.5;

/// Time step per unit of `(rmax / 0.005)²` (s)
const TIME_STEP_FACTOR: f64 = 0.01;

/// Explicit-scheme stability limit for the slab case
pub const STABILITY_LIMIT: f64 = 0.5;

/// Shape of the conducting body, selecting the curvature term of the Laplacian
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Geometry {
    /// Infinite slab, no curvature correction
    Slab,
    /// Infinite cylinder, radial coordinate
    Cylinder,
    /// Sphere, radial coordinate
    Sphere,
}

impl Geometry {
    /// Exponent multiplying the first-derivative term (0, 1 or 2)
    #[must_use]
    pub const fn a_factor(self) -> f64 {
        match self {
            Self::Slab => 0.0,
            Self::Cylinder => 1.0,
            Self::Sphere => 2.0,
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slab => write!(f, "slab"),
            Self::Cylinder => write!(f, "cylinder"),
            Self::Sphere => write!(f, "sphere"),
        }
    }
}

/// Errors raised while validating a run configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Fewer than two radial cells; the stencil needs an interior and a boundary cell
    DomainTooSmall {
        /// Number of cells `trunc(rmax / delta_r)` produced
        nr: usize,
    },
    /// A parameter that sizes the run is non-finite or out of range
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DomainTooSmall { nr } => {
                write!(f, "Domain too small: {nr} radial cell(s), at least 2 required")
            }
            ConfigError::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{name}': {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Immutable parameters of one conduction run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationConfig {
    kappa: f64,
    temp_init: f64,
    temp_boundary: f64,
    rmax: f64,
    a_factor: f64,
    delta_r: f64,
    delta_t: f64,
    nstep: usize,
    plot_intvl: usize,
}

impl SimulationConfig {
    /// Build a configuration from explicit scalars
    ///
    /// `kappa`, `delta_t` and the temperatures are taken as given, so
    /// parameters outside the stability bound still produce a runnable
    /// (diverging) configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if `rmax` or `delta_r` is not a
    /// finite positive number, or if `plot_intvl` is zero.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kappa: f64,
        temp_init: f64,
        temp_boundary: f64,
        rmax: f64,
        a_factor: f64,
        delta_r: f64,
        delta_t: f64,
        nstep: usize,
        plot_intvl: usize,
    ) -> Result<Self, ConfigError> {
        ensure_positive("rmax", rmax)?;
        ensure_positive("delta_r", delta_r)?;
        if plot_intvl == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "plot_intvl",
                value: 0.0,
            });
        }

        Ok(Self {
            kappa,
            temp_init,
            temp_boundary,
            rmax,
            a_factor,
            delta_r,
            delta_t,
            nstep,
            plot_intvl,
        })
    }

    /// Derive a configuration from physical inputs
    ///
    /// ```text
    /// scale   = (rmax / 0.005)²
    /// delta_t = 0.01 * scale
    /// nstep   = trunc(150 * scale / delta_t)
    /// delta_r = rmax / radial_cells
    /// ```
    ///
    /// # Errors
    ///
    /// Same conditions as [`SimulationConfig::new`].
    pub fn from_inputs(inputs: &PhysicalInputs) -> Result<Self, ConfigError> {
        let rmax = inputs.half_extent.value();
        let scale = (rmax / REFERENCE_HALF_EXTENT).powi(2);
        let tmax = TOTAL_TIME_FACTOR * scale;
        let delta_t = TIME_STEP_FACTOR * scale;
        let delta_r = rmax / f64::from(inputs.radial_cells);
        let nstep = (tmax / delta_t) as usize;

        Self::new(
            inputs.diffusivity.value(),
            inputs.temp_init.value(),
            inputs.temp_boundary.value(),
            rmax,
            inputs.geometry.a_factor(),
            delta_r,
            delta_t,
            nstep,
            inputs.plot_intvl,
        )
    }

    /// Thermal diffusivity (m²/s)
    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    /// Initial temperature of every cell
    pub fn temp_init(&self) -> f64 {
        self.temp_init
    }

    /// Temperature held at the outer boundary
    pub fn temp_boundary(&self) -> f64 {
        self.temp_boundary
    }

    /// Domain half-extent (m)
    pub fn rmax(&self) -> f64 {
        self.rmax
    }

    /// Curvature exponent: 0 slab, 1 cylinder, 2 sphere
    pub fn a_factor(&self) -> f64 {
        self.a_factor
    }

    /// Radial cell width (m)
    pub fn delta_r(&self) -> f64 {
        self.delta_r
    }

    /// Time step (s)
    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// Number of time steps in the run
    pub fn nstep(&self) -> usize {
        self.nstep
    }

    /// Snapshot cadence in steps
    pub fn plot_intvl(&self) -> usize {
        self.plot_intvl
    }

    /// Number of radial cells, `trunc(rmax / delta_r)`
    pub fn nr(&self) -> usize {
        (self.rmax / self.delta_r) as usize
    }

    /// Mesh Fourier number `kappa * delta_t / delta_r²`
    ///
    /// The explicit slab scheme is stable for values up to [`STABILITY_LIMIT`].
    pub fn stability_number(&self) -> f64 {
        self.kappa * self.delta_t / (self.delta_r * self.delta_r)
    }

    /// Whether the slab stability bound holds
    pub fn is_stable(&self) -> bool {
        self.stability_number() <= STABILITY_LIMIT
    }

    /// Simulated time at the start of `iteration`
    pub fn elapsed_time(&self, iteration: usize) -> Seconds {
        Seconds::new(iteration as f64 * self.delta_t)
    }

    /// Simulated time covered by the whole run
    pub fn total_time(&self) -> Seconds {
        self.elapsed_time(self.nstep)
    }

    /// Number of snapshots a full run emits
    pub fn snapshot_count(&self) -> usize {
        if self.nstep == 0 {
            1
        } else {
            (self.nstep - 1) / self.plot_intvl + 1
        }
    }

    /// Whether a snapshot is due before advancing `iteration`
    pub fn is_snapshot_iteration(&self, iteration: usize) -> bool {
        iteration % self.plot_intvl == 0
    }
}

fn ensure_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

/// Physical description of a conduction scenario
///
/// The defaults describe a 4 cm thick slab of beef (diffusivity 1.1e-7 m²/s)
/// at 10 °C dropped into 100 °C water, resolved with 25 cells and a snapshot
/// every 200 steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalInputs {
    /// Thermal diffusivity of the body
    pub diffusivity: ThermalDiffusivity,
    /// Uniform starting temperature
    pub temp_init: Celsius,
    /// Fixed surface temperature
    pub temp_boundary: Celsius,
    /// Distance from the centre to the surface
    pub half_extent: Meters,
    /// Body shape
    pub geometry: Geometry,
    /// Cells across the half-extent
    pub radial_cells: u32,
    /// Snapshot cadence in steps
    pub plot_intvl: usize,
}

impl Default for PhysicalInputs {
    fn default() -> Self {
        Self {
            diffusivity: ThermalDiffusivity::new(1.1e-7),
            temp_init: Celsius::new(10.0),
            temp_boundary: Celsius::BOILING,
            half_extent: Meters::from_centimeters(4.0) * 0.5,
            geometry: Geometry::Slab,
            radial_cells: 25,
            plot_intvl: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_config(nstep: usize, plot_intvl: usize) -> SimulationConfig {
        SimulationConfig::new(1.0, 50.0, 100.0, 5.0, 0.0, 1.0, 0.1, nstep, plot_intvl)
            .expect("valid config")
    }

    #[test]
    fn test_default_inputs_match_reference_scenario() {
        let config = SimulationConfig::from_inputs(&PhysicalInputs::default()).unwrap();

        assert_relative_eq!(config.rmax(), 0.02, epsilon = 1e-15);
        assert_relative_eq!(config.delta_r(), 0.0008, epsilon = 1e-15);
        assert_relative_eq!(config.delta_t(), 0.16, epsilon = 1e-12);
        assert_eq!(config.a_factor(), 0.0);
        assert_eq!(config.plot_intvl(), 200);
        assert_eq!(config.nr(), 25);
        assert_eq!(config.nstep(), 15_000);
        assert_eq!(config.snapshot_count(), 75);
        assert!(config.is_stable());
    }

    #[test]
    fn test_geometry_exponents() {
        assert_eq!(Geometry::Slab.a_factor(), 0.0);
        assert_eq!(Geometry::Cylinder.a_factor(), 1.0);
        assert_eq!(Geometry::Sphere.a_factor(), 2.0);
        assert_eq!(Geometry::Sphere.to_string(), "sphere");
    }

    #[test]
    fn test_nr_truncates() {
        let config = SimulationConfig::new(1.0, 0.0, 1.0, 5.9, 0.0, 1.0, 0.1, 1, 1).unwrap();
        assert_eq!(config.nr(), 5);
    }

    #[test]
    fn test_rejects_non_positive_extent_and_step() {
        let err = SimulationConfig::new(1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.1, 1, 1).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidParameter {
                name: "rmax",
                value: 0.0
            }
        );

        let err =
            SimulationConfig::new(1.0, 0.0, 1.0, 1.0, 0.0, f64::NAN, 0.1, 1, 1).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                name: "delta_r",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_plot_interval() {
        let err = SimulationConfig::new(1.0, 0.0, 1.0, 5.0, 0.0, 1.0, 0.1, 10, 0).unwrap_err();
        assert!(err.to_string().contains("plot_intvl"));
    }

    #[test]
    fn test_unstable_parameters_are_accepted() {
        let config = SimulationConfig::new(1.0, 0.0, 1.0, 5.0, 0.0, 1.0, 2.0, 10, 1).unwrap();
        assert_eq!(config.stability_number(), 2.0);
        assert!(!config.is_stable());
    }

    #[test]
    fn test_snapshot_count_and_cadence() {
        assert_eq!(small_config(0, 200).snapshot_count(), 1);
        assert_eq!(small_config(1, 200).snapshot_count(), 1);
        assert_eq!(small_config(200, 200).snapshot_count(), 1);
        assert_eq!(small_config(201, 200).snapshot_count(), 2);
        assert_eq!(small_config(10, 3).snapshot_count(), 4);

        let config = small_config(10, 3);
        assert!(config.is_snapshot_iteration(0));
        assert!(!config.is_snapshot_iteration(2));
        assert!(config.is_snapshot_iteration(9));
    }

    #[test]
    fn test_elapsed_time() {
        let config = small_config(40, 10);
        assert_relative_eq!(config.elapsed_time(20).value(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(config.total_time().value(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::DomainTooSmall { nr: 1 };
        assert_eq!(
            err.to_string(),
            "Domain too small: 1 radial cell(s), at least 2 required"
        );
    }
}
