//! Explicit time integration of the radial temperature field

use super::config::{ConfigError, SimulationConfig, STABILITY_LIMIT};
use super::fields::{SpatialGrid, TemperatureField};
use super::heat_transfer::{
    apply_forward_euler, compute_time_derivative, time_derivative_into, HeatTransferParams,
};
use crate::core_types::Seconds;
use tracing::{debug, warn};

/// Owns the temperature field of one run and advances it with forward Euler
///
/// Each [`step`](Self::step) computes the full rate field from the current
/// temperatures, then applies `T += delta_t * rate` to every shell. Steps are
/// strictly sequential; step `i + 1` only sees the fully updated output of step `i`.
#[derive(Debug, Clone)]
pub struct ThermalDiffusionStepper {
    config: SimulationConfig,
    params: HeatTransferParams,
    grid: SpatialGrid,
    field: TemperatureField,
    /// Scratch rate buffer reused across steps
    rate: Vec<f64>,
    iteration: usize,
}

impl ThermalDiffusionStepper {
    /// Allocate the field for `config`: `temp_init` everywhere, `temp_boundary` outermost
    ///
    /// A configuration outside the slab stability bound is logged and accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DomainTooSmall`] if the configuration yields fewer
    /// than two radial cells.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let nr = config.nr();
        if nr < 2 {
            return Err(ConfigError::DomainTooSmall { nr });
        }

        if !config.is_stable() {
            warn!(
                "Stability number {:.4} exceeds {} - results will diverge",
                config.stability_number(),
                STABILITY_LIMIT
            );
        }

        debug!(
            "Stepper allocated: nr={}, delta_r={:e}, delta_t={:e}, a_factor={}",
            nr,
            config.delta_r(),
            config.delta_t(),
            config.a_factor()
        );

        Ok(Self {
            params: HeatTransferParams::from(&config),
            grid: SpatialGrid::new(nr, config.delta_r()),
            field: TemperatureField::with_boundary(nr, config.temp_init(), config.temp_boundary()),
            rate: vec![0.0; nr],
            iteration: 0,
            config,
        })
    }

    /// Run configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Shell radii
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Current temperatures
    pub fn field(&self) -> &TemperatureField {
        &self.field
    }

    /// Number of steps taken so far
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Simulated time reached so far
    pub fn elapsed_time(&self) -> Seconds {
        self.config.elapsed_time(self.iteration)
    }

    /// Rate `∂T/∂t` of the current field, leaving the field untouched
    pub fn time_derivative(&self) -> Vec<f64> {
        compute_time_derivative(self.field.as_slice(), &self.grid, self.params)
    }

    /// Advance the field by one time step
    pub fn step(&mut self) {
        time_derivative_into(self.field.as_slice(), &mut self.rate, &self.grid, self.params);
        apply_forward_euler(self.field.as_mut_slice(), &self.rate, self.config.delta_t());
        self.iteration += 1;
    }

    /// Consume the stepper, returning the final field
    pub fn into_field(self) -> TemperatureField {
        self.field
    }
}
