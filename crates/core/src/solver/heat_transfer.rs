//! Heat conduction kernel
//!
//! Explicit finite-difference form of the radial heat equation:
//! ```text
//! ∂T/∂t = κ (∂²T/∂r² + (a/r) ∂T/∂r)
//! ```
//!
//! Where:
//! - `κ`: thermal diffusivity
//! - `a`: geometry exponent (0 slab, 1 cylinder, 2 sphere)
//! - `r`: shell-centre radius
//!
//! Boundary handling:
//! - outer shell: Dirichlet, `∂T/∂t = 0` so the surface temperature never moves
//! - centre shell: mirrors the rate of shell 1 (`rate[0] = rate[1]`) for every
//!   geometry, not a derived Neumann condition

use super::config::SimulationConfig;
use super::fields::SpatialGrid;

/// Scalars the derivative kernel reads from the run configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatTransferParams {
    /// Thermal diffusivity (m²/s)
    pub kappa: f64,
    /// Geometry exponent
    pub a_factor: f64,
    /// Radial cell width (m)
    pub delta_r: f64,
}

impl From<&SimulationConfig> for HeatTransferParams {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            kappa: config.kappa(),
            a_factor: config.a_factor(),
            delta_r: config.delta_r(),
        }
    }
}

/// Compute `∂T/∂t` for every shell into `rate`
///
/// Pure in `temp`: the same input always yields bit-identical output.
/// Non-finite temperatures propagate into the rate without panicking.
///
/// # Arguments
///
/// * `temp` - Temperature per shell
/// * `rate` - Output buffer, same length as `temp`
/// * `grid` - Shell radii, same length as `temp`
/// * `params` - Diffusivity, geometry exponent and cell width
///
/// # Panics
///
/// Panics if the slices differ in length or hold fewer than two shells
pub fn time_derivative_into(
    temp: &[f64],
    rate: &mut [f64],
    grid: &SpatialGrid,
    params: HeatTransferParams,
) {
    let n = temp.len();
    assert!(n >= 2, "Stencil needs at least two shells, got {n}");
    assert_eq!(rate.len(), n, "Rate buffer length mismatch");
    assert_eq!(grid.len(), n, "Grid length mismatch");

    let radii = grid.as_slice();
    let delta_r_sq = params.delta_r * params.delta_r;
    let two_delta_r = 2.0 * params.delta_r;

    rate[n - 1] = 0.0;

    for k in 1..n - 1 {
        let diffusion = (temp[k + 1] - 2.0 * temp[k] + temp[k - 1]) / delta_r_sq;
        let curvature = params.a_factor / radii[k] * (temp[k + 1] - temp[k - 1]) / two_delta_r;
        rate[k] = params.kappa * (diffusion + curvature);
    }

    rate[0] = rate[1];
}

/// Allocating form of [`time_derivative_into`]
///
/// # Panics
///
/// Same conditions as [`time_derivative_into`]
#[must_use]
pub fn compute_time_derivative(
    temp: &[f64],
    grid: &SpatialGrid,
    params: HeatTransferParams,
) -> Vec<f64> {
    let mut rate = vec![0.0; temp.len()];
    time_derivative_into(temp, &mut rate, grid, params);
    rate
}

/// Forward-Euler update `T[k] += delta_t * rate[k]` over every shell
///
/// The outer shell is included; it stays fixed only because its rate is 0.
///
/// # Panics
///
/// Panics if the slices differ in length
pub fn apply_forward_euler(temp: &mut [f64], rate: &[f64], delta_t: f64) {
    assert_eq!(temp.len(), rate.len(), "Rate buffer length mismatch");
    for (t, r) in temp.iter_mut().zip(rate) {
        *t += delta_t * r;
    }
}
