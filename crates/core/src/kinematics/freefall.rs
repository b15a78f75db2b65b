//! Free fall under constant gravity
//!
//! Semi-implicit Euler integration of a body dropped from a height, with
//! velocity positive downward:
//! ```text
//! t += h
//! v += g·h
//! x -= v·h
//! ```
//! The trajectory starts with the initial state and ends with the first state
//! whose height is below zero.

use serde::Serialize;
use std::fmt;
use std::iter::FusedIterator;

/// Standard gravitational acceleration (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Default integration step (s)
pub const DEFAULT_TIME_STEP: f64 = 0.01;

/// Time, height and downward velocity of the body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FallState {
    /// Elapsed time (s)
    pub time: f64,
    /// Height above ground (m)
    pub height: f64,
    /// Downward velocity (m/s)
    pub velocity: f64,
}

impl fmt::Display for FallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.7} {:.7} {:.7}",
            self.time, self.height, self.velocity
        )
    }
}

/// Invalid free-fall parameters
#[derive(Debug, Clone, PartialEq)]
pub enum FreeFallError {
    /// Value is NaN or infinite
    NonFinite {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// Value must be strictly positive
    NonPositive {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// Upward velocity so large that one gravity increment `g·h` rounds away,
    /// so the body would climb forever
    NeverLands {
        /// Initial downward velocity (m/s)
        initial_velocity: f64,
        /// Velocity change per step, `g·h` (m/s)
        velocity_step: f64,
    },
}

impl fmt::Display for FreeFallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreeFallError::NonFinite { name, value } => {
                write!(f, "'{name}' must be finite, got {value}")
            }
            FreeFallError::NonPositive { name, value } => {
                write!(f, "'{name}' must be positive, got {value}")
            }
            FreeFallError::NeverLands {
                initial_velocity,
                velocity_step,
            } => write!(
                f,
                "velocity step {velocity_step:e} is lost against initial velocity {initial_velocity:e}; the body never lands"
            ),
        }
    }
}

impl std::error::Error for FreeFallError {}

fn ensure_finite(name: &'static str, value: f64) -> Result<f64, FreeFallError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FreeFallError::NonFinite { name, value })
    }
}

fn ensure_positive(name: &'static str, value: f64) -> Result<f64, FreeFallError> {
    let value = ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(FreeFallError::NonPositive { name, value })
    }
}

/// Free-fall scenario: initial state, time step and gravity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeFall {
    initial: FallState,
    time_step: f64,
    gravity: f64,
}

impl FreeFall {
    /// Drop a body from `initial_height` with `initial_velocity` (positive downward)
    ///
    /// # Errors
    ///
    /// Returns [`FreeFallError::NonFinite`] if either value is NaN or infinite;
    /// an infinite height would never reach the ground. Returns
    /// [`FreeFallError::NeverLands`] for an upward velocity that gravity cannot
    /// change at the default step.
    ///
    /// The number of states grows with `|initial_velocity| / (g·h)` and
    /// `initial_height`, so finite but astronomically large inputs still
    /// produce very long trajectories.
    pub fn new(initial_velocity: f64, initial_height: f64) -> Result<Self, FreeFallError> {
        Self {
            initial: FallState {
                time: 0.0,
                height: ensure_finite("initial_height", initial_height)?,
                velocity: ensure_finite("initial_velocity", initial_velocity)?,
            },
            time_step: DEFAULT_TIME_STEP,
            gravity: STANDARD_GRAVITY,
        }
        .ensure_lands()
    }

    /// Override the integration step
    ///
    /// # Errors
    ///
    /// Returns an error unless `time_step` is finite and positive, or if the
    /// new step leaves the body unable to land.
    pub fn with_time_step(mut self, time_step: f64) -> Result<Self, FreeFallError> {
        self.time_step = ensure_positive("time_step", time_step)?;
        self.ensure_lands()
    }

    /// Override the gravitational acceleration
    ///
    /// # Errors
    ///
    /// Returns an error unless `gravity` is finite and positive, or if the new
    /// acceleration leaves the body unable to land.
    pub fn with_gravity(mut self, gravity: f64) -> Result<Self, FreeFallError> {
        self.gravity = ensure_positive("gravity", gravity)?;
        self.ensure_lands()
    }

    // A rising body whose velocity does not move under `v += g·h` never turns around.
    fn ensure_lands(self) -> Result<Self, FreeFallError> {
        let velocity = self.initial.velocity;
        let velocity_step = self.gravity * self.time_step;
        if velocity < 0.0 && velocity + velocity_step == velocity {
            Err(FreeFallError::NeverLands {
                initial_velocity: velocity,
                velocity_step,
            })
        } else {
            Ok(self)
        }
    }

    /// State at `t = 0`
    pub fn initial(&self) -> FallState {
        self.initial
    }

    /// Integration step (s)
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Iterate over every state from release to the first one below ground
    pub fn trajectory(&self) -> Trajectory {
        Trajectory {
            state: self.initial,
            time_step: self.time_step,
            gravity: self.gravity,
            started: false,
            finished: false,
        }
    }

    /// First state below ground (the initial state if it already is)
    pub fn landing(&self) -> FallState {
        self.trajectory().last().unwrap_or(self.initial)
    }
}

/// Iterator over the states of a [`FreeFall`]
#[derive(Debug, Clone)]
pub struct Trajectory {
    state: FallState,
    time_step: f64,
    gravity: f64,
    started: bool,
    finished: bool,
}

impl Iterator for Trajectory {
    type Item = FallState;

    fn next(&mut self) -> Option<FallState> {
        if self.finished {
            return None;
        }

        if self.started {
            let h = self.time_step;
            self.state.time += h;
            self.state.velocity += self.gravity * h;
            self.state.height -= self.state.velocity * h;
        } else {
            self.started = true;
        }

        if self.state.height < 0.0 {
            self.finished = true;
        }
        Some(self.state)
    }
}

impl FusedIterator for Trajectory {}
