//! Point-mass kinematics

pub mod freefall;

pub use freefall::{
    FallState, FreeFall, FreeFallError, Trajectory, DEFAULT_TIME_STEP, STANDARD_GRAVITY,
};
