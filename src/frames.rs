//! # Body-fixed to output frame rotations
//!
//! The evaluator works in the body-fixed frame in which the coefficients are defined
//! and rotates the result with a caller-supplied 3×3 matrix. Computing that matrix
//! (precession, nutation, polar motion, …) belongs to a frame-transform provider and
//! is not done here; this module only defines the seam, [`FrameRotation`], and two
//! simple providers:
//!
//! * any `Matrix3<f64>`, used as a constant rotation,
//! * [`UniformRotation`], a body spinning at a constant rate about its z axis.
use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::constants::{Radian, DPI};

/// Principal axis of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Right-handed 3×3 rotation matrix of angle `alpha` about a principal axis.
///
/// This is an **active rotation** (`v' = R · v`, counter-clockwise when looking down
/// the axis toward the origin). The result is orthonormal: `R.transpose() == R.inverse()`.
pub fn axis_rotation(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Provider of the body-fixed → output frame rotation at a given epoch.
///
/// The epoch unit is whatever the provider uses (seconds, MJD, …); the evaluator
/// only forwards it.
pub trait FrameRotation {
    fn body_to_output(&self, epoch: f64) -> Matrix3<f64>;
}

impl FrameRotation for Matrix3<f64> {
    fn body_to_output(&self, _epoch: f64) -> Matrix3<f64> {
        *self
    }
}

/// Body rotating uniformly about its z axis.
///
/// The body-fixed frame is turned by `θ(t) = theta0 + rate · (t - epoch0)` with respect
/// to the output frame, so a body-fixed vector maps to `Rz(θ) · v`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRotation {
    /// Rotation angle at `epoch0` (radians).
    pub theta0: Radian,
    /// Angular rate (radians per epoch unit).
    pub rate: f64,
    /// Reference epoch.
    pub epoch0: f64,
}

impl UniformRotation {
    /// Earth rotation rate in rad/s (IERS conventions).
    pub const EARTH_RATE: f64 = 7.292_115_146_706_979e-5;

    pub fn new(theta0: Radian, rate: f64, epoch0: f64) -> Self {
        UniformRotation {
            theta0,
            rate,
            epoch0,
        }
    }

    /// Rotation angle at `epoch`, wrapped to `[0, 2π)`.
    pub fn angle(&self, epoch: f64) -> Radian {
        (self.theta0 + self.rate * (epoch - self.epoch0)).rem_euclid(DPI)
    }
}

impl FrameRotation for UniformRotation {
    fn body_to_output(&self, epoch: f64) -> Matrix3<f64> {
        axis_rotation(self.angle(epoch), Axis::Z)
    }
}
