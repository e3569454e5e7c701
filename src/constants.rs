//! # Constants and type definitions for the geopotential evaluator
//!
//! This module centralizes the **physical constants**, **degree limits**, and **common type
//! aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Earth gravitational parameter and reference radius (EGM96 values)
//! - Normalized EGM96 coefficients up to degree and order 4
//! - Supported-degree limits for the normalized recursion
//! - Unit aliases used across the public API
//!
//! Units are the caller's choice as long as they are consistent: the evaluator only
//! requires that μ, Rₑ and the position share the same length and time units. The
//! Earth constants below are given in kilometers and seconds.

// -------------------------------------------------------------------------------------------------
// Physical constants
// -------------------------------------------------------------------------------------------------

/// Earth gravitational parameter μ in km³/s² (EGM96)
pub const EARTH_MU: f64 = 398_600.441_5;

/// Earth reference radius Rₑ in kilometers (EGM96)
pub const EARTH_RADIUS: Kilometer = 6_378.136_3;

/// 2π, useful for angle wrapping
pub const DPI: f64 = 2. * std::f64::consts::PI;

// -------------------------------------------------------------------------------------------------
// Degree limits
// -------------------------------------------------------------------------------------------------

/// Default fail-fast limit on the harmonic degree.
///
/// The normalized recursion stays within the `f64` range well beyond this degree at
/// mid latitudes, but near the poles the sectorial terms `P̄nn · cosⁿφ` and the
/// radial factor `(Rₑ/r)ⁿ` start losing significant digits to gradual underflow.
/// 360 matches the full EGM96 expansion.
pub const MAX_SUPPORTED_DEGREE: usize = 360;

/// Upper bound accepted for a user-configured degree limit (EGM2008 full expansion).
pub const HARD_DEGREE_LIMIT: usize = 2190;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Harmonic degree n
pub type Degree = usize;
/// Harmonic order m
pub type Order = usize;

// -------------------------------------------------------------------------------------------------
// Reference coefficients
// -------------------------------------------------------------------------------------------------

/// Fully normalized EGM96 coefficients `(n, m, C̄nm, S̄nm)` up to degree and order 4.
///
/// Used by [`GravityModel::egm96_low_degree`](crate::gravity_model::GravityModel::egm96_low_degree)
/// for demos and benchmarks.
pub const EGM96_LOW_DEGREE: [(Degree, Order, f64, f64); 12] = [
    (2, 0, -0.484165371736e-03, 0.0),
    (2, 1, -0.186987635955e-09, 0.119528012031e-08),
    (2, 2, 0.243914352398e-05, -0.140016683654e-05),
    (3, 0, 0.957254173792e-06, 0.0),
    (3, 1, 0.202998882184e-05, 0.248513158716e-06),
    (3, 2, 0.904627768605e-06, -0.619025944205e-06),
    (3, 3, 0.721072657057e-06, 0.141435626958e-05),
    (4, 0, 0.539873863789e-06, 0.0),
    (4, 1, -0.536321616971e-06, -0.473440265853e-06),
    (4, 2, 0.350694105785e-06, 0.662671572540e-06),
    (4, 3, 0.990771803829e-06, -0.200928369177e-06),
    (4, 4, -0.188560802735e-06, 0.308853169333e-06),
];
