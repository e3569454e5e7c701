//! Spherical-harmonic gravitational acceleration with Gottlieb's normalized recursion.
//!
//! Entry point: [`acceleration::GravityField`].
pub mod acceleration;
pub mod constants;
pub mod frames;
pub mod geopot_errors;
pub mod gravity_model;
pub mod harmonics;
pub mod legendre;
pub mod longitude;
pub mod normalization;
pub mod params;
pub mod triangular;
