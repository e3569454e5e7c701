//! # Gravity field evaluation
//!
//! This module ties the pieces together:
//!
//! 1. [`NormalizationTable`] is built once per `(N, M)`, shared through an `Arc`.
//! 2. [`LegendreTable`] and [`LongitudeTerms`] are per-call scratch ([`EvaluationScratch`]),
//!    filled from the body-fixed direction cosines.
//! 3. [`HarmonicSums`] holds the four sums of Gottlieb's formulation.
//! 4. [`assemble_acceleration`] gives the body-fixed acceleration, rotated to the output frame:
//!
//! ```text
//! Λ  = GM + ep·H
//! g  = -(μ/r²) · [Λ·x/r - J,  Λ·y/r - K,  Λ·z/r - H]
//! a  = R · g
//! ```
//!
//! ## Concurrency
//!
//! A [`GravityField`] is read-only after construction and is `Send + Sync`: any number of
//! threads may evaluate it concurrently. Scratch state is never shared; each call either
//! allocates its own [`EvaluationScratch`] or borrows one mutably from the caller
//! ([`GravityField::acceleration_with_scratch`]). [`GravityField::acceleration_batch`]
//! spreads independent positions over the `rayon` pool with one scratch per worker.
//!
//! ## Example
//!
//! ```rust
//! use geopotential::acceleration::GravityField;
//! use geopotential::gravity_model::GravityModel;
//! use nalgebra::{Matrix3, Vector3};
//!
//! let field = GravityField::new(GravityModel::egm96_low_degree()).unwrap();
//! let accel = field
//!     .acceleration(&Vector3::new(7000.0, 0.0, 0.0), &Matrix3::identity())
//!     .unwrap();
//! assert!(accel.x < 0.0);
//! ```
use std::sync::Arc;

use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;

use crate::frames::FrameRotation;
use crate::geopot_errors::GeopotError;
use crate::gravity_model::{CoefficientSource, GravityModel};
use crate::harmonics::HarmonicSums;
use crate::legendre::LegendreTable;
use crate::longitude::LongitudeTerms;
use crate::normalization::NormalizationTable;
use crate::params::GravityParams;

/// Combine the harmonic sums into an acceleration rotated to the output frame.
///
/// Arguments
/// ---------
/// * `sums`: output of [`HarmonicSums::accumulate`] for this position.
/// * `mu`: gravitational parameter of the model.
/// * `r`: distance to the body center (non-zero).
/// * `unit`: body-fixed unit position vector `(x/r, y/r, z/r)`.
/// * `rotation`: body-fixed → output frame rotation.
pub fn assemble_acceleration(
    sums: &HarmonicSums,
    mu: f64,
    r: f64,
    unit: &Vector3<f64>,
    rotation: &Matrix3<f64>,
) -> Vector3<f64> {
    let lambda = sums.gm + unit.z * sums.h;
    let muor2 = mu / (r * r);

    let body_fixed = -muor2
        * Vector3::new(
            lambda * unit.x - sums.j,
            lambda * unit.y - sums.k,
            lambda * unit.z - sums.h,
        );

    rotation * body_fixed
}

/// Validate a body-fixed position and split it into `(r, r̂)`.
fn direction(position: &Vector3<f64>) -> Result<(f64, Vector3<f64>), GeopotError> {
    let r = position.norm();
    if !(r.is_finite() && r > 0.0) {
        return Err(GeopotError::DegeneratePosition {
            x: position.x,
            y: position.y,
            z: position.z,
        });
    }
    Ok((r, position / r))
}

/// Reusable per-call scratch: Legendre table and longitude terms.
///
/// One scratch serves one evaluation at a time (`&mut` access); it grows on demand when
/// used with a field of higher degree.
#[derive(Debug, Clone)]
pub struct EvaluationScratch {
    legendre: LegendreTable,
    longitude: LongitudeTerms,
}

impl EvaluationScratch {
    pub fn new(degree: usize) -> Self {
        EvaluationScratch {
            legendre: LegendreTable::new(degree),
            longitude: LongitudeTerms::new(degree),
        }
    }

    fn ensure(&mut self, degree: usize) {
        if self.legendre.capacity() < degree {
            *self = EvaluationScratch::new(degree);
        }
    }

    pub fn legendre(&self) -> &LegendreTable {
        &self.legendre
    }

    pub fn longitude(&self) -> &LongitudeTerms {
        &self.longitude
    }
}

/// Long-lived, shareable spherical-harmonic gravity evaluator.
#[derive(Debug, Clone)]
pub struct GravityField {
    model: Arc<GravityModel>,
    norms: Arc<NormalizationTable>,
    degree: usize,
    order: usize,
}

impl GravityField {
    /// Field evaluating the full model.
    pub fn new(model: impl Into<Arc<GravityModel>>) -> Result<Self, GeopotError> {
        Self::with_params(model, &GravityParams::default())
    }

    /// Field evaluating the model truncated as requested by `params`.
    ///
    /// Errors
    /// ------
    /// See [`GravityParams::resolve`]. All configuration errors are raised here, before
    /// any recursion runs.
    pub fn with_params(
        model: impl Into<Arc<GravityModel>>,
        params: &GravityParams,
    ) -> Result<Self, GeopotError> {
        let model = model.into();
        let (degree, order) = params.resolve(model.degree(), model.order())?;
        let norms = Arc::new(NormalizationTable::new(degree, order)?);
        Ok(Self::assemble(model, norms, degree, order))
    }

    /// Field reusing a shared normalization table.
    ///
    /// The table is kept as is when it covers the resolved `(degree, order)`; otherwise
    /// a larger one, covering both the old and the new configuration, is built.
    pub fn with_normalization(
        model: impl Into<Arc<GravityModel>>,
        params: &GravityParams,
        norms: Arc<NormalizationTable>,
    ) -> Result<Self, GeopotError> {
        let model = model.into();
        let (degree, order) = params.resolve(model.degree(), model.order())?;

        let norms = if norms.covers(degree, order) {
            log::debug!(
                "Reusing normalization table ({}, {}) for degree {degree}, order {order}",
                norms.max_degree(),
                norms.max_order()
            );
            norms
        } else {
            log::warn!(
                "Normalization table ({}, {}) too small for degree {degree}, order {order}: rebuilding",
                norms.max_degree(),
                norms.max_order()
            );
            Arc::new(NormalizationTable::new(
                degree.max(norms.max_degree()),
                order.max(norms.max_order()),
            )?)
        };

        Ok(Self::assemble(model, norms, degree, order))
    }

    /// Field built from a coefficient provider.
    pub fn from_source<S: CoefficientSource + ?Sized>(
        source: &S,
        degree: usize,
        order: usize,
    ) -> Result<Self, GeopotError> {
        Self::new(source.gravity_model(degree, order)?)
    }

    fn assemble(
        model: Arc<GravityModel>,
        norms: Arc<NormalizationTable>,
        degree: usize,
        order: usize,
    ) -> Self {
        log::debug!(
            "Gravity field configured: degree {degree}, order {order}, mu {}, radius {}",
            model.mu(),
            model.radius()
        );
        GravityField {
            model,
            norms,
            degree,
            order,
        }
    }

    pub fn model(&self) -> &GravityModel {
        &self.model
    }

    /// Normalization table, shareable with other fields through
    /// [`GravityField::with_normalization`].
    pub fn normalization(&self) -> &Arc<NormalizationTable> {
        &self.norms
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Fresh scratch sized for this field.
    pub fn scratch(&self) -> EvaluationScratch {
        EvaluationScratch::new(self.degree)
    }

    /// Run both recursions and the accumulation for one position.
    fn evaluate(
        &self,
        scratch: &mut EvaluationScratch,
        position: &Vector3<f64>,
    ) -> Result<(f64, Vector3<f64>, HarmonicSums), GeopotError> {
        let (r, unit) = direction(position)?;

        scratch.ensure(self.degree);
        scratch
            .legendre
            .compute(unit.z, &self.norms, self.degree, self.order)?;
        scratch.longitude.compute(unit.x, unit.y);

        let sums = HarmonicSums::accumulate(
            &self.model,
            &self.norms,
            &scratch.legendre,
            &scratch.longitude,
            self.model.radius() / r,
            self.degree,
            self.order,
        );

        Ok((r, unit, sums))
    }

    /// Acceleration at a body-fixed `position`, rotated by `rotation` into the output frame.
    ///
    /// Errors
    /// ------
    /// * [`GeopotError::DegeneratePosition`] if `position` is zero or not finite.
    pub fn acceleration(
        &self,
        position: &Vector3<f64>,
        rotation: &Matrix3<f64>,
    ) -> Result<Vector3<f64>, GeopotError> {
        let mut scratch = self.scratch();
        self.acceleration_with_scratch(&mut scratch, position, rotation)
    }

    /// Same as [`acceleration`](Self::acceleration), also returning the harmonic sums.
    pub fn acceleration_with_sums(
        &self,
        position: &Vector3<f64>,
        rotation: &Matrix3<f64>,
    ) -> Result<(Vector3<f64>, HarmonicSums), GeopotError> {
        let mut scratch = self.scratch();
        let (r, unit, sums) = self.evaluate(&mut scratch, position)?;
        let accel = assemble_acceleration(&sums, self.model.mu(), r, &unit, rotation);
        Ok((accel, sums))
    }

    /// Same as [`acceleration`](Self::acceleration), reusing caller-owned scratch.
    pub fn acceleration_with_scratch(
        &self,
        scratch: &mut EvaluationScratch,
        position: &Vector3<f64>,
        rotation: &Matrix3<f64>,
    ) -> Result<Vector3<f64>, GeopotError> {
        let (r, unit, sums) = self.evaluate(scratch, position)?;
        Ok(assemble_acceleration(
            &sums,
            self.model.mu(),
            r,
            &unit,
            rotation,
        ))
    }

    /// Acceleration expressed in the body-fixed frame.
    pub fn body_fixed_acceleration(
        &self,
        position: &Vector3<f64>,
    ) -> Result<Vector3<f64>, GeopotError> {
        self.acceleration(position, &Matrix3::identity())
    }

    /// Acceleration rotated with the matrix a frame provider returns for `epoch`.
    pub fn acceleration_at<R: FrameRotation + ?Sized>(
        &self,
        position: &Vector3<f64>,
        frame: &R,
        epoch: f64,
    ) -> Result<Vector3<f64>, GeopotError> {
        self.acceleration(position, &frame.body_to_output(epoch))
    }

    /// Accelerations for many body-fixed positions, evaluated in parallel.
    ///
    /// Results keep the input order. The first failing position aborts the batch.
    pub fn acceleration_batch(
        &self,
        positions: &[Vector3<f64>],
        rotation: &Matrix3<f64>,
    ) -> Result<Vec<Vector3<f64>>, GeopotError> {
        log::trace!(
            "Evaluating {} positions at degree {}, order {}",
            positions.len(),
            self.degree,
            self.order
        );
        positions
            .par_iter()
            .map_init(
                || self.scratch(),
                |scratch, position| self.acceleration_with_scratch(scratch, position, rotation),
            )
            .collect()
    }

    /// Scalar geopotential `U` at a body-fixed position (acceleration is `∇U`).
    ///
    /// ```text
    /// U = μ/r · [1 + Σn (Rₑ/r)ⁿ Σm p(n,m)·(C̄nm·c̃m + S̄nm·s̃m)]
    /// ```
    pub fn potential(&self, position: &Vector3<f64>) -> Result<f64, GeopotError> {
        let mut scratch = self.scratch();
        self.potential_with_scratch(&mut scratch, position)
    }

    /// Same as [`potential`](Self::potential), reusing caller-owned scratch.
    pub fn potential_with_scratch(
        &self,
        scratch: &mut EvaluationScratch,
        position: &Vector3<f64>,
    ) -> Result<f64, GeopotError> {
        let (r, unit) = direction(position)?;

        scratch.ensure(self.degree);
        scratch
            .legendre
            .compute(unit.z, &self.norms, self.degree, self.order)?;
        scratch.longitude.compute(unit.x, unit.y);

        let reor = self.model.radius() / r;
        let mut reorn = reor;
        let mut sum = 1.0;

        for n in 2..=self.degree {
            reorn *= reor;
            let sumn: f64 = (0..=n.min(self.order))
                .map(|m| {
                    scratch.legendre.value(n, m)
                        * (self.model.c(n, m) * scratch.longitude.cos(m)
                            + self.model.s(n, m) * scratch.longitude.sin(m))
                })
                .sum();
            sum += reorn * sumn;
        }

        Ok(self.model.mu() / r * sum)
    }
}
