//! # Gravity model: normalized spherical-harmonic coefficients
//!
//! A [`GravityModel`] is the immutable description of a central body's gravity field:
//!
//! * the gravitational parameter `μ`,
//! * the reference radius `Rₑ` the coefficients are scaled to,
//! * the maximum usable degree `N` and order `M` (`M ≤ N`),
//! * two triangular tables of **fully normalized** coefficients `C̄nm`, `S̄nm`.
//!
//! Models are validated on construction and never mutated afterwards; builder-style
//! helpers such as [`GravityModel::with_coefficient`] return a new value. The evaluator
//! ([`GravityField`](crate::acceleration::GravityField)) only reads them and shares them
//! behind an `Arc`.
//!
//! Coefficient files are **not** parsed here. A coefficient provider implements
//! [`CoefficientSource`] and hands over plain data, either through the constructors
//! below or through the `serde` representation:
//!
//! ```text
//! { "mu": 398600.4415, "radius": 6378.1363, "degree": 2, "order": 0,
//!   "c": [[1.0], [0.0, 0.0], [-0.000484165, 0.0, 0.0]],
//!   "s": [[0.0], [0.0, 0.0], [0.0, 0.0, 0.0]] }
//! ```
//!
//! ## Normalization convention
//!
//! ```text
//! C̄nm = Cnm / Nnm,   Nnm = sqrt( (2 - δ0m) (2n + 1) (n - m)! / (n + m)! )
//! ```
//!
//! so that the zonal term of an oblate body is `C̄20 = -J2 / sqrt(5)`.
use serde::{Deserialize, Serialize};

use crate::constants::{EARTH_MU, EARTH_RADIUS, EGM96_LOW_DEGREE, HARD_DEGREE_LIMIT};
use crate::geopot_errors::GeopotError;
use crate::triangular::TriangularTable;

/// Immutable normalized spherical-harmonic gravity model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GravityModelData")]
pub struct GravityModel {
    mu: f64,
    radius: f64,
    degree: usize,
    order: usize,
    c: TriangularTable,
    s: TriangularTable,
}

/// Unvalidated mirror of [`GravityModel`], deserialized first and then checked.
#[derive(Deserialize)]
struct GravityModelData {
    mu: f64,
    radius: f64,
    degree: usize,
    order: usize,
    c: TriangularTable,
    s: TriangularTable,
}

impl TryFrom<GravityModelData> for GravityModel {
    type Error = GeopotError;

    fn try_from(data: GravityModelData) -> Result<Self, Self::Error> {
        GravityModel::new(data.mu, data.radius, data.degree, data.order, data.c, data.s)
    }
}

impl GravityModel {
    /// Build a model from normalized coefficient tables.
    ///
    /// Arguments
    /// ---------
    /// * `mu`: gravitational parameter (length³/time²), finite and strictly positive.
    /// * `radius`: reference radius Rₑ (same length unit as `mu`), finite and strictly positive.
    /// * `degree`: maximum usable degree N.
    /// * `order`: maximum usable order M, with `M ≤ N`.
    /// * `c`, `s`: normalized coefficient triangles of maximum degree exactly `N`.
    ///
    /// Errors
    /// ------
    /// * [`GeopotError::OrderExceedsDegree`] if `order > degree`. Checked first, so a
    ///   bad configuration is reported before anything else is looked at.
    /// * [`GeopotError::UnsupportedDegree`] if `degree` is above [`HARD_DEGREE_LIMIT`].
    /// * [`GeopotError::InvalidModelParameter`] for a bad `mu`/`radius` or a non-finite coefficient.
    /// * [`GeopotError::CoefficientShape`] if a table does not have maximum degree `N`.
    pub fn new(
        mu: f64,
        radius: f64,
        degree: usize,
        order: usize,
        c: TriangularTable,
        s: TriangularTable,
    ) -> Result<Self, GeopotError> {
        if order > degree {
            return Err(GeopotError::OrderExceedsDegree { degree, order });
        }
        if degree > HARD_DEGREE_LIMIT {
            return Err(GeopotError::UnsupportedDegree {
                degree,
                max: HARD_DEGREE_LIMIT,
            });
        }
        if !(mu.is_finite() && mu > 0.0) {
            return Err(GeopotError::InvalidModelParameter(format!(
                "gravitational parameter must be finite and positive, got {mu}"
            )));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeopotError::InvalidModelParameter(format!(
                "reference radius must be finite and positive, got {radius}"
            )));
        }
        for table in [&c, &s] {
            if table.max_degree() != degree {
                return Err(GeopotError::CoefficientShape {
                    expected: degree,
                    found: table.max_degree(),
                });
            }
            if let Some((n, m, v)) = table.iter().find(|(_, _, v)| !v.is_finite()) {
                return Err(GeopotError::InvalidModelParameter(format!(
                    "coefficient ({n}, {m}) is not finite: {v}"
                )));
            }
        }

        Ok(GravityModel {
            mu,
            radius,
            degree,
            order,
            c,
            s,
        })
    }

    /// Degree-0 model: the central (point-mass) term only, `C̄00 = 1`.
    pub fn point_mass(mu: f64, radius: f64) -> Result<Self, GeopotError> {
        let mut c = TriangularTable::zeros(0);
        c[(0, 0)] = 1.0;
        GravityModel::new(mu, radius, 0, 0, c, TriangularTable::zeros(0))
    }

    /// Zonal-only model from unnormalized `J` coefficients.
    ///
    /// `zonals[0]` is `J2`, `zonals[1]` is `J3`, and so on, so the model degree is
    /// `zonals.len() + 1` (or 0 when `zonals` is empty). Each is stored as
    /// `C̄n0 = -Jn / sqrt(2n + 1)` and the model order is 0.
    pub fn from_zonal(mu: f64, radius: f64, zonals: &[f64]) -> Result<Self, GeopotError> {
        if zonals.is_empty() {
            return GravityModel::point_mass(mu, radius);
        }
        let degree = zonals.len() + 1;
        let mut c = TriangularTable::zeros(degree);
        c[(0, 0)] = 1.0;
        for (n, j) in (2..=degree).zip(zonals) {
            c[(n, 0)] = -j / ((2 * n + 1) as f64).sqrt();
        }
        GravityModel::new(mu, radius, degree, 0, c, TriangularTable::zeros(degree))
    }

    /// Model from **unnormalized** coefficient tables.
    ///
    /// Every coefficient is divided by [`normalization_factor`]`(n, m)`.
    ///
    /// Errors
    /// ------
    /// Same as [`GravityModel::new`]. A factor that underflows (very high degree, where
    /// unnormalized coefficients are not representable anyway) is reported as
    /// [`GeopotError::InvalidModelParameter`].
    pub fn from_unnormalized(
        mu: f64,
        radius: f64,
        degree: usize,
        order: usize,
        c: &TriangularTable,
        s: &TriangularTable,
    ) -> Result<Self, GeopotError> {
        let mut c_norm = TriangularTable::zeros(c.max_degree());
        let mut s_norm = TriangularTable::zeros(s.max_degree());

        for (table, out) in [(c, &mut c_norm), (s, &mut s_norm)] {
            for (n, m, value) in table.iter() {
                let factor = normalization_factor(n, m);
                if !(factor.is_finite() && factor > 0.0) {
                    return Err(GeopotError::InvalidModelParameter(format!(
                        "normalization factor of ({n}, {m}) is not representable"
                    )));
                }
                out[(n, m)] = value / factor;
            }
        }

        GravityModel::new(mu, radius, degree, order, c_norm, s_norm)
    }

    /// Normalized EGM96 Earth field truncated at degree and order 4 (km, km³/s²).
    pub fn egm96_low_degree() -> Self {
        let mut c = TriangularTable::zeros(4);
        let mut s = TriangularTable::zeros(4);
        c[(0, 0)] = 1.0;
        for &(n, m, cnm, snm) in EGM96_LOW_DEGREE.iter() {
            c[(n, m)] = cnm;
            s[(n, m)] = snm;
        }
        GravityModel {
            mu: EARTH_MU,
            radius: EARTH_RADIUS,
            degree: 4,
            order: 4,
            c,
            s,
        }
    }

    /// Return a copy of the model with `(C̄nm, S̄nm)` replaced.
    ///
    /// Errors
    /// ------
    /// * [`GeopotError::DegreeOrderOutOfRange`] if `n > N`, `m > n` or `m > M`.
    /// * [`GeopotError::InvalidModelParameter`] if a value is not finite.
    pub fn with_coefficient(
        mut self,
        n: usize,
        m: usize,
        cnm: f64,
        snm: f64,
    ) -> Result<Self, GeopotError> {
        if n > self.degree || m > n || m > self.order {
            return Err(GeopotError::DegreeOrderOutOfRange {
                degree: n,
                order: m,
            });
        }
        if !(cnm.is_finite() && snm.is_finite()) {
            return Err(GeopotError::InvalidModelParameter(format!(
                "coefficient ({n}, {m}) is not finite: ({cnm}, {snm})"
            )));
        }
        self.c.set(n, m, cnm)?;
        self.s.set(n, m, snm)?;
        Ok(self)
    }

    /// Copy of the model restricted to `degree ≤ N` and `order ≤ M`.
    ///
    /// Errors
    /// ------
    /// * [`GeopotError::OrderExceedsDegree`] if `order > degree`.
    /// * [`GeopotError::DegreeOrderOutOfRange`] if the request exceeds the model bounds.
    pub fn truncated(&self, degree: usize, order: usize) -> Result<Self, GeopotError> {
        if order > degree {
            return Err(GeopotError::OrderExceedsDegree { degree, order });
        }
        if degree > self.degree || order > self.order {
            return Err(GeopotError::DegreeOrderOutOfRange { degree, order });
        }
        Ok(GravityModel {
            mu: self.mu,
            radius: self.radius,
            degree,
            order,
            c: self.c.truncated(degree, order)?,
            s: self.s.truncated(degree, order)?,
        })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Normalized cosine coefficient `C̄nm`.
    ///
    /// # Panics
    ///
    /// Panics if `(n, m)` lies outside the coefficient triangle.
    #[inline]
    pub fn c(&self, n: usize, m: usize) -> f64 {
        self.c[(n, m)]
    }

    /// Normalized sine coefficient `S̄nm`.
    ///
    /// # Panics
    ///
    /// Panics if `(n, m)` lies outside the coefficient triangle.
    #[inline]
    pub fn s(&self, n: usize, m: usize) -> f64 {
        self.s[(n, m)]
    }

    pub fn c_table(&self) -> &TriangularTable {
        &self.c
    }

    pub fn s_table(&self) -> &TriangularTable {
        &self.s
    }
}

/// Full normalization factor `Nnm = sqrt((2 - δ0m)(2n + 1)(n - m)!/(n + m)!)`.
///
/// The factorial ratio is accumulated as a running product of `1/sqrt(k)` so that it
/// never builds `(n + m)!` explicitly. Returns 0 when `m > n`.
pub fn normalization_factor(n: usize, m: usize) -> f64 {
    if m > n {
        return 0.0;
    }
    let kronecker = if m == 0 { 1.0 } else { 2.0 };
    let ratio = ((n - m + 1)..=(n + m)).fold(1.0, |acc, k| acc / (k as f64).sqrt());
    (kronecker * (2 * n + 1) as f64).sqrt() * ratio
}

/// Provider of gravity models (coefficient file readers, remote catalogs, …).
///
/// Implementations hand the evaluator a model restricted to the requested
/// degree and order.
pub trait CoefficientSource {
    fn gravity_model(&self, degree: usize, order: usize) -> Result<GravityModel, GeopotError>;
}

impl CoefficientSource for GravityModel {
    fn gravity_model(&self, degree: usize, order: usize) -> Result<GravityModel, GeopotError> {
        self.truncated(degree, order)
    }
}

#[cfg(test)]
mod gravity_model_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_order_exceeds_degree_is_checked_first() {
        let res = GravityModel::new(
            -1.0,
            0.0,
            2,
            3,
            TriangularTable::zeros(2),
            TriangularTable::zeros(2),
        );
        assert_eq!(
            res,
            Err(GeopotError::OrderExceedsDegree {
                degree: 2,
                order: 3
            })
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let zeros = || TriangularTable::zeros(2);
        assert!(matches!(
            GravityModel::new(0.0, 1.0, 2, 2, zeros(), zeros()),
            Err(GeopotError::InvalidModelParameter(_))
        ));
        assert!(matches!(
            GravityModel::new(1.0, f64::NAN, 2, 2, zeros(), zeros()),
            Err(GeopotError::InvalidModelParameter(_))
        ));
        assert_eq!(
            GravityModel::new(1.0, 1.0, 2, 2, TriangularTable::zeros(3), zeros()),
            Err(GeopotError::CoefficientShape {
                expected: 2,
                found: 3
            })
        );

        let mut bad = zeros();
        bad[(2, 1)] = f64::INFINITY;
        assert!(matches!(
            GravityModel::new(1.0, 1.0, 2, 2, zeros(), bad),
            Err(GeopotError::InvalidModelParameter(_))
        ));
    }

    #[test]
    fn test_from_zonal() {
        let j2 = 1.082_626_68e-3;
        let model = GravityModel::from_zonal(EARTH_MU, EARTH_RADIUS, &[j2, -2.5e-6]).unwrap();
        assert_eq!(model.degree(), 3);
        assert_eq!(model.order(), 0);
        assert_relative_eq!(model.c(2, 0), -j2 / 5f64.sqrt(), max_relative = 1e-15);
        assert_relative_eq!(model.c(3, 0), 2.5e-6 / 7f64.sqrt(), max_relative = 1e-15);
        assert_eq!(model.c(0, 0), 1.0);

        let pm = GravityModel::from_zonal(EARTH_MU, EARTH_RADIUS, &[]).unwrap();
        assert_eq!(pm.degree(), 0);
    }

    #[test]
    fn test_normalization_factor() {
        assert_relative_eq!(normalization_factor(0, 0), 1.0);
        assert_relative_eq!(normalization_factor(2, 0), 5f64.sqrt(), max_relative = 1e-15);
        // N22 = sqrt(2 * 5 * 0! / 4!) = sqrt(10 / 24)
        assert_relative_eq!(
            normalization_factor(2, 2),
            (10.0f64 / 24.0).sqrt(),
            max_relative = 1e-15
        );
        assert_eq!(normalization_factor(2, 3), 0.0);
    }

    #[test]
    fn test_from_unnormalized_matches_from_zonal() {
        let j2 = 1.082_626_68e-3;
        let mut c = TriangularTable::zeros(2);
        c[(0, 0)] = 1.0;
        c[(2, 0)] = -j2;
        let model = GravityModel::from_unnormalized(
            EARTH_MU,
            EARTH_RADIUS,
            2,
            0,
            &c,
            &TriangularTable::zeros(2),
        )
        .unwrap();
        let zonal = GravityModel::from_zonal(EARTH_MU, EARTH_RADIUS, &[j2]).unwrap();
        assert_relative_eq!(model.c(2, 0), zonal.c(2, 0), max_relative = 1e-15);
    }

    #[test]
    fn test_with_coefficient_and_truncation() {
        let model = GravityModel::egm96_low_degree();
        assert_eq!(model.degree(), 4);

        let edited = model.clone().with_coefficient(3, 3, 1e-6, -1e-6).unwrap();
        assert_eq!(edited.c(3, 3), 1e-6);
        assert_eq!(edited.s(3, 3), -1e-6);
        assert_eq!(
            model.clone().with_coefficient(5, 0, 0.0, 0.0),
            Err(GeopotError::DegreeOrderOutOfRange {
                degree: 5,
                order: 0
            })
        );

        let cut = model.truncated(3, 1).unwrap();
        assert_eq!(cut.degree(), 3);
        assert_eq!(cut.order(), 1);
        assert_eq!(cut.c(3, 1), model.c(3, 1));
        assert_eq!(cut.c(3, 2), 0.0);

        assert_eq!(
            model.truncated(2, 3),
            Err(GeopotError::OrderExceedsDegree {
                degree: 2,
                order: 3
            })
        );
        assert_eq!(
            model.gravity_model(6, 0),
            Err(GeopotError::DegreeOrderOutOfRange {
                degree: 6,
                order: 0
            })
        );
    }
}
