//! # Evaluation parameters
//!
//! [`GravityParams`] controls how a [`GravityModel`](crate::gravity_model::GravityModel)
//! is turned into a [`GravityField`](crate::acceleration::GravityField):
//!
//! * `degree`, `order` – optional truncation of the model. `None` means "use the
//!   model's own `N`" and "use `min(M, degree)`" respectively.
//! * `max_supported_degree` – fail-fast limit on the evaluated degree. Above a few
//!   hundred, the normalized factors and `(Rₑ/r)ⁿ` lose precision to gradual underflow
//!   near the poles; a field above this limit is refused instead of silently degraded.
//!
//! ```rust
//! use geopotential::params::GravityParams;
//!
//! let params = GravityParams::builder()
//!     .degree(20)
//!     .order(20)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.degree, Some(20));
//! ```
use serde::{Deserialize, Serialize};

use crate::constants::{HARD_DEGREE_LIMIT, MAX_SUPPORTED_DEGREE};
use crate::geopot_errors::GeopotError;

/// Truncation and limits applied when building a gravity field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravityParams {
    /// Evaluated degree; `None` uses the model degree.
    pub degree: Option<usize>,
    /// Evaluated order; `None` uses `min(model order, evaluated degree)`.
    pub order: Option<usize>,
    /// Largest degree accepted before failing with
    /// [`GeopotError::UnsupportedDegree`].
    pub max_supported_degree: usize,
}

impl GravityParams {
    /// Construct a new [`GravityParams`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`GravityParamsBuilder`].
    pub fn builder() -> GravityParamsBuilder {
        GravityParamsBuilder::new()
    }

    /// Resolve the evaluated `(degree, order)` against a model of bounds `(N, M)`.
    ///
    /// Errors
    /// ------
    /// * [`GeopotError::OrderExceedsDegree`] if the requested order is above the
    ///   requested (or model) degree.
    /// * [`GeopotError::DegreeOrderOutOfRange`] if the request exceeds `(N, M)`.
    /// * [`GeopotError::UnsupportedDegree`] if the resolved degree is above
    ///   `max_supported_degree`.
    pub fn resolve(
        &self,
        model_degree: usize,
        model_order: usize,
    ) -> Result<(usize, usize), GeopotError> {
        let degree = self.degree.unwrap_or(model_degree);
        let order = self.order.unwrap_or(model_order.min(degree));

        if order > degree {
            return Err(GeopotError::OrderExceedsDegree { degree, order });
        }
        if degree > model_degree || order > model_order {
            return Err(GeopotError::DegreeOrderOutOfRange { degree, order });
        }
        if degree > self.max_supported_degree {
            return Err(GeopotError::UnsupportedDegree {
                degree,
                max: self.max_supported_degree,
            });
        }
        Ok((degree, order))
    }
}

impl Default for GravityParams {
    fn default() -> Self {
        GravityParams {
            degree: None,
            order: None,
            max_supported_degree: MAX_SUPPORTED_DEGREE,
        }
    }
}

/// Builder for [`GravityParams`], with validation.
#[derive(Debug, Clone)]
pub struct GravityParamsBuilder {
    params: GravityParams,
}

impl Default for GravityParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GravityParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: GravityParams::default(),
        }
    }

    pub fn degree(mut self, v: usize) -> Self {
        self.params.degree = Some(v);
        self
    }
    pub fn order(mut self, v: usize) -> Self {
        self.params.order = Some(v);
        self
    }
    pub fn max_supported_degree(mut self, v: usize) -> Self {
        self.params.max_supported_degree = v;
        self
    }

    /// Finalize the builder and produce a [`GravityParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `order ≤ degree` when both are set.
    /// * `2 ≤ max_supported_degree ≤ HARD_DEGREE_LIMIT`.
    /// * `degree ≤ max_supported_degree` when set.
    pub fn build(self) -> Result<GravityParams, GeopotError> {
        let p = &self.params;

        if let (Some(degree), Some(order)) = (p.degree, p.order) {
            if order > degree {
                return Err(GeopotError::OrderExceedsDegree { degree, order });
            }
        }
        if !(2..=HARD_DEGREE_LIMIT).contains(&p.max_supported_degree) {
            return Err(GeopotError::InvalidParameter(format!(
                "max_supported_degree must be in [2, {HARD_DEGREE_LIMIT}], got {}",
                p.max_supported_degree
            )));
        }
        if let Some(degree) = p.degree {
            if degree > p.max_supported_degree {
                return Err(GeopotError::UnsupportedDegree {
                    degree,
                    max: p.max_supported_degree,
                });
            }
        }

        Ok(self.params)
    }
}

#[cfg(test)]
mod params_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = GravityParams::builder().build().unwrap();
        assert_eq!(params, GravityParams::default());
        assert_eq!(params.max_supported_degree, MAX_SUPPORTED_DEGREE);
        assert_eq!(params.resolve(70, 70).unwrap(), (70, 70));
    }

    #[test]
    fn test_builder_validation() {
        assert_eq!(
            GravityParams::builder().degree(4).order(5).build(),
            Err(GeopotError::OrderExceedsDegree {
                degree: 4,
                order: 5
            })
        );
        assert!(matches!(
            GravityParams::builder().max_supported_degree(1).build(),
            Err(GeopotError::InvalidParameter(_))
        ));
        assert!(matches!(
            GravityParams::builder()
                .max_supported_degree(HARD_DEGREE_LIMIT + 1)
                .build(),
            Err(GeopotError::InvalidParameter(_))
        ));
        assert_eq!(
            GravityParams::builder()
                .degree(50)
                .max_supported_degree(40)
                .build(),
            Err(GeopotError::UnsupportedDegree {
                degree: 50,
                max: 40
            })
        );
    }

    #[test]
    fn test_resolve() {
        let params = GravityParams::builder().degree(8).build().unwrap();
        assert_eq!(params.resolve(20, 20).unwrap(), (8, 8));
        assert_eq!(params.resolve(20, 0).unwrap(), (8, 0));
        assert_eq!(
            params.resolve(6, 6),
            Err(GeopotError::DegreeOrderOutOfRange {
                degree: 8,
                order: 6
            })
        );

        let params = GravityParams::builder().order(3).build().unwrap();
        assert_eq!(
            params.resolve(2, 2),
            Err(GeopotError::OrderExceedsDegree {
                degree: 2,
                order: 3
            })
        );

        let params = GravityParams::builder()
            .max_supported_degree(10)
            .build()
            .unwrap();
        assert_eq!(
            params.resolve(12, 0),
            Err(GeopotError::UnsupportedDegree {
                degree: 12,
                max: 10
            })
        );
    }
}
