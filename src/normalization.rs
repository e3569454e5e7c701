//! # Normalization factors for Gottlieb's recursion
//!
//! Unnormalized associated Legendre functions grow like `(2n)!/(2ⁿ n!)` and overflow
//! `f64` long before degree 200. Gottlieb's formulation keeps every intermediate
//! quantity normalized by folding the following scalar factors into the recursions:
//!
//! ```text
//! norm1[n]     = sqrt((2n+1) / (2n-1))
//! norm2[n]     = sqrt((2n+1) / (2n-3))
//! norm11[n]    = sqrt((2n+1) / (2n)) / (2n-1)
//! normn10[n]   = sqrt((n+1) n / 2)
//! norm1m[n,m]  = sqrt((n-m)(2n+1) / ((n+m)(2n-1)))
//! norm2m[n,m]  = sqrt((n-m)(n-m-1)(2n+1) / ((n+m)(n+m-1)(2n-3)))
//! normn1[n,m]  = sqrt((n+m+1)(n-m))
//! ```
//!
//! for `2 ≤ n ≤ N` and `1 ≤ m ≤ n`. The factors depend only on `(n, m)`, so a table is
//! built once per `(N, M)` configuration and shared read-only (typically behind an
//! `Arc`) by every evaluation.
//!
//! The order-indexed factors are stored for **every** `m ≤ n`, not only `m ≤ M`: the
//! sub-diagonal seed of the Legendre recursion reads `normn1[n, n-1]` whatever the
//! configured order. At the diagonal the factors vanish exactly (`norm1m[n,n]`,
//! `normn1[n,n]`, `norm2m[n,n-1]`, `norm2m[n,n]` are 0), which is what the recursions
//! expect.
use crate::geopot_errors::GeopotError;
use crate::triangular::TriangularTable;

/// Degree-indexed normalization factors for one degree `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeFactors {
    pub norm1: f64,
    pub norm2: f64,
    pub norm11: f64,
    pub normn10: f64,
}

/// Degree-and-order-indexed normalization factors for one `(n, m)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderFactors {
    pub norm1m: f64,
    pub norm2m: f64,
    pub normn1: f64,
}

/// Cached normalization factors valid for a fixed maximum degree `N` and order `M`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationTable {
    max_degree: usize,
    max_order: usize,
    norm1: Vec<f64>,
    norm2: Vec<f64>,
    norm11: Vec<f64>,
    normn10: Vec<f64>,
    norm1m: TriangularTable,
    norm2m: TriangularTable,
    normn1: TriangularTable,
}

impl NormalizationTable {
    /// Compute every factor for `2 ≤ n ≤ max_degree`, `1 ≤ m ≤ n`.
    ///
    /// Entries for `n < 2` or `m = 0` are left at zero and never read.
    ///
    /// Errors
    /// ------
    /// * [`GeopotError::OrderExceedsDegree`] if `max_order > max_degree`.
    pub fn new(max_degree: usize, max_order: usize) -> Result<Self, GeopotError> {
        if max_order > max_degree {
            return Err(GeopotError::OrderExceedsDegree {
                degree: max_degree,
                order: max_order,
            });
        }
        log::debug!("Building normalization table for degree {max_degree}, order {max_order}");

        let len = max_degree + 1;
        let mut norm1 = vec![0.0; len];
        let mut norm2 = vec![0.0; len];
        let mut norm11 = vec![0.0; len];
        let mut normn10 = vec![0.0; len];
        let mut norm1m = TriangularTable::zeros(max_degree);
        let mut norm2m = TriangularTable::zeros(max_degree);
        let mut normn1 = TriangularTable::zeros(max_degree);

        for n in 2..=max_degree {
            let nf = n as f64;
            let two_n = 2.0 * nf;

            norm1[n] = ((two_n + 1.0) / (two_n - 1.0)).sqrt();
            norm2[n] = ((two_n + 1.0) / (two_n - 3.0)).sqrt();
            norm11[n] = ((two_n + 1.0) / two_n).sqrt() / (two_n - 1.0);
            normn10[n] = ((nf + 1.0) * nf / 2.0).sqrt();

            for m in 1..=n {
                let mf = m as f64;
                norm1m[(n, m)] =
                    ((nf - mf) * (two_n + 1.0) / ((nf + mf) * (two_n - 1.0))).sqrt();
                norm2m[(n, m)] = ((nf - mf) * (nf - mf - 1.0) * (two_n + 1.0)
                    / ((nf + mf) * (nf + mf - 1.0) * (two_n - 3.0)))
                    .max(0.0)
                    .sqrt();
                normn1[(n, m)] = ((nf + mf + 1.0) * (nf - mf)).sqrt();
            }
        }

        Ok(NormalizationTable {
            max_degree,
            max_order,
            norm1,
            norm2,
            norm11,
            normn10,
            norm1m,
            norm2m,
            normn1,
        })
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Whether this table can serve a `(degree, order)` configuration without rebuilding.
    pub fn covers(&self, degree: usize, order: usize) -> bool {
        degree <= self.max_degree && order <= self.max_order
    }

    /// Checked lookup of the degree-indexed factors.
    ///
    /// Errors
    /// ------
    /// * [`GeopotError::DegreeOrderOutOfRange`] if `n < 2` or `n > N`.
    pub fn degree_factors(&self, n: usize) -> Result<DegreeFactors, GeopotError> {
        if !(2..=self.max_degree).contains(&n) {
            return Err(GeopotError::DegreeOrderOutOfRange {
                degree: n,
                order: 0,
            });
        }
        Ok(DegreeFactors {
            norm1: self.norm1[n],
            norm2: self.norm2[n],
            norm11: self.norm11[n],
            normn10: self.normn10[n],
        })
    }

    /// Checked lookup of the order-indexed factors.
    ///
    /// Errors
    /// ------
    /// * [`GeopotError::DegreeOrderOutOfRange`] unless `2 ≤ n ≤ N` and `1 ≤ m ≤ n`.
    pub fn order_factors(&self, n: usize, m: usize) -> Result<OrderFactors, GeopotError> {
        if !(2..=self.max_degree).contains(&n) || m == 0 || m > n {
            return Err(GeopotError::DegreeOrderOutOfRange {
                degree: n,
                order: m,
            });
        }
        Ok(OrderFactors {
            norm1m: self.norm1m[(n, m)],
            norm2m: self.norm2m[(n, m)],
            normn1: self.normn1[(n, m)],
        })
    }

    // Unchecked accessors for the recursions; callers stay inside the validated bounds.

    #[inline]
    pub(crate) fn norm1(&self, n: usize) -> f64 {
        self.norm1[n]
    }

    #[inline]
    pub(crate) fn norm2(&self, n: usize) -> f64 {
        self.norm2[n]
    }

    #[inline]
    pub(crate) fn norm11(&self, n: usize) -> f64 {
        self.norm11[n]
    }

    #[inline]
    pub(crate) fn normn10(&self, n: usize) -> f64 {
        self.normn10[n]
    }

    #[inline]
    pub(crate) fn norm1m(&self, n: usize, m: usize) -> f64 {
        self.norm1m[(n, m)]
    }

    #[inline]
    pub(crate) fn norm2m(&self, n: usize, m: usize) -> f64 {
        self.norm2m[(n, m)]
    }

    #[inline]
    pub(crate) fn normn1(&self, n: usize, m: usize) -> f64 {
        self.normn1[(n, m)]
    }
}
