//! # Normalized associated Legendre functions (Gottlieb recursion)
//!
//! [`LegendreTable::compute`] fills, for a given `ep = z/r = sin φ`, the table
//!
//! ```text
//! p(n, m) = P̄nm(sin φ) / cosᵐ φ,     0 ≤ m ≤ n ≤ N
//! ```
//!
//! i.e. the fully normalized associated Legendre functions with their `cosᵐ φ` factor
//! removed. That factor is carried by the longitude terms instead
//! ([`LongitudeTerms`](crate::longitude::LongitudeTerms)), which keeps the recursion free
//! of `1/cos φ` singularities at the poles.
//!
//! Seeds and recursion (zero-based degree `n`, order `m`):
//!
//! ```text
//! p(0,0) = 1          p(0,1) = p(0,2) = 0
//! p(1,1) = √3         p(1,2) = p(1,3) = 0
//! p(1,0) = √3 · ep
//!
//! for n = 2..=N:
//!   p(n,n)   = norm11[n] · p(n-1,n-1) · (2n-1)          p(n,n+1) = p(n,n+2) = 0
//!   p(n,n-1) = normn1[n,n-1] · ep · p(n,n)
//!   p(n,0)   = ((2n-1)·ep·norm1[n]·p(n-1,0)    - (n-1)·norm2[n]·p(n-2,0))    / n
//!   p(n,1)   = ((2n-1)·ep·norm1m[n,1]·p(n-1,1) - n·norm2m[n,1]·p(n-2,1))     / (n-1)
//!   p(n,m)   = ((2n-1)·ep·norm1m[n,m]·p(n-1,m) - (n-1+m)·norm2m[n,m]·p(n-2,m)) / (n-m),
//!              m = 2..=n-2 (only when the configured order is > 0)
//! ```
//!
//! Rows must be produced in increasing degree: each one reads the two before it.
use crate::geopot_errors::GeopotError;
use crate::normalization::NormalizationTable;
use crate::triangular::TriangularTable;

const SQRT3: f64 = 1.732_050_807_568_877_2;

/// Per-evaluation scratch table of normalized Legendre values.
///
/// Holds degrees `0..=N` (at least up to degree 1 for the seeds) plus two zero columns
/// past the diagonal, read by the accumulator for `p(n, m+1)` at `m = n`.
#[derive(Debug, Clone)]
pub struct LegendreTable {
    p: TriangularTable,
    ep: f64,
}

impl LegendreTable {
    pub fn new(max_degree: usize) -> Self {
        LegendreTable {
            p: TriangularTable::with_padding(max_degree.max(1), 2),
            ep: f64::NAN,
        }
    }

    /// Largest degree this table can hold.
    pub fn capacity(&self) -> usize {
        self.p.max_degree()
    }

    /// Latitude parameter of the last [`compute`](Self::compute) call (NaN before the first).
    pub fn ep(&self) -> f64 {
        self.ep
    }

    /// Run the recursion for `ep = sin φ` up to `degree`.
    ///
    /// Arguments
    /// ---------
    /// * `ep`: sine of the geocentric latitude, `z / r`, in `[-1, 1]`.
    /// * `norms`: factors built for at least `degree`.
    /// * `degree`: maximum degree N to fill.
    /// * `order`: configured maximum order M; interior columns `2 ≤ m ≤ n-2` are only
    ///   computed when `M > 0`.
    ///
    /// Errors
    /// ------
    /// * [`GeopotError::OrderExceedsDegree`] if `order > degree`.
    /// * [`GeopotError::DegreeOrderOutOfRange`] if `degree` exceeds the table capacity or
    ///   the normalization table bounds.
    pub fn compute(
        &mut self,
        ep: f64,
        norms: &NormalizationTable,
        degree: usize,
        order: usize,
    ) -> Result<(), GeopotError> {
        if order > degree {
            return Err(GeopotError::OrderExceedsDegree { degree, order });
        }
        if degree > self.capacity() || (degree >= 2 && degree > norms.max_degree()) {
            return Err(GeopotError::DegreeOrderOutOfRange { degree, order });
        }

        let p = &mut self.p;
        p.fill(0.0);
        self.ep = ep;

        p[(0, 0)] = 1.0;
        p[(1, 1)] = SQRT3;
        p[(1, 0)] = SQRT3 * ep;

        for n in 2..=degree {
            let nf = n as f64;
            let n2m1 = 2.0 * nf - 1.0;

            // diagonal and sub-diagonal; p(n, n+1), p(n, n+2) stay at zero
            p[(n, n)] = norms.norm11(n) * p[(n - 1, n - 1)] * n2m1;
            p[(n, n - 1)] = norms.normn1(n, n - 1) * ep * p[(n, n)];

            p[(n, 0)] = (n2m1 * ep * norms.norm1(n) * p[(n - 1, 0)]
                - (nf - 1.0) * norms.norm2(n) * p[(n - 2, 0)])
                / nf;
            p[(n, 1)] = (n2m1 * ep * norms.norm1m(n, 1) * p[(n - 1, 1)]
                - nf * norms.norm2m(n, 1) * p[(n - 2, 1)])
                / (nf - 1.0);

            if order > 0 {
                for m in 2..=n.saturating_sub(2) {
                    let mf = m as f64;
                    p[(n, m)] = (n2m1 * ep * norms.norm1m(n, m) * p[(n - 1, m)]
                        - (nf - 1.0 + mf) * norms.norm2m(n, m) * p[(n - 2, m)])
                        / (nf - mf);
                }
            }
        }

        Ok(())
    }

    /// `p(n, m)`, or 0 above the diagonal and outside the table.
    #[inline]
    pub fn value(&self, n: usize, m: usize) -> f64 {
        self.p.get(n, m).unwrap_or(0.0)
    }

    /// Fully normalized `P̄nm(sin φ)`, restoring the `cosᵐ φ` factor.
    pub fn normalized(&self, n: usize, m: usize) -> f64 {
        let cos_lat = (1.0 - self.ep * self.ep).max(0.0).sqrt();
        self.value(n, m) * cos_lat.powi(m as i32)
    }

    pub(crate) fn table(&self) -> &TriangularTable {
        &self.p
    }
}
