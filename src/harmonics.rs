//! # Harmonic accumulation
//!
//! Folds the coefficient table against the Legendre and longitude tables into the four
//! scalar sums of Gottlieb's formulation. With `ρ = Rₑ/r`, for every degree `n = 2..=N`:
//!
//! ```text
//! hₙ  = normn10[n] · p(n,1) · C̄n0
//! gₙ  = (n+1) · p(n,0) · C̄n0
//!
//! for m = 1..=min(n, M):
//!   b̃     = C̄nm·c̃m     + S̄nm·s̃m
//!   b̃₋₁   = C̄nm·c̃(m-1) + S̄nm·s̃(m-1)
//!   ã₋₁   = C̄nm·s̃(m-1) - S̄nm·c̃(m-1)
//!   hₙ  += normn1[n,m] · p(n,m+1) · b̃
//!   gₙ  += (n+m+1) · p(n,m) · b̃
//!   jₙ  += m · p(n,m) · b̃₋₁
//!   kₙ  -= m · p(n,m) · ã₋₁
//!
//! H += ρⁿ hₙ;  GM += ρⁿ gₙ;  J += ρⁿ jₙ;  K += ρⁿ kₙ
//! ```
//!
//! starting from `GM = 1` (central term) and `H = J = K = 0`. `ρⁿ` is advanced by one
//! multiplication per degree.
//!
//! The summation order (increasing degree, then increasing order) is fixed: it is what
//! makes two evaluations agree bit for bit.
use serde::{Deserialize, Serialize};

use crate::gravity_model::GravityModel;
use crate::legendre::LegendreTable;
use crate::longitude::LongitudeTerms;
use crate::normalization::NormalizationTable;

/// The four accumulated sums consumed by the acceleration assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicSums {
    /// Radial sum, seeded with the point-mass term 1.
    pub gm: f64,
    /// Sum along the body-fixed z axis.
    pub h: f64,
    /// Sum along the body-fixed x axis.
    pub j: f64,
    /// Sum along the body-fixed y axis.
    pub k: f64,
}

impl Default for HarmonicSums {
    fn default() -> Self {
        HarmonicSums {
            gm: 1.0,
            h: 0.0,
            j: 0.0,
            k: 0.0,
        }
    }
}

impl HarmonicSums {
    /// Accumulate the sums for degrees `2..=degree` and orders `≤ order`.
    ///
    /// The caller guarantees that `legendre` and `longitude` were computed for the same
    /// position, that every table covers `(degree, order)`, and that `reor = Rₑ/r`.
    pub fn accumulate(
        model: &GravityModel,
        norms: &NormalizationTable,
        legendre: &LegendreTable,
        longitude: &LongitudeTerms,
        reor: f64,
        degree: usize,
        order: usize,
    ) -> Self {
        let mut sums = HarmonicSums::default();
        let mut reorn = reor;

        for n in 2..=degree {
            reorn *= reor;
            let nf = n as f64;
            let cn0 = model.c(n, 0);

            let mut sumhn = norms.normn10(n) * legendre.value(n, 1) * cn0;
            let mut sumgmn = (nf + 1.0) * legendre.value(n, 0) * cn0;

            if order > 0 {
                let mut sumjn = 0.0;
                let mut sumkn = 0.0;

                for m in 1..=n.min(order) {
                    let mf = m as f64;
                    let pnm = legendre.value(n, m);
                    let cnm = model.c(n, m);
                    let snm = model.s(n, m);
                    let ctmm1 = longitude.cos(m - 1);
                    let stmm1 = longitude.sin(m - 1);

                    let bnmtil = cnm * longitude.cos(m) + snm * longitude.sin(m);
                    let bnmtm1 = cnm * ctmm1 + snm * stmm1;
                    let anmtm1 = cnm * stmm1 - snm * ctmm1;

                    sumhn += norms.normn1(n, m) * legendre.value(n, m + 1) * bnmtil;
                    sumgmn += (nf + mf + 1.0) * pnm * bnmtil;
                    sumjn += mf * pnm * bnmtm1;
                    sumkn -= mf * pnm * anmtm1;
                }

                sums.j += reorn * sumjn;
                sums.k += reorn * sumkn;
            }

            sums.h += reorn * sumhn;
            sums.gm += reorn * sumgmn;
        }

        sums
    }
}
