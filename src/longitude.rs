//! # Longitude terms by angle addition
//!
//! The tesseral part of the expansion needs `cos(mλ)` and `sin(mλ)` for every order
//! `m ≤ M`. Instead of calling the trigonometric functions `M` times, the sequence is
//! generated from its first element with the angle-addition formulas:
//!
//! ```text
//! c̃0 = 1        s̃0 = 0
//! c̃1 = x/r      s̃1 = y/r
//! c̃(m+1) = c̃1·c̃m - s̃1·s̃m
//! s̃(m+1) = s̃1·c̃m + c̃1·s̃m
//! ```
//!
//! Because the seed is `(x/r, y/r) = cos φ · (cos λ, sin λ)`, the terms are really
//! `cosᵐφ · cos(mλ)` and `cosᵐφ · sin(mλ)`: they carry exactly the latitude factor
//! that [`LegendreTable`](crate::legendre::LegendreTable) leaves out. For a position in
//! the equatorial plane the seed is a unit vector and `c̃m² + s̃m² = 1`.

/// Per-evaluation `(c̃m, s̃m)` sequences for `m = 0..=capacity`.
#[derive(Debug, Clone)]
pub struct LongitudeTerms {
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl LongitudeTerms {
    pub fn new(max_order: usize) -> Self {
        let len = max_order.max(1) + 1;
        LongitudeTerms {
            cos: vec![0.0; len],
            sin: vec![0.0; len],
        }
    }

    /// Largest order this sequence can hold.
    pub fn capacity(&self) -> usize {
        self.cos.len() - 1
    }

    /// Fill the sequence from the direction cosines `x/r`, `y/r`.
    ///
    /// Every slot up to [`capacity`](Self::capacity) is overwritten.
    pub fn compute(&mut self, xovr: f64, yovr: f64) {
        self.cos[0] = 1.0;
        self.sin[0] = 0.0;
        self.cos[1] = xovr;
        self.sin[1] = yovr;

        for i in 1..self.capacity() {
            self.cos[i + 1] = xovr * self.cos[i] - yovr * self.sin[i];
            self.sin[i + 1] = yovr * self.cos[i] + xovr * self.sin[i];
        }
    }

    /// `c̃m = cosᵐφ · cos(mλ)`
    #[inline]
    pub fn cos(&self, m: usize) -> f64 {
        self.cos[m]
    }

    /// `s̃m = cosᵐφ · sin(mλ)`
    #[inline]
    pub fn sin(&self, m: usize) -> f64 {
        self.sin[m]
    }
}
