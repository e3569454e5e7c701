//! # Triangular (degree, order) storage
//!
//! Harmonic quantities live on the triangle `0 ≤ m ≤ n ≤ N`. [`TriangularTable`] stores
//! such a triangle row by row in a single contiguous buffer, optionally with a few
//! **padding columns** past the diagonal (`m = n+1, n+2, …`) that recursions read as
//! exact zeros.
//!
//! ```text
//! n = 0 : [ (0,0) | pad… ]
//! n = 1 : [ (1,0) (1,1) | pad… ]
//! n = 2 : [ (2,0) (2,1) (2,2) | pad… ]
//! ```
//!
//! Indices are zero-based and bounds are checked: the [`Index`] impls panic like
//! `nalgebra` does on out-of-range access, [`TriangularTable::get`] and
//! [`TriangularTable::set`] report them as `None` / [`GeopotError`].
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::geopot_errors::GeopotError;

/// Row-major triangular table of `f64` indexed by `(degree, order)`.
///
/// Row `n` holds `n + 1 + padding` values. The serialized form is the list of rows,
/// which keeps the plain-data interface readable (`[[c00], [c10, c11], …]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct TriangularTable {
    max_degree: usize,
    padding: usize,
    values: Vec<f64>,
}

impl TriangularTable {
    /// Zero-filled triangle for degrees `0..=max_degree`, no padding.
    pub fn zeros(max_degree: usize) -> Self {
        Self::with_padding(max_degree, 0)
    }

    /// Zero-filled triangle with `padding` extra columns past the diagonal of every row.
    pub fn with_padding(max_degree: usize, padding: usize) -> Self {
        let len = Self::row_offset(max_degree + 1, padding);
        TriangularTable {
            max_degree,
            padding,
            values: vec![0.0; len],
        }
    }

    /// Build a table from explicit rows.
    ///
    /// The padding is inferred from the first row (`padding = rows[0].len() - 1`) and
    /// every row `n` must then hold exactly `n + 1 + padding` values.
    ///
    /// Errors
    /// ------
    /// * [`GeopotError::InvalidParameter`] if `rows` is empty or a row has the wrong length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, GeopotError> {
        let first = rows
            .first()
            .ok_or_else(|| GeopotError::InvalidParameter("empty triangular table".into()))?;
        if first.is_empty() {
            return Err(GeopotError::InvalidParameter(
                "degree 0 row of a triangular table cannot be empty".into(),
            ));
        }
        let padding = first.len() - 1;
        let max_degree = rows.len() - 1;

        let mut values = Vec::with_capacity(Self::row_offset(max_degree + 1, padding));
        for (n, row) in rows.into_iter().enumerate() {
            if row.len() != n + 1 + padding {
                return Err(GeopotError::InvalidParameter(format!(
                    "row {n} of triangular table has {} values, expected {}",
                    row.len(),
                    n + 1 + padding
                )));
            }
            values.extend(row);
        }

        Ok(TriangularTable {
            max_degree,
            padding,
            values,
        })
    }

    /// Rows of the table, padding included.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..=self.max_degree).map(|n| self.row(n).to_vec()).collect()
    }

    #[inline]
    fn row_offset(n: usize, padding: usize) -> usize {
        n * (n + 1) / 2 + n * padding
    }

    #[inline]
    fn offset(&self, n: usize, m: usize) -> Option<usize> {
        (n <= self.max_degree && m <= n + self.padding)
            .then(|| Self::row_offset(n, self.padding) + m)
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Value at `(n, m)`, or `None` outside the stored triangle.
    #[inline]
    pub fn get(&self, n: usize, m: usize) -> Option<f64> {
        self.offset(n, m).map(|i| self.values[i])
    }

    /// Overwrite the value at `(n, m)`.
    ///
    /// Errors
    /// ------
    /// * [`GeopotError::DegreeOrderOutOfRange`] if `(n, m)` is not stored in this table.
    pub fn set(&mut self, n: usize, m: usize, value: f64) -> Result<(), GeopotError> {
        let i = self
            .offset(n, m)
            .ok_or(GeopotError::DegreeOrderOutOfRange {
                degree: n,
                order: m,
            })?;
        self.values[i] = value;
        Ok(())
    }

    /// Row `n` including its padding columns.
    ///
    /// # Panics
    ///
    /// Panics if `n > max_degree`.
    pub fn row(&self, n: usize) -> &[f64] {
        assert!(
            n <= self.max_degree,
            "triangular row {n} out of bounds (max degree {})",
            self.max_degree
        );
        let start = Self::row_offset(n, self.padding);
        &self.values[start..start + n + 1 + self.padding]
    }

    pub fn fill(&mut self, value: f64) {
        self.values.fill(value);
    }

    /// Iterate over the triangle `0 ≤ m ≤ n` (padding excluded) as `(n, m, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..=self.max_degree)
            .flat_map(move |n| (0..=n).map(move |m| (n, m, self[(n, m)])))
    }

    /// Copy of the sub-triangle up to `degree`, keeping only orders `m ≤ order`.
    ///
    /// Columns above `order` are zeroed, so the result still has the full
    /// triangular shape of degree `degree`.
    pub fn truncated(&self, degree: usize, order: usize) -> Result<Self, GeopotError> {
        if degree > self.max_degree {
            return Err(GeopotError::DegreeOrderOutOfRange { degree, order });
        }
        let mut out = Self::with_padding(degree, self.padding);
        for (n, m, value) in self.iter().filter(|&(n, m, _)| n <= degree && m <= order) {
            out[(n, m)] = value;
        }
        Ok(out)
    }
}

impl TryFrom<Vec<Vec<f64>>> for TriangularTable {
    type Error = GeopotError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        TriangularTable::from_rows(rows)
    }
}

impl From<TriangularTable> for Vec<Vec<f64>> {
    fn from(table: TriangularTable) -> Self {
        table.to_rows()
    }
}

impl Index<(usize, usize)> for TriangularTable {
    type Output = f64;

    #[inline]
    fn index(&self, (n, m): (usize, usize)) -> &f64 {
        match self.offset(n, m) {
            Some(i) => &self.values[i],
            None => panic!(
                "triangular index ({n}, {m}) out of bounds (max degree {}, padding {})",
                self.max_degree, self.padding
            ),
        }
    }
}

impl IndexMut<(usize, usize)> for TriangularTable {
    #[inline]
    fn index_mut(&mut self, (n, m): (usize, usize)) -> &mut f64 {
        match self.offset(n, m) {
            Some(i) => &mut self.values[i],
            None => panic!(
                "triangular index ({n}, {m}) out of bounds (max degree {}, padding {})",
                self.max_degree, self.padding
            ),
        }
    }
}

#[cfg(test)]
mod triangular_test {
    use super::*;

    #[test]
    fn test_layout_and_padding() {
        let mut t = TriangularTable::with_padding(3, 2);
        assert_eq!(t.row(0).len(), 3);
        assert_eq!(t.row(3).len(), 6);

        t[(3, 3)] = 1.5;
        t[(3, 5)] = 2.5;
        t[(2, 0)] = -1.0;
        assert_eq!(t.get(3, 3), Some(1.5));
        assert_eq!(t.get(3, 5), Some(2.5));
        assert_eq!(t.get(3, 6), None);
        assert_eq!(t.get(4, 0), None);
        assert_eq!(t.row(2), &[-1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut t = TriangularTable::zeros(2);
        assert_eq!(
            t.set(2, 3, 1.0),
            Err(GeopotError::DegreeOrderOutOfRange {
                degree: 2,
                order: 3
            })
        );
        assert!(t.set(2, 2, 1.0).is_ok());
        assert_eq!(t[(2, 2)], 1.0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_panics_above_diagonal() {
        let t = TriangularTable::zeros(2);
        let _ = t[(1, 2)];
    }

    #[test]
    fn test_from_rows() {
        let t = TriangularTable::from_rows(vec![vec![1.0], vec![2.0, 3.0]]).unwrap();
        assert_eq!(t.max_degree(), 1);
        assert_eq!(t.padding(), 0);
        assert_eq!(t[(1, 1)], 3.0);
        assert_eq!(t.to_rows(), vec![vec![1.0], vec![2.0, 3.0]]);

        let padded = TriangularTable::from_rows(vec![vec![1.0, 0.0], vec![2.0, 3.0, 0.0]]).unwrap();
        assert_eq!(padded.padding(), 1);

        assert!(TriangularTable::from_rows(vec![]).is_err());
        assert!(TriangularTable::from_rows(vec![vec![1.0], vec![2.0]]).is_err());
    }

    #[test]
    fn test_iter_and_truncated() {
        let mut t = TriangularTable::zeros(3);
        for n in 0..=3 {
            for m in 0..=n {
                t[(n, m)] = (10 * n + m) as f64;
            }
        }
        assert_eq!(t.iter().count(), 10);

        let cut = t.truncated(2, 1).unwrap();
        assert_eq!(cut.max_degree(), 2);
        assert_eq!(cut[(2, 1)], 21.0);
        assert_eq!(cut[(2, 2)], 0.0);
        assert!(t.truncated(4, 0).is_err());
    }
}
