//! Working matrix for the Wagner-Fischer dynamic program
//!
//! One contiguous allocation of `(m+1) * (n+1)` cells, indexed row-major as
//! `i * (n+1) + j`. The buffer is obtained with a fallible reservation, so a
//! failure leaves nothing behind, and it is released when the matrix drops.

use crate::error::{DistanceError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    cells: Vec<usize>,
    rows: usize,
    cols: usize,
}

impl DistanceMatrix {
    /// Allocate the matrix for prefixes of lengths `m` and `n` and seed the
    /// base cases: `d[i][0] = i` and `d[0][j] = j`.
    pub fn with_base_cases(m: usize, n: usize) -> Result<Self> {
        let rows = m.checked_add(1);
        let cols = n.checked_add(1);
        let (rows, cols, len) = match (rows, cols) {
            (Some(rows), Some(cols)) => match rows.checked_mul(cols) {
                Some(len) => (rows, cols, len),
                None => return Err(DistanceError::resource("distance matrix", usize::MAX)),
            },
            _ => return Err(DistanceError::resource("distance matrix", usize::MAX)),
        };

        let mut cells: Vec<usize> = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(DistanceError::from_reserve("distance matrix", len))?;
        cells.resize(len, 0);

        let mut matrix = Self { cells, rows, cols };
        for i in 0..rows {
            matrix.set(i, 0, i);
        }
        for j in 0..cols {
            matrix.set(0, j, j);
        }
        Ok(matrix)
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.cols);
        i * self.cols + j
    }

    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.cells[self.index(i, j)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: usize) {
        let idx = self.index(i, j);
        self.cells[idx] = value;
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The bottom-right cell: distance between the full sequences.
    #[must_use]
    pub fn last(&self) -> usize {
        self.get(self.rows - 1, self.cols - 1)
    }
}
