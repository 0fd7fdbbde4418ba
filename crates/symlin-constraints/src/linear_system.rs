//! The extracted linear system `A u = b`.

use std::ops::Index;

/// Coefficient matrix and constant vector produced by extraction.
///
/// Row `r` reads `Σ_c A[r][c] * u_c == b[r]`, where `u` is the ordering of
/// unknowns used for extraction. Entries are expressions, so parameters may
/// remain in both coefficients and constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearSystem<E> {
    /// Coefficients in row-major order.
    coefficients: Vec<E>,
    /// One constant per row.
    constants: Vec<E>,
    /// Number of columns.
    num_cols: usize,
}

impl<E> LinearSystem<E> {
    pub(crate) fn with_capacity(num_rows: usize, num_cols: usize) -> Self {
        Self {
            coefficients: Vec::with_capacity(num_rows * num_cols),
            constants: Vec::with_capacity(num_rows),
            num_cols,
        }
    }

    pub(crate) fn push_row(&mut self, row: Vec<E>, constant: E) {
        debug_assert_eq!(row.len(), self.num_cols);
        self.coefficients.extend(row);
        self.constants.push(constant);
    }

    /// Returns the number of rows, one per constraint.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.constants.len()
    }

    /// Returns the number of columns, one per unknown.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the coefficient at `(row, col)`.
    #[must_use]
    pub fn coefficient(&self, row: usize, col: usize) -> Option<&E> {
        if row < self.num_rows() && col < self.num_cols {
            Some(&self.coefficients[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns the coefficients of a row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> &[E] {
        assert!(row < self.num_rows(), "row {row} out of range");
        let start = row * self.num_cols;
        &self.coefficients[start..start + self.num_cols]
    }

    /// Returns the constant of a row.
    #[must_use]
    pub fn constant(&self, row: usize) -> Option<&E> {
        self.constants.get(row)
    }

    /// Returns all constants in row order.
    #[must_use]
    pub fn constants(&self) -> &[E] {
        &self.constants
    }

    /// Iterates over `(coefficients, constant)` pairs in row order.
    pub fn rows(&self) -> impl Iterator<Item = (&[E], &E)> + '_ {
        (0..self.num_rows()).map(move |r| (self.row(r), &self.constants[r]))
    }

    /// Splits into row-major coefficients, constants and column count.
    #[must_use]
    pub fn into_parts(self) -> (Vec<E>, Vec<E>, usize) {
        (self.coefficients, self.constants, self.num_cols)
    }
}

impl<E> Index<(usize, usize)> for LinearSystem<E> {
    type Output = E;

    fn index(&self, (row, col): (usize, usize)) -> &E {
        assert!(col < self.num_cols, "column {col} out of range");
        &self.coefficients[row * self.num_cols + col]
    }
}
