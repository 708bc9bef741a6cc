use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Matrix is implemented as a single dimensional vector of f64s.
/// This implementation of Matrix is row-major, so each row can be handed out as a contiguous slice.
/// A dense layer stores one row per node and one column per input.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Matrix {
    pub rows: usize,
    pub columns: usize,
    pub values: Vec<f64>
}

impl Matrix {
    /// Create a matrix from a flat row-major vector.
    /// Returns None if the element count does not fit the shape.
    pub fn from_vec(values: Vec<f64>, rows: usize, columns: usize) -> Option<Self> {
        if rows * columns != values.len() {
            return None;
        }

        Some(Matrix {
            rows,
            columns,
            values
        })
    }

    /// Creates a matrix from nested rows.
    /// Returns None for ragged input.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let columns = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != columns) {
            return None;
        }

        let values = rows.iter().flatten().copied().collect();
        Matrix::from_vec(values, rows.len(), columns)
    }

    /// Creates a matrix where every element is zero.
    pub fn new_zeroed(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            values: vec![0.0f64; rows * columns]
        }
    }

    /// Returns a rows x columns matrix filled with values drawn from the uniform distribution.
    /// The generator is supplied by the caller so results can be reproduced.
    pub fn new_randomized_uniform<R: Rng + ?Sized>(rows: usize, columns: usize, uniform: Uniform<f64>, rng: &mut R) -> Self {
        let element_count = rows * columns;
        let values = (0..element_count).map(|_| uniform.sample(rng)).collect();

        Self {
            rows,
            columns,
            values
        }
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns value at specified row and column, None when out of bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.rows || column >= self.columns {
            return None;
        }

        self.values.get(row * self.columns + column).copied()
    }

    /// Returns slice of matrix that is a row of the matrix.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.columns;
        &self.values[start..start + self.columns]
    }

    /// Mutable version of [`Matrix::row`].
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.columns;
        &mut self.values[start..start + self.columns]
    }

    /// Iterates over the rows in order.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> {
        // chunks panics on zero, and a zero-column matrix has no values to hand out anyway
        self.values.chunks(self.columns.max(1)).take(self.rows)
    }

    /// Returns the shape as (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }
}
