//! Dense matrix used as the elimination working copy.
//!
//! Rows are stored contiguously in row-major order, so a whole-row update
//! touches one cache-friendly slice.

use std::ops::{Index, IndexMut};

use okve_fields::{Field, Module, Ring};

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<R> {
    /// Matrix entries in row-major order.
    data: Vec<R>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<R: Ring> DenseMatrix<R> {
    /// Copies rows of exactly `num_cols` entries into a new matrix.
    ///
    /// The column count is explicit so that a matrix with no rows still
    /// knows its width.
    ///
    /// # Panics
    ///
    /// Panics if any row has a length other than `num_cols`.
    #[must_use]
    pub fn from_rows(rows: &[Vec<R>], num_cols: usize) -> Self {
        let mut data = Vec::with_capacity(rows.len() * num_cols);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                num_cols,
                "row {i} has {} entries, expected {num_cols}",
                row.len()
            );
            data.extend_from_slice(row);
        }
        Self {
            data,
            num_rows: rows.len(),
            num_cols,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[R] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a mutable slice of the specified row.
    pub fn row_mut(&mut self, row: usize) -> &mut [R] {
        let start = row * self.num_cols;
        &mut self.data[start..start + self.num_cols]
    }

    /// Matrix-vector multiply: y = A * x.
    #[must_use]
    pub fn mv(&self, x: &[R]) -> Vec<R> {
        assert_eq!(x.len(), self.num_cols);
        (0..self.num_rows)
            .map(|row| {
                self.row(row)
                    .iter()
                    .zip(x.iter())
                    .fold(R::zero(), |acc, (a, b)| acc + a.clone() * b.clone())
            })
            .collect()
    }

    /// Scales a row by a scalar.
    pub fn scale_row(&mut self, row: usize, scale: &R) {
        for entry in self.row_mut(row) {
            *entry = entry.clone() * scale.clone();
        }
    }

    /// Adds a scaled row to another: row[target] += scale * row[source].
    pub fn add_scaled_row(&mut self, target: usize, source: usize, scale: &R) {
        for k in 0..self.num_cols {
            let val = self[(source, k)].clone() * scale.clone();
            self[(target, k)] = self[(target, k)].clone() + val;
        }
    }
}

impl<F: Field> DenseMatrix<F> {
    /// Checks `A * x = rhs` over a module.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions of `x` or `rhs` do not match the matrix.
    #[must_use]
    pub fn is_solution<V: Module<F>>(&self, x: &[V], rhs: &[V]) -> bool {
        assert_eq!(x.len(), self.num_cols);
        assert_eq!(rhs.len(), self.num_rows);
        rhs.iter().enumerate().all(|(row, b)| {
            let lhs = self
                .row(row)
                .iter()
                .zip(x)
                .filter(|(a, _)| !a.is_zero())
                .fold(b.identity_like(), |acc, (a, v)| acc + v.scale(a));
            lhs == *b
        })
    }
}

impl<R> Index<(usize, usize)> for DenseMatrix<R> {
    type Output = R;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<R> IndexMut<(usize, usize)> for DenseMatrix<R> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okve_fields::{BitString, Gf2, Zp64};

    type F7 = Zp64<7>;

    fn f7(rows: &[&[u64]]) -> Vec<Vec<F7>> {
        rows.iter()
            .map(|row| row.iter().map(|&v| F7::new(v)).collect())
            .collect()
    }

    #[test]
    fn test_empty_keeps_width() {
        let m: DenseMatrix<F7> = DenseMatrix::from_rows(&[], 5);
        assert_eq!(m.num_rows(), 0);
        assert_eq!(m.num_cols(), 5);
    }

    #[test]
    #[should_panic(expected = "row 1 has 2 entries")]
    fn test_ragged_rows_panic() {
        let _ = DenseMatrix::from_rows(&f7(&[&[1, 2, 3], &[1, 2]]), 3);
    }

    #[test]
    fn test_mv() {
        let m = DenseMatrix::from_rows(&f7(&[&[1, 2, 3], &[4, 5, 6]]), 3);
        let x = vec![F7::new(1), F7::new(2), F7::new(3)];
        // [14, 32] mod 7
        assert_eq!(m.mv(&x), vec![F7::new(0), F7::new(4)]);
    }

    #[test]
    fn test_row_operations() {
        let mut m = DenseMatrix::from_rows(&f7(&[&[1, 2], &[3, 4]]), 2);
        m.scale_row(0, &F7::new(3));
        assert_eq!(m.row(0), &[F7::new(3), F7::new(6)]);
        m.add_scaled_row(1, 0, &F7::new(6));
        // [3, 4] + 6 * [3, 6] = [21, 40] = [0, 5]
        assert_eq!(m.row(1), &[F7::new(0), F7::new(5)]);
    }

    #[test]
    fn test_is_solution_over_bit_strings() {
        let m = DenseMatrix::from_rows(
            &[vec![Gf2::ONE, Gf2::ONE], vec![Gf2::ZERO, Gf2::ONE]],
            2,
        );
        let x = vec![
            BitString::from_bits(&[true, false]),
            BitString::from_bits(&[true, true]),
        ];
        let good = vec![
            BitString::from_bits(&[false, true]),
            BitString::from_bits(&[true, true]),
        ];
        let bad = vec![good[1].clone(), good[1].clone()];
        assert!(m.is_solution(&x, &good));
        assert!(!m.is_solution(&x, &bad));
    }
}
