//! Band matrix storage.
//!
//! Row i has non-zero coefficients only in the window of columns
//! `[s_i, s_i + w)`. Only the window is stored; every other entry is zero.

use okve_fields::{Field, Module, Ring};

use crate::dense_matrix::DenseMatrix;

/// An n×m matrix whose rows are windows of width `w` at per-row offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct BandMatrix<F> {
    /// Window entries, `w` per row, in row-major order.
    data: Vec<F>,
    /// Window offset of each row.
    starts: Vec<usize>,
    num_cols: usize,
    width: usize,
}

impl<F: Ring> BandMatrix<F> {
    /// Builds a band matrix from per-row offsets and windows.
    ///
    /// # Panics
    ///
    /// Panics if `starts` and `rows` differ in length, if a window does not
    /// have `width` entries, or if a window extends past column `num_cols`.
    #[must_use]
    pub fn new(starts: &[usize], num_cols: usize, width: usize, rows: &[Vec<F>]) -> Self {
        assert_eq!(
            starts.len(),
            rows.len(),
            "{} offsets for {} rows",
            starts.len(),
            rows.len()
        );
        let mut data = Vec::with_capacity(rows.len() * width);
        for (i, (&start, row)) in starts.iter().zip(rows).enumerate() {
            assert_eq!(
                row.len(),
                width,
                "band row {i} has {} entries, expected {width}",
                row.len()
            );
            assert!(
                start + width <= num_cols,
                "band row {i} at offset {start} exceeds {num_cols} columns"
            );
            data.extend_from_slice(row);
        }
        Self {
            data,
            starts: starts.to_vec(),
            num_cols,
            width,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.starts.len()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the band width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the first column of a row's window.
    #[must_use]
    pub fn start(&self, row: usize) -> usize {
        self.starts[row]
    }

    /// Returns the window of a row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[F] {
        let offset = row * self.width;
        &self.data[offset..offset + self.width]
    }

    /// Returns the window of a row, mutably.
    pub fn row_mut(&mut self, row: usize) -> &mut [F] {
        let offset = row * self.width;
        &mut self.data[offset..offset + self.width]
    }

    /// Returns the entry at an absolute column, zero outside the window.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> F {
        let start = self.starts[row];
        if col < start || col >= start + self.width {
            return F::zero();
        }
        self.row(row)[col - start].clone()
    }

    /// Adds `scale` times the tail of `source` to `target`.
    ///
    /// The tail covers the source window from absolute column `from_col`
    /// onward, and it must lie inside the target window.
    pub(crate) fn add_scaled_tail(
        &mut self,
        target: usize,
        source: usize,
        from_col: usize,
        scale: &F,
    ) {
        let w = self.width;
        let source_start = self.starts[source];
        let target_start = self.starts[target];
        debug_assert!(source_start <= target_start && from_col >= target_start);
        for col in from_col..source_start + w {
            let entry = &self.data[source * w + col - source_start];
            if entry.is_zero() {
                continue;
            }
            let delta = scale.clone() * entry.clone();
            let slot = target * w + col - target_start;
            self.data[slot] = self.data[slot].clone() + delta;
        }
    }

    /// Scales a row's window.
    pub fn scale_row(&mut self, row: usize, scale: &F) {
        for entry in self.row_mut(row) {
            *entry = entry.clone() * scale.clone();
        }
    }

    /// Expands every row to its full length of `num_cols` entries.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<F>> {
        (0..self.num_rows())
            .map(|i| {
                let start = self.starts[i];
                let mut row = vec![F::zero(); self.num_cols];
                row[start..start + self.width].clone_from_slice(self.row(i));
                row
            })
            .collect()
    }

    /// Converts to a dense matrix.
    #[must_use]
    pub fn to_dense(&self) -> DenseMatrix<F> {
        DenseMatrix::from_rows(&self.to_rows(), self.num_cols)
    }

    /// Matrix-vector multiply: y = A * x.
    #[must_use]
    pub fn mv(&self, x: &[F]) -> Vec<F> {
        assert_eq!(x.len(), self.num_cols);
        (0..self.num_rows())
            .map(|i| {
                let start = self.starts[i];
                self.row(i)
                    .iter()
                    .zip(&x[start..start + self.width])
                    .fold(F::zero(), |acc, (a, b)| acc + a.clone() * b.clone())
            })
            .collect()
    }
}

impl<F: Field> BandMatrix<F> {
    /// Checks `A * x = rhs` over a module.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions of `x` or `rhs` do not match the matrix.
    #[must_use]
    pub fn is_solution<V: Module<F>>(&self, x: &[V], rhs: &[V]) -> bool {
        assert_eq!(x.len(), self.num_cols);
        assert_eq!(rhs.len(), self.num_rows());
        rhs.iter().enumerate().all(|(i, b)| {
            let start = self.starts[i];
            let lhs = self
                .row(i)
                .iter()
                .zip(&x[start..start + self.width])
                .filter(|(a, _)| !a.is_zero())
                .fold(b.identity_like(), |acc, (a, v)| acc + v.scale(a));
            lhs == *b
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okve_fields::Zp64;

    type F5 = Zp64<5>;

    fn f5(values: &[u64]) -> Vec<F5> {
        values.iter().map(|&v| F5::new(v)).collect()
    }

    fn sample() -> BandMatrix<F5> {
        BandMatrix::new(&[0, 2, 1], 5, 3, &[f5(&[1, 2, 0]), f5(&[3, 0, 4]), f5(&[0, 1, 1])])
    }

    #[test]
    fn test_accessors() {
        let band = sample();
        assert_eq!(band.num_rows(), 3);
        assert_eq!(band.num_cols(), 5);
        assert_eq!(band.width(), 3);
        assert_eq!(band.start(1), 2);
        assert_eq!(band.get(1, 4), F5::new(4));
        assert_eq!(band.get(1, 0), F5::new(0));
    }

    #[test]
    fn test_to_rows() {
        assert_eq!(
            sample().to_rows(),
            vec![f5(&[1, 2, 0, 0, 0]), f5(&[0, 0, 3, 0, 4]), f5(&[0, 0, 1, 1, 0])]
        );
    }

    #[test]
    fn test_mv_matches_dense() {
        let band = sample();
        let x = f5(&[1, 2, 3, 4, 0]);
        assert_eq!(band.mv(&x), band.to_dense().mv(&x));
    }

    #[test]
    fn test_add_scaled_tail() {
        let mut band = BandMatrix::new(&[0, 1], 4, 3, &[f5(&[1, 2, 3]), f5(&[4, 1, 1])]);
        // row1 += 2 * row0 over columns 1 and 2
        band.add_scaled_tail(1, 0, 1, &F5::new(2));
        assert_eq!(band.row(1), &f5(&[3, 2, 1])[..]);
        assert_eq!(band.row(0), &f5(&[1, 2, 3])[..]);
    }

    #[test]
    fn test_zero_width() {
        let band: BandMatrix<F5> = BandMatrix::new(&[0, 3], 3, 0, &[vec![], vec![]]);
        assert_eq!(band.to_rows(), vec![f5(&[0, 0, 0]), f5(&[0, 0, 0])]);
    }

    #[test]
    #[should_panic(expected = "band row 1 at offset 3 exceeds 5 columns")]
    fn test_window_past_last_column_panics() {
        let _ = BandMatrix::new(&[0, 3], 5, 3, &[f5(&[1, 1, 1]), f5(&[1, 1, 1])]);
    }
}
