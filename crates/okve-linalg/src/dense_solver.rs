//! Dense OKVE solver.
//!
//! Gauss-Jordan elimination over a dense n×m matrix, processed top to
//! bottom. Row i claims the leftmost non-zero column not already claimed
//! by an earlier row, and that column is cleared from every other row.
//! After elimination each pivot row reads
//!
//! ```text
//! x[pivot] + Σ_{j free} A[r][j] · x[j] = b[r]
//! ```
//!
//! so the pivot values follow directly from any choice of free values.

use okve_fields::{Field, Module};
use rand::Rng;
use tracing::debug;

use crate::assignment::{self, BackSubstitution};
use crate::config::SolverConfig;
use crate::dense_matrix::DenseMatrix;
use crate::error::{Result, SolverError};
use crate::system::SystemInfo;

/// Solver for dense systems `A · x = b`.
#[derive(Clone, Debug, Default)]
pub struct DenseLinearSolver {
    config: SolverConfig,
}

/// A system in reduced row echelon form.
struct Reduction<F, V> {
    matrix: DenseMatrix<F>,
    rhs: Vec<V>,
    /// Pivot column claimed by each row.
    row_pivot: Vec<Option<usize>>,
    /// Whether each column is a pivot column.
    is_pivot: Vec<bool>,
}

impl<F: Field, V: Module<F>> Reduction<F, V> {
    fn rank(&self) -> usize {
        self.row_pivot.iter().flatten().count()
    }

    /// Writes every pivot column of `x` from its free columns.
    fn substitute_pivots(&self, x: &mut [V]) {
        for (r, pivot) in self.row_pivot.iter().enumerate() {
            let Some(col) = *pivot else {
                continue;
            };
            let mut value = self.rhs[r].clone();
            for (j, a) in self.matrix.row(r).iter().enumerate() {
                if j != col && !a.is_zero() {
                    value = value - x[j].scale(a);
                }
            }
            x[col] = value;
        }
    }

    /// Like [`Reduction::substitute_pivots`], also reporting whether a pivot
    /// that depends on a free column came out zero.
    fn back_substitute(&self, x: &mut [V]) -> BackSubstitution {
        let mut collapsed = false;
        for (r, pivot) in self.row_pivot.iter().enumerate() {
            let Some(col) = *pivot else {
                continue;
            };
            let mut value = self.rhs[r].clone();
            let mut depends_on_free = false;
            for (j, a) in self.matrix.row(r).iter().enumerate() {
                // Only free columns survive next to the pivot.
                if j == col || a.is_zero() {
                    continue;
                }
                value = value - x[j].scale(a);
                depends_on_free = true;
            }
            collapsed |= depends_on_free && value.is_identity();
            x[col] = value;
        }
        BackSubstitution { collapsed }
    }
}

impl DenseLinearSolver {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `A · x = b`, setting every free column to the identity.
    ///
    /// `matrix` has one row of exactly `m` coefficients per entry of `rhs`.
    /// The entries of `x` are used as shape templates for the solution and
    /// are overwritten only when the system is consistent.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NonInvertiblePivot`] if the field fails to
    /// invert a non-zero pivot.
    ///
    /// # Panics
    ///
    /// Panics if `matrix` and `rhs` differ in length, if a row does not
    /// have `m` entries, or if `x` does not have `m` entries.
    pub fn free_solve<F: Field, V: Module<F>>(
        &self,
        matrix: &[Vec<F>],
        m: usize,
        rhs: &[V],
        x: &mut [V],
    ) -> Result<SystemInfo> {
        let Some(reduction) = eliminate(matrix, m, rhs, x.len())? else {
            return Ok(SystemInfo::Inconsistent);
        };
        assignment::zero_free(x, &reduction.is_pivot);
        reduction.substitute_pivots(x);
        Ok(SystemInfo::Consistent)
    }

    /// Solves `A · x = b` with every free column drawn at random.
    ///
    /// Free columns are uniform non-identity elements, and they are redrawn
    /// while any pivot column that depends on them comes out as the
    /// identity. Pivot columns fully determined by the system keep their
    /// forced value, even when that value is the identity.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NonInvertiblePivot`] if the field fails to
    /// invert a non-zero pivot, and [`SolverError::ResampleLimitExceeded`]
    /// if no draw within the configured bound avoids a zero pivot.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`DenseLinearSolver::free_solve`].
    pub fn full_solve<F, V, R>(
        &self,
        matrix: &[Vec<F>],
        m: usize,
        rhs: &[V],
        x: &mut [V],
        rng: &mut R,
    ) -> Result<SystemInfo>
    where
        F: Field,
        V: Module<F>,
        R: Rng + ?Sized,
    {
        let Some(reduction) = eliminate(matrix, m, rhs, x.len())? else {
            return Ok(SystemInfo::Inconsistent);
        };
        assignment::resample_until_nonzero(&self.config, x, &reduction.is_pivot, rng, |x| {
            reduction.back_substitute(x)
        })?;
        Ok(SystemInfo::Consistent)
    }
}

/// Brings the system into reduced row echelon form.
///
/// Returns `None` as soon as a row reduces to `0 = c` with `c != 0`.
fn eliminate<F: Field, V: Module<F>>(
    matrix: &[Vec<F>],
    m: usize,
    rhs: &[V],
    output_len: usize,
) -> Result<Option<Reduction<F, V>>> {
    let n = rhs.len();
    assert_eq!(matrix.len(), n, "matrix has {} rows, rhs has {n}", matrix.len());
    assert_eq!(output_len, m, "output holds {output_len} values, expected {m}");

    let mut a = DenseMatrix::from_rows(matrix, m);
    let mut b = rhs.to_vec();
    let mut row_pivot = vec![None; n];
    let mut is_pivot = vec![false; m];

    for r in 0..n {
        let Some(col) = (0..m).find(|&c| !is_pivot[c] && !a[(r, c)].is_zero()) else {
            if !b[r].is_identity() {
                debug!(row = r, "row reduces to a non-zero constant");
                return Ok(None);
            }
            continue;
        };

        if !F::IS_GF2 {
            let inv = a[(r, col)]
                .inv()
                .ok_or(SolverError::NonInvertiblePivot { column: col })?;
            a.scale_row(r, &inv);
            b[r] = b[r].scale(&inv);
        }

        for other in 0..n {
            if other == r || a[(other, col)].is_zero() {
                continue;
            }
            let factor = -a[(other, col)].clone();
            a.add_scaled_row(other, r, &factor);
            let delta = b[r].scale(&factor);
            b[other] = b[other].clone() + delta;
        }

        row_pivot[r] = Some(col);
        is_pivot[col] = true;
    }

    let reduction = Reduction {
        matrix: a,
        rhs: b,
        row_pivot,
        is_pivot,
    };
    debug!(rows = n, cols = m, rank = reduction.rank(), "dense elimination finished");
    Ok(Some(reduction))
}
