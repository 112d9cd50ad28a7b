//! Band OKVE solver.
//!
//! Rows are processed in ascending `(s_i, i)` order. Every earlier pivot
//! row has its window start at or before the current one, and after
//! normalization its non-zero entries sit between its pivot and the end of
//! its window. Reducing the current window left to right against those
//! pivots therefore never writes outside the window, and elimination runs
//! in O(n·w²) instead of O(n²·m).
//!
//! Elimination only clears pivot columns in rows processed later, so back
//! substitution walks the pivots in reverse processing order.

use std::collections::BTreeMap;

use okve_fields::{Field, Module};
use rand::Rng;
use tracing::debug;

use crate::assignment::{self, BackSubstitution};
use crate::band_matrix::BandMatrix;
use crate::config::SolverConfig;
use crate::dense_solver::DenseLinearSolver;
use crate::error::{Result, SolverError};
use crate::system::SystemInfo;

/// Solver for band systems `A · x = b`.
#[derive(Clone, Debug, Default)]
pub struct BandLinearSolver {
    dense: DenseLinearSolver,
}

/// A band system after forward elimination.
struct BandReduction<F, V> {
    band: BandMatrix<F>,
    rhs: Vec<V>,
    /// Pivot rows in the order they were processed.
    pivot_rows: Vec<usize>,
    /// Absolute pivot column of each row.
    row_pivot: Vec<Option<usize>>,
    /// Whether each column is a pivot column.
    is_pivot: Vec<bool>,
}

impl<F: Field, V: Module<F>> BandReduction<F, V> {
    /// Writes every pivot column of `x`, latest pivot first.
    fn substitute_pivots(&self, x: &mut [V]) {
        for &row in self.pivot_rows.iter().rev() {
            let Some(col) = self.row_pivot[row] else {
                continue;
            };
            let start = self.band.start(row);
            let mut value = self.rhs[row].clone();
            for (k, a) in self.band.row(row).iter().enumerate() {
                if start + k != col && !a.is_zero() {
                    value = value - x[start + k].scale(a);
                }
            }
            x[col] = value;
        }
    }

    /// Like [`BandReduction::substitute_pivots`], also reporting whether a
    /// pivot that depends on the free columns came out zero.
    ///
    /// Without `dependence`, a pivot counts as depending on the free
    /// columns when any of its row entries reaches one, directly or through
    /// a later pivot. Entries can cancel, so `dependence` may supply the
    /// exact answer from [`BandReduction::free_dependence`].
    fn back_substitute(&self, x: &mut [V], dependence: Option<&[bool]>) -> BackSubstitution {
        let mut reaches_free = vec![false; self.is_pivot.len()];
        let mut collapsed = false;
        for &row in self.pivot_rows.iter().rev() {
            let Some(col) = self.row_pivot[row] else {
                continue;
            };
            let start = self.band.start(row);
            let mut value = self.rhs[row].clone();
            for (k, a) in self.band.row(row).iter().enumerate() {
                let j = start + k;
                if j == col || a.is_zero() {
                    continue;
                }
                value = value - x[j].scale(a);
                reaches_free[col] |= !self.is_pivot[j] || reaches_free[j];
            }
            let depends = dependence.map_or(reaches_free[col], |d| d[col]);
            collapsed |= depends && value.is_identity();
            x[col] = value;
        }
        BackSubstitution { collapsed }
    }

    /// Returns, per column, whether its value changes with the free columns.
    ///
    /// Expands every pivot into a linear form over the free columns. Full
    /// solves call this only after some pivot has come out zero.
    fn free_dependence(&self) -> Vec<bool> {
        let m = self.is_pivot.len();
        let mut forms: Vec<BTreeMap<usize, F>> = vec![BTreeMap::new(); m];
        for &row in self.pivot_rows.iter().rev() {
            let Some(col) = self.row_pivot[row] else {
                continue;
            };
            let start = self.band.start(row);
            let mut form = BTreeMap::new();
            for (k, a) in self.band.row(row).iter().enumerate() {
                let j = start + k;
                if j == col || a.is_zero() {
                    continue;
                }
                let factor = -a.clone();
                if self.is_pivot[j] {
                    for (&free, coeff) in &forms[j] {
                        accumulate(&mut form, free, factor.clone() * coeff.clone());
                    }
                } else {
                    accumulate(&mut form, j, factor);
                }
            }
            forms[col] = form;
        }
        forms.iter().map(|form| !form.is_empty()).collect()
    }
}

fn accumulate<F: Field>(form: &mut BTreeMap<usize, F>, col: usize, coeff: F) {
    let sum = match form.remove(&col) {
        Some(existing) => existing + coeff,
        None => coeff,
    };
    if !sum.is_zero() {
        form.insert(col, sum);
    }
}

impl BandLinearSolver {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self {
            dense: DenseLinearSolver::new(config),
        }
    }

    /// Returns the solver configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        self.dense.config()
    }

    /// Solves `A · x = b` for a band matrix, setting free columns to the
    /// identity.
    ///
    /// The entries of `x` are used as shape templates for the solution and
    /// are overwritten only when the system is consistent. A row whose
    /// window is entirely zero is accepted when its right-hand side is the
    /// identity and has no further effect.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NonInvertiblePivot`] if the field fails to
    /// invert a non-zero pivot.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` does not have one entry per row, or if `x` does not
    /// have one entry per column.
    pub fn free_solve<F: Field, V: Module<F>>(
        &self,
        band: &BandMatrix<F>,
        rhs: &[V],
        x: &mut [V],
    ) -> Result<SystemInfo> {
        let Some(reduction) = eliminate(band, rhs, x.len())? else {
            return Ok(SystemInfo::Inconsistent);
        };
        assignment::zero_free(x, &reduction.is_pivot);
        reduction.substitute_pivots(x);
        Ok(SystemInfo::Consistent)
    }

    /// Solves `A · x = b` for a band matrix with random free columns.
    ///
    /// Free columns are uniform non-identity elements, redrawn while a
    /// pivot column that depends on them comes out as the identity.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NonInvertiblePivot`] if the field fails to
    /// invert a non-zero pivot, and [`SolverError::ResampleLimitExceeded`]
    /// if no draw within the configured bound avoids a zero pivot.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`BandLinearSolver::free_solve`].
    pub fn full_solve<F, V, R>(
        &self,
        band: &BandMatrix<F>,
        rhs: &[V],
        x: &mut [V],
        rng: &mut R,
    ) -> Result<SystemInfo>
    where
        F: Field,
        V: Module<F>,
        R: Rng + ?Sized,
    {
        let Some(reduction) = eliminate(band, rhs, x.len())? else {
            return Ok(SystemInfo::Inconsistent);
        };
        let mut dependence: Option<Vec<bool>> = None;
        assignment::resample_until_nonzero(self.config(), x, &reduction.is_pivot, rng, |x| {
            let outcome = reduction.back_substitute(x, dependence.as_deref());
            if !outcome.collapsed || dependence.is_some() {
                return outcome;
            }
            let exact = dependence.insert(reduction.free_dependence());
            reduction.back_substitute(x, Some(exact.as_slice()))
        })?;
        Ok(SystemInfo::Consistent)
    }

    /// Free solve of a band-shaped system through dense elimination.
    ///
    /// Used for systems that are band-structured but have more rows than
    /// the band layout is meant for.
    ///
    /// # Errors
    ///
    /// See [`DenseLinearSolver::free_solve`].
    pub fn free_solve_rectangular<F: Field, V: Module<F>>(
        &self,
        band: &BandMatrix<F>,
        rhs: &[V],
        x: &mut [V],
    ) -> Result<SystemInfo> {
        self.dense
            .free_solve(&band.to_rows(), band.num_cols(), rhs, x)
    }

    /// Full solve of a band-shaped system through dense elimination.
    ///
    /// # Errors
    ///
    /// See [`DenseLinearSolver::full_solve`].
    pub fn full_solve_rectangular<F, V, R>(
        &self,
        band: &BandMatrix<F>,
        rhs: &[V],
        x: &mut [V],
        rng: &mut R,
    ) -> Result<SystemInfo>
    where
        F: Field,
        V: Module<F>,
        R: Rng + ?Sized,
    {
        self.dense
            .full_solve(&band.to_rows(), band.num_cols(), rhs, x, rng)
    }
}

/// Forward elimination in `(s_i, i)` order.
///
/// Returns `None` as soon as a window reduces to zero against a non-zero
/// right-hand side.
fn eliminate<F: Field, V: Module<F>>(
    band: &BandMatrix<F>,
    rhs: &[V],
    output_len: usize,
) -> Result<Option<BandReduction<F, V>>> {
    let n = band.num_rows();
    let m = band.num_cols();
    assert_eq!(rhs.len(), n, "band has {n} rows, rhs has {}", rhs.len());
    assert_eq!(output_len, m, "output holds {output_len} values, expected {m}");

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| band.start(i));

    let mut band = band.clone();
    let mut rhs = rhs.to_vec();
    // Row that owns each pivot column.
    let mut column_owner: Vec<Option<usize>> = vec![None; m];
    let mut row_pivot = vec![None; n];
    let mut pivot_rows = Vec::with_capacity(n.min(m));

    for &i in &order {
        let start = band.start(i);
        for col in start..start + band.width() {
            let Some(owner) = column_owner[col] else {
                continue;
            };
            let entry = &band.row(i)[col - start];
            if entry.is_zero() {
                continue;
            }
            let factor = -entry.clone();
            band.add_scaled_tail(i, owner, col, &factor);
            let delta = rhs[owner].scale(&factor);
            rhs[i] = rhs[i].clone() + delta;
        }

        let Some(k) = band.row(i).iter().position(|a| !a.is_zero()) else {
            if !rhs[i].is_identity() {
                debug!(row = i, start, "band row reduces to a non-zero constant");
                return Ok(None);
            }
            continue;
        };
        let col = start + k;

        if !F::IS_GF2 {
            let inv = band.row(i)[k]
                .inv()
                .ok_or(SolverError::NonInvertiblePivot { column: col })?;
            band.scale_row(i, &inv);
            rhs[i] = rhs[i].scale(&inv);
        }

        column_owner[col] = Some(i);
        row_pivot[i] = Some(col);
        pivot_rows.push(i);
    }

    debug!(
        rows = n,
        cols = m,
        width = band.width(),
        rank = pivot_rows.len(),
        "band elimination finished"
    );
    let is_pivot = column_owner.iter().map(Option::is_some).collect();
    Ok(Some(BandReduction {
        band,
        rhs,
        pivot_rows,
        row_pivot,
        is_pivot,
    }))
}
