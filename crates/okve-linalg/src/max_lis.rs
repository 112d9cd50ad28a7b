//! Maximal linearly independent row subsets.
//!
//! Rows are scanned in order and each is reduced against the rows already
//! kept. A row that keeps a non-zero entry is independent of all earlier
//! kept rows and joins the basis. The result is the lexicographically
//! first basis of the row space.

use okve_fields::Field;
use tracing::debug;

use crate::error::{Result, SolverError};

/// A kept row, normalized so its pivot entry is one.
struct BasisRow<F> {
    pivot: usize,
    entries: Vec<F>,
}

/// Returns the indices of a maximal linearly independent subset of rows.
///
/// Only the first `m` entries of each row are considered. Indices are
/// returned in ascending order, and the greedy scan keeps a row exactly
/// when it is independent of the rows kept before it.
///
/// # Errors
///
/// Returns [`SolverError::NonInvertiblePivot`] if the field fails to invert
/// a non-zero pivot.
///
/// # Panics
///
/// Panics if a row has fewer than `m` entries.
pub fn lis_rows<F: Field>(matrix: &[Vec<F>], m: usize) -> Result<Vec<usize>> {
    let mut basis: Vec<BasisRow<F>> = Vec::new();
    let mut selected = Vec::new();

    for (i, row) in matrix.iter().enumerate() {
        assert!(
            row.len() >= m,
            "row {i} has {} entries, expected at least {m}",
            row.len()
        );
        let mut reduced = row[..m].to_vec();
        for kept in &basis {
            if reduced[kept.pivot].is_zero() {
                continue;
            }
            let factor = -reduced[kept.pivot].clone();
            for (entry, b) in reduced.iter_mut().zip(&kept.entries) {
                if !b.is_zero() {
                    *entry = entry.clone() + factor.clone() * b.clone();
                }
            }
        }

        let Some(pivot) = reduced.iter().position(|a| !a.is_zero()) else {
            continue;
        };
        if !F::IS_GF2 {
            let inv = reduced[pivot]
                .inv()
                .ok_or(SolverError::NonInvertiblePivot { column: pivot })?;
            for entry in &mut reduced {
                *entry = entry.clone() * inv.clone();
            }
        }
        basis.push(BasisRow {
            pivot,
            entries: reduced,
        });
        selected.push(i);
    }

    debug!(rows = matrix.len(), cols = m, rank = selected.len(), "independent rows selected");
    Ok(selected)
}

/// Returns the rank of the first `m` columns of a matrix.
///
/// # Errors
///
/// See [`lis_rows`].
pub fn rank<F: Field>(matrix: &[Vec<F>], m: usize) -> Result<usize> {
    lis_rows(matrix, m).map(|rows| rows.len())
}
