//! Parallel solving of independent band systems.
//!
//! An OKVE encoding splits its keys into bins and solves one band system
//! per bin. The systems share nothing, so they are spread over the rayon
//! pool; each individual solve stays single-threaded.

use okve_fields::{Field, Module};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::band_matrix::BandMatrix;
use crate::band_solver::BandLinearSolver;
use crate::error::Result;
use crate::system::SystemInfo;

/// One band system `A · x = b` of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSystem<F, V> {
    /// The coefficient matrix.
    pub band: BandMatrix<F>,
    /// The right-hand side, one value per row.
    pub rhs: Vec<V>,
}

impl<F: Field, V: Module<F>> BandSystem<F, V> {
    /// Bundles a band matrix with its right-hand side.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` does not have one value per row.
    #[must_use]
    pub fn new(band: BandMatrix<F>, rhs: Vec<V>) -> Self {
        assert_eq!(
            band.num_rows(),
            rhs.len(),
            "band has {} rows, rhs has {}",
            band.num_rows(),
            rhs.len()
        );
        Self { band, rhs }
    }
}

/// Free-solves every system in parallel, writing system `i` into `outputs[i]`.
///
/// # Panics
///
/// Panics if `systems` and `outputs` differ in length, or under the
/// conditions of [`BandLinearSolver::free_solve`] for any system.
pub fn par_free_solve<F, V>(
    solver: &BandLinearSolver,
    systems: &[BandSystem<F, V>],
    outputs: &mut [Vec<V>],
) -> Vec<Result<SystemInfo>>
where
    F: Field + Send + Sync,
    V: Module<F> + Send + Sync,
{
    assert_eq!(systems.len(), outputs.len(), "one output per system");
    debug!(systems = systems.len(), "free-solving band systems in parallel");

    systems
        .par_iter()
        .zip(outputs.par_iter_mut())
        .map(|(system, x)| solver.free_solve(&system.band, &system.rhs, x))
        .collect()
}

/// Full-solves every system in parallel, writing system `i` into `outputs[i]`.
///
/// System `i` draws its free columns from a `ChaCha8Rng` seeded with
/// `seed` on stream `i`, so the result does not depend on scheduling.
///
/// # Panics
///
/// Panics if `systems` and `outputs` differ in length, or under the
/// conditions of [`BandLinearSolver::full_solve`] for any system.
pub fn par_full_solve<F, V>(
    solver: &BandLinearSolver,
    systems: &[BandSystem<F, V>],
    outputs: &mut [Vec<V>],
    seed: u64,
) -> Vec<Result<SystemInfo>>
where
    F: Field + Send + Sync,
    V: Module<F> + Send + Sync,
{
    assert_eq!(systems.len(), outputs.len(), "one output per system");
    debug!(systems = systems.len(), seed, "full-solving band systems in parallel");

    systems
        .par_iter()
        .zip(outputs.par_iter_mut())
        .enumerate()
        .map(|(i, (system, x))| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(i as u64);
            solver.full_solve(&system.band, &system.rhs, x, &mut rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use okve_fields::{Ring, Zp64};

    type F17 = Zp64<17>;

    fn systems(count: u64) -> Vec<BandSystem<F17, F17>> {
        (0..count)
            .map(|k| {
                let rows = vec![
                    vec![F17::new(1), F17::new(k + 1)],
                    vec![F17::new(2), F17::new(3)],
                ];
                let band = BandMatrix::new(&[0, 2], 5, 2, &rows);
                BandSystem::new(band, vec![F17::new(k), F17::new(5)])
            })
            .collect()
    }

    #[test]
    fn test_par_free_solve_matches_sequential() {
        let batch = systems(16);
        let solver = BandLinearSolver::default();
        let mut outputs = vec![vec![F17::zero(); 5]; batch.len()];
        let results = par_free_solve(&solver, &batch, &mut outputs);

        for ((system, result), x) in batch.iter().zip(results).zip(&outputs) {
            let mut expected = vec![F17::zero(); 5];
            let info = solver.free_solve(&system.band, &system.rhs, &mut expected).unwrap();
            assert_eq!(result.unwrap(), info);
            assert_eq!(x, &expected);
        }
    }

    #[test]
    fn test_par_full_solve_is_reproducible() {
        let batch = systems(8);
        let solver = BandLinearSolver::default();
        let mut first = vec![vec![F17::zero(); 5]; batch.len()];
        let mut second = first.clone();
        assert!(par_full_solve(&solver, &batch, &mut first, 99).iter().all(|r| r.is_ok()));
        assert!(par_full_solve(&solver, &batch, &mut second, 99).iter().all(|r| r.is_ok()));
        assert_eq!(first, second);

        for (system, x) in batch.iter().zip(&first) {
            assert!(system.band.is_solution(x, &system.rhs));
            assert!(x.iter().all(|v| !v.is_zero()));
        }
    }

    #[test]
    #[should_panic(expected = "one output per system")]
    fn test_output_count_mismatch_panics() {
        let batch = systems(2);
        let mut outputs = vec![vec![F17::zero(); 5]];
        let _ = par_free_solve(&BandLinearSolver::default(), &batch, &mut outputs);
    }
}
