//! Property-based tests for the solvers.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::band_matrix::BandMatrix;
    use crate::band_solver::BandLinearSolver;
    use crate::dense_matrix::DenseMatrix;
    use crate::dense_solver::DenseLinearSolver;
    use crate::max_lis::{lis_rows, rank};
    use crate::system::SystemInfo;
    use okve_fields::{BitString, Gf2, Module, Ring, Zp64, Zp64Max};

    type F = Zp64Max;
    type Small = Zp64<3>;

    fn to_field(rows: &[Vec<u64>]) -> Vec<Vec<F>> {
        rows.iter()
            .map(|row| row.iter().map(|&v| F::new(v)).collect())
            .collect()
    }

    /// An n×m matrix with entries in {0, 1, 2}, plus a right-hand side.
    fn dense_system() -> impl Strategy<Value = (usize, Vec<Vec<u64>>, Vec<u64>)> {
        (0usize..6, 0usize..7).prop_flat_map(|(n, m)| {
            (
                Just(m),
                prop::collection::vec(prop::collection::vec(0u64..3, m), n),
                prop::collection::vec(any::<u64>(), n),
            )
        })
    }

    /// Band offsets, windows and a right-hand side over `m` columns.
    #[allow(clippy::type_complexity)]
    fn band_system() -> impl Strategy<Value = (usize, usize, Vec<usize>, Vec<Vec<u64>>, Vec<u64>)> {
        (0usize..8, 1usize..10, 0usize..5)
            .prop_filter("window fits", |&(_, m, w)| w <= m)
            .prop_flat_map(|(n, m, w)| {
                (
                    Just(m),
                    Just(w),
                    prop::collection::vec(0..=m - w, n),
                    prop::collection::vec(prop::collection::vec(0u64..3, w), n),
                    prop::collection::vec(0u64..4, n),
                )
            })
    }

    fn augmented(matrix: &[Vec<F>], rhs: &[F]) -> Vec<Vec<F>> {
        matrix
            .iter()
            .zip(rhs)
            .map(|(row, b)| {
                let mut row = row.clone();
                row.push(b.clone());
                row
            })
            .collect()
    }

    fn transpose(matrix: &[Vec<F>], m: usize) -> Vec<Vec<F>> {
        (0..m)
            .map(|j| matrix.iter().map(|row| row[j].clone()).collect())
            .collect()
    }

    proptest! {
        #[test]
        fn free_solve_verdict_matches_rank((m, rows, rhs) in dense_system()) {
            let a = to_field(&rows);
            let b: Vec<F> = rhs.iter().map(|&v| F::new(v)).collect();
            let mut x = vec![F::zero(); m];
            let info = DenseLinearSolver::default().free_solve(&a, m, &b, &mut x).unwrap();

            let rank_a = rank(&a, m).unwrap();
            let rank_ab = rank(&augmented(&a, &b), m + 1).unwrap();
            prop_assert_eq!(info.is_consistent(), rank_a == rank_ab);

            if info.is_consistent() {
                prop_assert!(DenseMatrix::from_rows(&a, m).is_solution(&x, &b));
                // Free columns are zero, so only pivot columns can be set.
                prop_assert!(x.iter().filter(|v| !v.is_zero()).count() <= rank_a);
            }
        }

        #[test]
        fn full_solve_zeros_are_forced((m, rows, rhs) in dense_system(), seed in any::<u64>()) {
            let a = to_field(&rows);
            let b: Vec<F> = rhs.iter().map(|&v| F::new(v)).collect();
            let solver = DenseLinearSolver::default();
            let mut free = vec![F::zero(); m];
            let mut full = vec![F::zero(); m];
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let free_info = solver.free_solve(&a, m, &b, &mut free).unwrap();
            let full_info = solver.full_solve(&a, m, &b, &mut full, &mut rng).unwrap();
            prop_assert_eq!(free_info, full_info);

            if full_info.is_consistent() {
                prop_assert!(DenseMatrix::from_rows(&a, m).is_solution(&full, &b));
                for (full_value, free_value) in full.iter().zip(&free) {
                    if full_value.is_zero() {
                        prop_assert!(free_value.is_zero());
                    }
                }
            }
        }

        #[test]
        fn band_agrees_with_dense((m, w, starts, rows, rhs) in band_system()) {
            let windows = to_field(&rows);
            let band = BandMatrix::new(&starts, m, w, &windows);
            let b: Vec<F> = rhs.iter().map(|&v| F::new(v)).collect();
            let solver = BandLinearSolver::default();

            let mut via_band = vec![F::zero(); m];
            let mut via_dense = vec![F::zero(); m];
            let band_info = solver.free_solve(&band, &b, &mut via_band).unwrap();
            let dense_info = solver.free_solve_rectangular(&band, &b, &mut via_dense).unwrap();
            prop_assert_eq!(band_info, dense_info);

            if band_info.is_consistent() {
                prop_assert!(band.is_solution(&via_band, &b));
                prop_assert!(band.is_solution(&via_dense, &b));
            }
        }

        #[test]
        fn band_full_solve_over_bit_strings(
            (m, w, starts, rows, rhs) in band_system(),
            seed in any::<u64>(),
        ) {
            let windows: Vec<Vec<Gf2>> = rows
                .iter()
                .map(|row| row.iter().map(|&v| Gf2::new(v % 2 == 1)).collect())
                .collect();
            let band = BandMatrix::new(&starts, m, w, &windows);
            let template = BitString::zeros(32);
            let b: Vec<BitString> = rhs
                .iter()
                .map(|&v| BitString::from_bytes(vec![u8::try_from(v).unwrap(); 4], 32))
                .collect();
            let solver = BandLinearSolver::default();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let mut free = vec![template.clone(); m];
            let mut full = vec![template; m];
            let free_info = solver.free_solve(&band, &b, &mut free).unwrap();
            let full_info = solver.full_solve(&band, &b, &mut full, &mut rng).unwrap();
            prop_assert_eq!(free_info, full_info);

            if full_info == SystemInfo::Consistent {
                prop_assert!(band.is_solution(&full, &b));
                for (full_value, free_value) in full.iter().zip(&free) {
                    if full_value.is_identity() {
                        prop_assert!(free_value.is_identity());
                    }
                }
            }
        }

        #[test]
        fn row_rank_equals_column_rank((m, rows, _rhs) in dense_system()) {
            let a = to_field(&rows);
            prop_assert_eq!(rank(&a, m).unwrap(), rank(&transpose(&a, m), a.len()).unwrap());
        }

        #[test]
        fn lis_rows_is_prefix_stable(
            rows in prop::collection::vec(prop::collection::vec(0u64..3, 4), 0..8),
        ) {
            let a: Vec<Vec<Small>> = rows
                .iter()
                .map(|row| row.iter().map(|&v| Small::new(v)).collect())
                .collect();
            let selected = lis_rows(&a, 4).unwrap();

            // The kept rows are independent on their own.
            let kept: Vec<Vec<Small>> = selected.iter().map(|&i| a[i].clone()).collect();
            prop_assert_eq!(rank(&kept, 4).unwrap(), selected.len());

            // Scanning a prefix keeps exactly the earlier selections.
            for k in 0..=a.len() {
                let expected: Vec<usize> = selected.iter().copied().filter(|&i| i < k).collect();
                prop_assert_eq!(lis_rows(&a[..k], 4).unwrap(), expected);
            }
        }
    }
}
