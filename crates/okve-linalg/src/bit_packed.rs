//! Byte-buffer front-end for binary OKVE systems.
//!
//! Coefficients are single GF(2) bits packed MSB-first into one byte row
//! per equation, values are l-bit strings in their own byte buffers. A
//! buffer may be longer than the bit width requires; the logical bits sit
//! at its low end and the unused high-order bits must be zero.

use okve_fields::{BitString, Gf2};
use rand::Rng;

use crate::band_matrix::BandMatrix;
use crate::band_solver::BandLinearSolver;
use crate::config::SolverConfig;
use crate::dense_solver::DenseLinearSolver;
use crate::error::Result;
use crate::max_lis;
use crate::system::SystemInfo;

/// Solver for GF(2) systems with l-bit string values in byte buffers.
#[derive(Clone, Debug)]
pub struct BitPackedSolver {
    bit_len: usize,
    dense: DenseLinearSolver,
    band: BandLinearSolver,
}

impl BitPackedSolver {
    /// Creates a solver for values of `bit_len` bits.
    ///
    /// # Panics
    ///
    /// Panics if `bit_len` is zero.
    #[must_use]
    pub fn new(bit_len: usize, config: SolverConfig) -> Self {
        assert!(bit_len > 0, "values must be at least one bit wide");
        Self {
            bit_len,
            dense: DenseLinearSolver::new(config.clone()),
            band: BandLinearSolver::new(config),
        }
    }

    /// Returns the value width in bits.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Solves a dense system whose rows are packed `m`-bit coefficient rows.
    ///
    /// Free columns are set to zero. Each buffer in `x` receives its value
    /// right-aligned; `x` is left untouched when the system is inconsistent.
    ///
    /// # Errors
    ///
    /// Never fails for GF(2) coefficients; the `Result` mirrors the
    /// generic solvers.
    ///
    /// # Panics
    ///
    /// Panics if any buffer is too short for its bit width or has non-zero
    /// unused high-order bits, or if the row and value counts disagree.
    pub fn free_solve(
        &self,
        lhs: &[Vec<u8>],
        m: usize,
        rhs: &[Vec<u8>],
        x: &mut [Vec<u8>],
    ) -> Result<SystemInfo> {
        let rows = unpack_rows(lhs, m);
        let values = self.unpack_values(rhs);
        let mut solution = self.templates(x);
        let info = self.dense.free_solve(&rows, m, &values, &mut solution)?;
        write_back(info, &solution, x);
        Ok(info)
    }

    /// Solves a dense system with every free column a random non-zero string.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::ResampleLimitExceeded`](crate::SolverError::ResampleLimitExceeded)
    /// if no draw within the configured bound avoids a zero pivot.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`BitPackedSolver::free_solve`].
    pub fn full_solve<R: Rng + ?Sized>(
        &self,
        lhs: &[Vec<u8>],
        m: usize,
        rhs: &[Vec<u8>],
        x: &mut [Vec<u8>],
        rng: &mut R,
    ) -> Result<SystemInfo> {
        let rows = unpack_rows(lhs, m);
        let values = self.unpack_values(rhs);
        let mut solution = self.templates(x);
        let info = self.dense.full_solve(&rows, m, &values, &mut solution, rng)?;
        write_back(info, &solution, x);
        Ok(info)
    }

    /// Solves a band system whose windows are packed `w`-bit rows.
    ///
    /// # Errors
    ///
    /// Never fails for GF(2) coefficients.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`BitPackedSolver::free_solve`],
    /// or if a window extends past column `m`.
    pub fn band_free_solve(
        &self,
        starts: &[usize],
        m: usize,
        w: usize,
        lhs: &[Vec<u8>],
        rhs: &[Vec<u8>],
        x: &mut [Vec<u8>],
    ) -> Result<SystemInfo> {
        let band = BandMatrix::new(starts, m, w, &unpack_rows(lhs, w));
        let values = self.unpack_values(rhs);
        let mut solution = self.templates(x);
        let info = self.band.free_solve(&band, &values, &mut solution)?;
        write_back(info, &solution, x);
        Ok(info)
    }

    /// Solves a band system with every free column a random non-zero string.
    ///
    /// # Errors
    ///
    /// See [`BitPackedSolver::full_solve`].
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`BitPackedSolver::band_free_solve`].
    #[allow(clippy::too_many_arguments)]
    pub fn band_full_solve<R: Rng + ?Sized>(
        &self,
        starts: &[usize],
        m: usize,
        w: usize,
        lhs: &[Vec<u8>],
        rhs: &[Vec<u8>],
        x: &mut [Vec<u8>],
        rng: &mut R,
    ) -> Result<SystemInfo> {
        let band = BandMatrix::new(starts, m, w, &unpack_rows(lhs, w));
        let values = self.unpack_values(rhs);
        let mut solution = self.templates(x);
        let info = self.band.full_solve(&band, &values, &mut solution, rng)?;
        write_back(info, &solution, x);
        Ok(info)
    }

    /// Returns the indices of a maximal independent subset of packed rows.
    ///
    /// # Errors
    ///
    /// Never fails for GF(2) coefficients.
    ///
    /// # Panics
    ///
    /// Panics if a row buffer cannot hold `m` bits or has non-zero unused
    /// high-order bits.
    pub fn lis_rows(lhs: &[Vec<u8>], m: usize) -> Result<Vec<usize>> {
        max_lis::lis_rows(&unpack_rows(lhs, m), m)
    }

    fn unpack_values(&self, rhs: &[Vec<u8>]) -> Vec<BitString> {
        rhs.iter()
            .map(|bytes| BitString::from_bytes(bytes.clone(), self.bit_len).into_minimal())
            .collect()
    }

    /// One zero string per output buffer, after checking the buffer fits.
    fn templates(&self, x: &[Vec<u8>]) -> Vec<BitString> {
        let template = BitString::zeros(self.bit_len);
        x.iter()
            .map(|buf| {
                assert!(
                    buf.len() * 8 >= self.bit_len,
                    "{} bytes cannot hold {} bits",
                    buf.len(),
                    self.bit_len
                );
                template.clone()
            })
            .collect()
    }
}

fn unpack_rows(lhs: &[Vec<u8>], bits: usize) -> Vec<Vec<Gf2>> {
    lhs.iter()
        .map(|row| BitString::from_bytes(row.clone(), bits).to_gf2_vec())
        .collect()
}

fn write_back(info: SystemInfo, solution: &[BitString], x: &mut [Vec<u8>]) {
    if info.is_consistent() {
        for (value, out) in solution.iter().zip(x.iter_mut()) {
            value.write_to(out);
        }
    }
}
