//! # okve-linalg
//!
//! Linear solvers behind oblivious key-value stores.
//!
//! This crate provides:
//! - Dense Gauss-Jordan solving of `A · x = b` over any field, with values
//!   in any module over that field
//! - Band solving for rows confined to a window of `w` columns
//! - Maximal linearly independent row selection
//! - A byte-buffer front-end for GF(2) systems with l-bit values
//! - Parallel solving of independent band systems via rayon
//!
//! ## Solve variants
//!
//! Every solver offers two variants:
//! - `free_solve` sets each free column to zero
//! - `full_solve` draws each free column non-zero at random and redraws
//!   until no pivot that depends on a free column is zero
//!
//! An unsolvable system is reported as [`SystemInfo::Inconsistent`], not as
//! an error. Dimension mismatches are caller bugs and panic.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod band_matrix;
pub mod band_solver;
pub mod batch;
pub mod bit_packed;
pub mod config;
pub mod dense_matrix;
pub mod dense_solver;
pub mod error;
pub mod max_lis;
pub mod system;

mod assignment;

pub use band_matrix::BandMatrix;
pub use band_solver::BandLinearSolver;
pub use batch::{par_free_solve, par_full_solve, BandSystem};
pub use bit_packed::BitPackedSolver;
pub use config::SolverConfig;
pub use dense_matrix::DenseMatrix;
pub use dense_solver::DenseLinearSolver;
pub use error::{Result, SolverError};
pub use max_lis::{lis_rows, rank};
pub use system::SystemInfo;

#[cfg(test)]
mod proptests;
