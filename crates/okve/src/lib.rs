//! # OKVE
//!
//! Linear-system core for Oblivious Key-Value Store encoding.
//!
//! An OKVE encodes key-value pairs as the solution of a sparse linear
//! system: each key contributes one row, each value one right-hand side.
//! This crate bundles the solvers with the fields and modules they run
//! over.
//!
//! ## Features
//!
//! - **Dense and band solvers**: Gauss-Jordan elimination, with band rows
//!   processed by window offset
//! - **Two solve variants**: zero free columns, or random non-zero ones
//! - **Generic arithmetic**: GF(2), GF(2^l), GF(2^128), word-size and
//!   arbitrary-precision prime fields, and the P-256 point group
//! - **Byte-buffer front-end** for binary systems with l-bit values
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use okve::prelude::*;
//!
//! let solver = BitPackedSolver::new(40, SolverConfig::default());
//! let mut x = vec![vec![0u8; 5]; 2];
//! let info = solver.band_free_solve(&[0], 2, 2, &[vec![0b11]], &[vec![0; 5]], &mut x)?;
//! assert!(info.is_consistent());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use okve_fields as fields;
pub use okve_linalg as linalg;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use okve_fields::{BitString, Field, Gf2, Gf2e40, Gf2e64, Gf2k, Module, Ring, Zp, Zp64};
    pub use okve_linalg::{
        lis_rows, BandLinearSolver, BandMatrix, BitPackedSolver, DenseLinearSolver, SolverConfig,
        SolverError, SystemInfo,
    };
}
