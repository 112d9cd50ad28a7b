//! Solver errors.
//!
//! An inconsistent system is not an error: it is reported as
//! [`SystemInfo::Inconsistent`](crate::SystemInfo::Inconsistent). The
//! variants here cover failures of the arithmetic collaborator and the
//! exhausted resample bound of a full solve.

use thiserror::Error;

/// Errors raised while solving a linear system.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The field reported no inverse for a non-zero pivot.
    #[error("pivot in column {column} has no multiplicative inverse")]
    NonInvertiblePivot {
        /// Absolute column of the pivot.
        column: usize,
    },

    /// Every resample round still left a zero that depends on free columns.
    #[error("no all-non-zero solution found after {rounds} resample rounds")]
    ResampleLimitExceeded {
        /// Resample rounds run after the initial draw.
        rounds: usize,
    },
}

/// Result alias for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;
