//! Solver configuration.

/// Configuration shared by the dense and band solvers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Upper bound on full-solve resample rounds.
    ///
    /// Over fields of cryptographic size one round almost always suffices;
    /// the bound only keeps degenerate inputs (tiny fields, a pivot forced
    /// to zero by its free columns) from looping forever.
    pub max_resample_rounds: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_resample_rounds: 64,
        }
    }
}

impl SolverConfig {
    /// Returns the configuration with a different resample bound.
    #[must_use]
    pub fn with_max_resample_rounds(mut self, rounds: usize) -> Self {
        self.max_resample_rounds = rounds;
        self
    }
}
