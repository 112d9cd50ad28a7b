//! Free-column assignment shared by the dense and band solvers.
//!
//! Both solvers end elimination with a column classification and a way to
//! recompute pivot values from the free ones. Filling the free columns and
//! driving the full-solve resample loop is identical between them.

use okve_fields::{Field, Module};
use rand::Rng;
use tracing::trace;

use crate::config::SolverConfig;
use crate::error::{Result, SolverError};

/// Outcome of one back-substitution pass.
#[must_use]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct BackSubstitution {
    /// Some pivot came out zero although it depends on a free column.
    pub collapsed: bool,
}

/// Sets every free column to the identity.
pub(crate) fn zero_free<F: Field, V: Module<F>>(x: &mut [V], is_pivot: &[bool]) {
    for (slot, &pivot) in x.iter_mut().zip(is_pivot) {
        if !pivot {
            *slot = slot.identity_like();
        }
    }
}

/// Draws every free column uniformly from the non-identity elements.
pub(crate) fn randomize_free<F, V, R>(x: &mut [V], is_pivot: &[bool], rng: &mut R)
where
    F: Field,
    V: Module<F>,
    R: Rng + ?Sized,
{
    for (slot, &pivot) in x.iter_mut().zip(is_pivot) {
        if !pivot {
            *slot = slot.random_nonidentity_like(rng);
        }
    }
}

/// Redraws the free columns until no pivot that depends on them is zero.
///
/// `back_substitute` recomputes the pivot columns of a draw from its free
/// columns. Pivots that no free column reaches are fully determined by the
/// system and are allowed to stay zero. Draws happen in a working copy, and
/// `x` is written only once a draw is accepted.
pub(crate) fn resample_until_nonzero<F, V, R, B>(
    config: &SolverConfig,
    x: &mut [V],
    is_pivot: &[bool],
    rng: &mut R,
    mut back_substitute: B,
) -> Result<()>
where
    F: Field,
    V: Module<F>,
    R: Rng + ?Sized,
    B: FnMut(&mut [V]) -> BackSubstitution,
{
    let mut draw = x.to_vec();
    for round in 0..=config.max_resample_rounds {
        randomize_free(&mut draw, is_pivot, rng);
        if !back_substitute(&mut draw).collapsed {
            x.clone_from_slice(&draw);
            return Ok(());
        }
        trace!(round, "pivot collapsed to zero, resampling free columns");
    }
    Err(SolverError::ResampleLimitExceeded {
        rounds: config.max_resample_rounds,
    })
}
