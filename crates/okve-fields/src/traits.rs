//! Algebraic structure traits.
//!
//! These traits are the whole contract between the linear solvers and the
//! arithmetic they run over. A solver is generic over a scalar [`Field`]
//! and a [`Module`] over that field; it never names a concrete type.

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

use rand::Rng;

/// A ring is a set with addition and multiplication operations.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative with identity `one()`
/// - Multiplication distributes over addition
/// - Every element has an additive inverse (`neg`)
pub trait Ring:
    Clone + PartialEq + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool {
        *self == Self::one()
    }

    /// Computes self^n by square-and-multiply.
    #[must_use]
    fn pow(&self, n: u64) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base.clone();
            }
            base = base.clone() * base;
            exp >>= 1;
        }

        result
    }
}

/// A field is a ring where every non-zero element has a multiplicative inverse.
pub trait Field: Ring {
    /// True only for the two-element field.
    ///
    /// Over GF(2) every non-zero scalar is one, so row reduction never has
    /// to normalize a pivot.
    const IS_GF2: bool = false;

    /// Computes the multiplicative inverse.
    ///
    /// Returns `None` if the element is zero.
    fn inv(&self) -> Option<Self>;

    /// Samples a uniformly random element.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Samples a uniformly random non-zero element.
    fn random_nonzero<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let candidate = Self::random(rng);
            if !candidate.is_zero() {
                return candidate;
            }
        }
    }
}

/// An abelian group with a scalar action of the field `S`.
///
/// Right-hand sides and solutions of a linear system live in a module,
/// coefficients live in its scalar field. Group-valued modules (elliptic
/// curve points, bit strings of a runtime width) carry a shape that a
/// bare constructor cannot know, so the constructors here copy the shape
/// of an existing element.
pub trait Module<S: Field>:
    Clone + PartialEq + Debug + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self>
{
    /// Returns `scalar · self`.
    #[must_use]
    fn scale(&self, scalar: &S) -> Self;

    /// Returns true if this is the group identity.
    fn is_identity(&self) -> bool;

    /// Returns the identity with the same shape as `self`.
    #[must_use]
    fn identity_like(&self) -> Self;

    /// Samples a random non-identity element with the same shape as `self`.
    #[must_use]
    fn random_nonidentity_like<R: Rng + ?Sized>(&self, rng: &mut R) -> Self;
}

impl<F: Field> Module<F> for F {
    fn scale(&self, scalar: &F) -> Self {
        scalar.clone() * self.clone()
    }

    fn is_identity(&self) -> bool {
        self.is_zero()
    }

    fn identity_like(&self) -> Self {
        F::zero()
    }

    fn random_nonidentity_like<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        F::random_nonzero(rng)
    }
}
