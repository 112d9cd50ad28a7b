//! The NIST P-256 group as a module over its scalar field.
//!
//! Coefficients of an elliptic-curve system are scalars, right-hand sides
//! and solutions are points. Callers that hold coefficients as
//! arbitrary-precision integers convert them with [`scalar_from_ubig`].

use p256::elliptic_curve::ff::Field as FfField;
use p256::elliptic_curve::group::Group;
use rand::Rng;

pub use p256::{ProjectivePoint, Scalar};

use crate::big_prime_field::UBig;
use crate::traits::{Field, Module, Ring};

impl Ring for Scalar {
    fn zero() -> Self {
        Scalar::ZERO
    }

    fn one() -> Self {
        Scalar::ONE
    }

    fn is_zero(&self) -> bool {
        *self == Scalar::ZERO
    }
}

impl Field for Scalar {
    fn inv(&self) -> Option<Self> {
        Option::from(FfField::invert(self))
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        <Scalar as FfField>::random(rng)
    }
}

impl Module<Scalar> for ProjectivePoint {
    fn scale(&self, scalar: &Scalar) -> Self {
        *self * scalar
    }

    fn is_identity(&self) -> bool {
        bool::from(Group::is_identity(self))
    }

    fn identity_like(&self) -> Self {
        ProjectivePoint::IDENTITY
    }

    fn random_nonidentity_like<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        loop {
            let candidate = <ProjectivePoint as Group>::random(&mut *rng);
            if !bool::from(Group::is_identity(&candidate)) {
                return candidate;
            }
        }
    }
}

/// Reduces an arbitrary-precision integer modulo the group order.
#[must_use]
pub fn scalar_from_ubig(value: &UBig) -> Scalar {
    let radix = Scalar::from(256u64);
    value
        .to_be_bytes()
        .iter()
        .fold(Scalar::ZERO, |acc, &byte| acc * radix + Scalar::from(u64::from(byte)))
}

#[cfg(test)]
mod tests {
    use super::scalar_from_ubig;
    use crate::big_prime_field::{P256Order, PrimeModulus, UBig};
    use crate::traits::{Field, Module, Ring};
    use p256::{ProjectivePoint, Scalar};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_scalar_field_ops() {
        let mut rng = ChaCha8Rng::seed_from_u64(256);
        let a = Scalar::random_nonzero(&mut rng);
        assert_eq!(a * a.inv().unwrap(), <Scalar as Ring>::one());
        assert_eq!(<Scalar as Ring>::zero().inv(), None);
    }

    #[test]
    fn test_point_module_ops() {
        let g = ProjectivePoint::GENERATOR;
        let two = Scalar::from(2u64);
        assert_eq!(g.scale(&two), g + g);
        assert_eq!(g.scale(&<Scalar as Ring>::zero()), ProjectivePoint::IDENTITY);
        assert_eq!(g.identity_like(), ProjectivePoint::IDENTITY);
        assert!(Module::<Scalar>::is_identity(&ProjectivePoint::IDENTITY));
    }

    #[test]
    fn test_scalar_from_ubig_reduces() {
        let order = P256Order::modulus();
        assert_eq!(scalar_from_ubig(order), <Scalar as Ring>::zero());
        assert_eq!(scalar_from_ubig(&(order + UBig::from(5u8))), Scalar::from(5u64));
        assert_eq!(scalar_from_ubig(&UBig::ZERO), <Scalar as Ring>::zero());
    }

    #[test]
    fn test_random_point_is_not_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let p = ProjectivePoint::IDENTITY.random_nonidentity_like(&mut rng);
        assert_ne!(p, ProjectivePoint::IDENTITY);
    }
}
