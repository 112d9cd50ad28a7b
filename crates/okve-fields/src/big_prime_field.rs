//! Prime fields Z_p with arbitrary-precision moduli.
//!
//! The modulus is carried at the type level by a zero-sized marker so that
//! `Zp::zero()` and friends need no runtime context. Markers are declared
//! with [`define_prime_modulus!`](crate::define_prime_modulus).

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Add, Mul, Neg, Sub};

use dashu::base::BitTest;
use rand::Rng;

pub use dashu::integer::UBig;

use crate::traits::{Field, Ring};

/// A type-level prime modulus.
pub trait PrimeModulus: Copy + fmt::Debug + Default + Eq + Hash + Send + Sync + 'static {
    /// Returns the prime.
    fn modulus() -> &'static UBig;

    /// Number of bytes in a big-endian encoding of a reduced element.
    fn byte_len() -> usize {
        Self::modulus().bit_len().div_ceil(8)
    }
}

/// Declares a zero-sized [`PrimeModulus`] marker from a hexadecimal literal.
///
/// The literal is parsed once, on first use.
#[macro_export]
macro_rules! define_prime_modulus {
    ($(#[$meta:meta])* $name:ident, $hex:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl $crate::big_prime_field::PrimeModulus for $name {
            fn modulus() -> &'static $crate::big_prime_field::UBig {
                static MODULUS: ::std::sync::OnceLock<$crate::big_prime_field::UBig> =
                    ::std::sync::OnceLock::new();
                MODULUS.get_or_init(|| {
                    $crate::big_prime_field::UBig::from_str_radix($hex, 16)
                        .expect("modulus literal is valid hexadecimal")
                })
            }
        }
    };
}

define_prime_modulus!(
    /// The Mersenne prime 2^127 - 1.
    Mersenne127,
    "7fffffffffffffffffffffffffffffff"
);

define_prime_modulus!(
    /// The order of the NIST P-256 group.
    P256Order,
    "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"
);

/// An element of Z_p, always kept in `[0, p)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Zp<M: PrimeModulus> {
    value: UBig,
    _modulus: PhantomData<M>,
}

impl<M: PrimeModulus> Zp<M> {
    fn from_reduced(value: UBig) -> Self {
        Self {
            value,
            _modulus: PhantomData,
        }
    }

    /// Creates an element from an arbitrary-precision integer, reducing it.
    #[must_use]
    pub fn from_ubig(value: &UBig) -> Self {
        Self::from_reduced(value % M::modulus())
    }

    /// Creates an element from a machine word.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self::from_ubig(&UBig::from(value))
    }

    /// Returns the canonical representative in `[0, p)`.
    #[must_use]
    pub fn value(&self) -> &UBig {
        &self.value
    }

    /// Returns the modulus.
    #[must_use]
    pub fn modulus() -> &'static UBig {
        M::modulus()
    }

    /// Encodes the element as `M::byte_len()` big-endian bytes.
    #[must_use]
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let len = M::byte_len();
        let raw = self.value.to_be_bytes();
        let mut out = vec![0u8; len - raw.len()];
        out.extend_from_slice(&raw);
        out
    }
}

impl<M: PrimeModulus> Add for Zp<M> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let p = M::modulus();
        let sum = self.value + rhs.value;
        if &sum >= p {
            Self::from_reduced(sum - p)
        } else {
            Self::from_reduced(sum)
        }
    }
}

impl<M: PrimeModulus> Sub for Zp<M> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        if self.value >= rhs.value {
            Self::from_reduced(self.value - rhs.value)
        } else {
            Self::from_reduced(self.value + M::modulus() - rhs.value)
        }
    }
}

impl<M: PrimeModulus> Mul for Zp<M> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_reduced((self.value * rhs.value) % M::modulus())
    }
}

impl<M: PrimeModulus> Neg for Zp<M> {
    type Output = Self;

    fn neg(self) -> Self {
        if self.value == UBig::ZERO {
            self
        } else {
            Self::from_reduced(M::modulus() - self.value)
        }
    }
}

impl<M: PrimeModulus> Ring for Zp<M> {
    fn zero() -> Self {
        Self::from_reduced(UBig::ZERO)
    }

    fn one() -> Self {
        Self::from_reduced(UBig::ONE)
    }

    fn is_zero(&self) -> bool {
        self.value == UBig::ZERO
    }
}

impl<M: PrimeModulus> Field for Zp<M> {
    fn inv(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }

        // Fermat: a^(p-2) = a^-1
        let exponent = M::modulus() - UBig::from(2u8);
        let mut result = Self::one();
        for i in (0..exponent.bit_len()).rev() {
            result = result.clone() * result;
            if exponent.bit(i) {
                result = result * self.clone();
            }
        }
        Some(result)
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // 128 extra bits make the modular bias negligible
        let mut bytes = vec![0u8; M::byte_len() + 16];
        rng.fill_bytes(&mut bytes);
        Self::from_ubig(&UBig::from_be_bytes(&bytes))
    }
}

impl<M: PrimeModulus> From<u64> for Zp<M> {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl<M: PrimeModulus> fmt::Debug for Zp<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {:?})", self.value, M::default())
    }
}

impl<M: PrimeModulus> fmt::Display for Zp<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
