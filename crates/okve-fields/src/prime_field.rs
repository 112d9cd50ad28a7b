//! Word-size prime fields Z_p.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};
use rand::Rng;

use crate::traits::{Field, Ring};

/// An element of Z_p for a prime `P < 2^64`.
///
/// Products are formed in `u128`, so any 64-bit prime works.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Zp64<const P: u64>(u64);

impl<const P: u64> Zp64<P> {
    /// Creates a new field element.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value % P)
    }

    /// Creates a field element from a signed value.
    #[must_use]
    pub fn from_signed(value: i64) -> Self {
        let reduced = i128::from(value).rem_euclid(i128::from(P));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(reduced as u64)
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the modulus.
    #[must_use]
    pub const fn modulus() -> u64 {
        P
    }

    /// Computes the modular inverse with the extended Euclidean algorithm.
    ///
    /// Returns `None` for zero.
    #[must_use]
    pub fn checked_inv(self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }

        let mut t = 0i128;
        let mut new_t = 1i128;
        let mut r = i128::from(P);
        let mut new_r = i128::from(self.0);

        while new_r != 0 {
            let quotient = r / new_r;
            (t, new_t) = (new_t, t - quotient * new_t);
            (r, new_r) = (new_r, r - quotient * new_r);
        }

        if r > 1 {
            return None; // P is not prime
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(Self(t.rem_euclid(i128::from(P)) as u64))
    }
}

impl<const P: u64> Zero for Zp64<P> {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const P: u64> One for Zp64<P> {
    fn one() -> Self {
        Self(1 % P)
    }
}

impl<const P: u64> Ring for Zp64<P> {
    fn zero() -> Self {
        <Self as Zero>::zero()
    }

    fn one() -> Self {
        <Self as One>::one()
    }

    fn is_zero(&self) -> bool {
        <Self as Zero>::is_zero(self)
    }
}

impl<const P: u64> Field for Zp64<P> {
    const IS_GF2: bool = P == 2;

    fn inv(&self) -> Option<Self> {
        self.checked_inv()
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..P))
    }
}

impl<const P: u64> Add for Zp64<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let sum = u128::from(self.0) + u128::from(rhs.0);
        #[allow(clippy::cast_possible_truncation)]
        Self((sum % u128::from(P)) as u64)
    }
}

impl<const P: u64> Sub for Zp64<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl<const P: u64> Mul for Zp64<P> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        #[allow(clippy::cast_possible_truncation)]
        Self(((u128::from(self.0) * u128::from(rhs.0)) % u128::from(P)) as u64)
    }
}

impl<const P: u64> Neg for Zp64<P> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if self.0 == 0 {
            Self(0)
        } else {
            Self(P - self.0)
        }
    }
}

impl<const P: u64> From<u64> for Zp64<P> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<const P: u64> From<i64> for Zp64<P> {
    fn from(value: i64) -> Self {
        Self::from_signed(value)
    }
}

impl<const P: u64> fmt::Debug for Zp64<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.0, P)
    }
}

impl<const P: u64> fmt::Display for Zp64<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Word-size primes in common use.
pub mod primes {
    /// 2^61 - 1 (Mersenne prime).
    pub const MERSENNE_61: u64 = (1 << 61) - 1;

    /// 2^64 - 59, the largest prime below 2^64.
    pub const LARGEST_64: u64 = 18_446_744_073_709_551_557;
}

/// Z_p over the Mersenne prime 2^61 - 1.
pub type ZpMersenne61 = Zp64<{ primes::MERSENNE_61 }>;

/// Z_p over the largest 64-bit prime.
pub type Zp64Max = Zp64<{ primes::LARGEST_64 }>;
