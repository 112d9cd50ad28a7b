//! Binary fields GF(2) and GF(2^l).
//!
//! Addition in characteristic 2 is XOR and negation is the identity.
//! Multiplication is carry-less multiplication followed by reduction
//! modulo a fixed irreducible polynomial, done bit-serially: shift the
//! left operand up one degree per step and fold the overflow bit back in
//! through the low part of the modulus.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};
use rand::Rng;

use crate::traits::{Field, Ring};

/// The two-element field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Gf2(bool);

impl Gf2 {
    /// The additive identity.
    pub const ZERO: Self = Self(false);

    /// The multiplicative identity.
    pub const ONE: Self = Self(true);

    /// Creates an element from a bit.
    #[inline]
    #[must_use]
    pub const fn new(bit: bool) -> Self {
        Self(bit)
    }

    /// Returns the element as a bit.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> bool {
        self.0
    }
}

impl Add for Gf2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Sub for Gf2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Mul for Gf2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Neg for Gf2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self
    }
}

impl Ring for Gf2 {
    fn zero() -> Self {
        Self::ZERO
    }

    fn one() -> Self {
        Self::ONE
    }

    fn is_zero(&self) -> bool {
        !self.0
    }
}

impl Field for Gf2 {
    const IS_GF2: bool = true;

    fn inv(&self) -> Option<Self> {
        self.0.then_some(Self::ONE)
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen())
    }

    fn random_nonzero<R: Rng + ?Sized>(_rng: &mut R) -> Self {
        Self::ONE
    }
}

impl From<bool> for Gf2 {
    fn from(bit: bool) -> Self {
        Self(bit)
    }
}

/// GF(2^L) for `1 <= L <= 64`, stored in the low `L` bits of a `u64`.
///
/// `POLY` holds the low terms of the irreducible modulus, i.e. the field is
/// GF(2)[x] / (x^L + POLY).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Gf2e<const L: u32, const POLY: u64>(u64);

impl<const L: u32, const POLY: u64> Gf2e<L, POLY> {
    /// Mask selecting the `L` value bits.
    pub const MASK: u64 = if L == 64 { u64::MAX } else { (1u64 << L) - 1 };

    /// Number of bytes in the big-endian encoding.
    pub const BYTES: usize = (L as usize).div_ceil(8);

    /// Creates an element, discarding bits above degree `L - 1`.
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value & Self::MASK)
    }

    /// Returns the raw polynomial bits.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Encodes the element as `BYTES` big-endian bytes.
    #[must_use]
    pub fn to_be_bytes(self) -> Vec<u8> {
        self.0.to_be_bytes()[8 - Self::BYTES..].to_vec()
    }

    /// Decodes an element from big-endian bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is not exactly `BYTES` long or sets bits above
    /// degree `L - 1`.
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        assert_eq!(bytes.len(), Self::BYTES, "GF(2^{L}) needs {} bytes", Self::BYTES);
        let value = bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        assert_eq!(value & !Self::MASK, 0, "unused high-order bits must be zero");
        Self(value)
    }
}

impl<const L: u32, const POLY: u64> Add for Gf2e<L, POLY> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl<const L: u32, const POLY: u64> Sub for Gf2e<L, POLY> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl<const L: u32, const POLY: u64> Neg for Gf2e<L, POLY> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self
    }
}

impl<const L: u32, const POLY: u64> Mul for Gf2e<L, POLY> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut a = self.0;
        let mut b = rhs.0;
        let mut acc = 0u64;

        while b != 0 {
            if b & 1 == 1 {
                acc ^= a;
            }
            b >>= 1;
            let carry = (a >> (L - 1)) & 1;
            a = (a << 1) & Self::MASK;
            if carry == 1 {
                a ^= POLY;
            }
        }

        Self(acc)
    }
}

impl<const L: u32, const POLY: u64> Zero for Gf2e<L, POLY> {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const L: u32, const POLY: u64> One for Gf2e<L, POLY> {
    fn one() -> Self {
        Self(1)
    }
}

impl<const L: u32, const POLY: u64> Ring for Gf2e<L, POLY> {
    fn zero() -> Self {
        <Self as Zero>::zero()
    }

    fn one() -> Self {
        <Self as One>::one()
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const L: u32, const POLY: u64> Field for Gf2e<L, POLY> {
    fn inv(&self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }
        // a^(2^L - 2) = a^-1 since the multiplicative group has order 2^L - 1
        Some(self.pow(Self::MASK - 1))
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen())
    }
}

impl<const L: u32, const POLY: u64> fmt::Debug for Gf2e<L, POLY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x} (GF(2^{}))", self.0, L)
    }
}

/// GF(2^8) with the AES modulus x^8 + x^4 + x^3 + x + 1.
pub type Gf2e8 = Gf2e<8, 0x1B>;

/// GF(2^40) with modulus x^40 + x^5 + x^4 + x^3 + 1.
pub type Gf2e40 = Gf2e<40, 0x39>;

/// GF(2^64) with modulus x^64 + x^4 + x^3 + x + 1.
pub type Gf2e64 = Gf2e<64, 0x1B>;

/// GF(2^κ) for κ = 128, modulus x^128 + x^7 + x^2 + x + 1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Gf2k(u128);

impl Gf2k {
    /// Low terms of the modulus.
    const POLY: u128 = 0x87;

    /// Bytes in the big-endian encoding.
    pub const BYTES: usize = 16;

    /// Creates an element from its polynomial bits.
    #[inline]
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw polynomial bits.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u128 {
        self.0
    }

    /// Encodes the element as 16 big-endian bytes.
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Decodes an element from 16 big-endian bytes.
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(bytes))
    }

    #[inline]
    fn square(self) -> Self {
        self * self
    }
}

impl Add for Gf2k {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Sub for Gf2k {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Neg for Gf2k {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self
    }
}

impl Mul for Gf2k {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut a = self.0;
        let mut b = rhs.0;
        let mut acc = 0u128;

        while b != 0 {
            if b & 1 == 1 {
                acc ^= a;
            }
            b >>= 1;
            let carry = a >> 127;
            a <<= 1;
            if carry == 1 {
                a ^= Self::POLY;
            }
        }

        Self(acc)
    }
}

impl Ring for Gf2k {
    fn zero() -> Self {
        Self(0)
    }

    fn one() -> Self {
        Self(1)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Field for Gf2k {
    fn inv(&self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }
        // 2^128 - 2 = 2 + 4 + ... + 2^127
        let mut power = *self;
        let mut result = Self(1);
        for _ in 1..128 {
            power = power.square();
            result = result * power;
        }
        Some(result)
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen())
    }
}

impl fmt::Debug for Gf2k {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#034x} (GF(2^128))", self.0)
    }
}
