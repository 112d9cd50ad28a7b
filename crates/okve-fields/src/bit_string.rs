//! Bit-packed strings of a runtime width.
//!
//! A [`BitString`] holds `bit_len` bits packed most-significant-bit-first
//! into `ceil(bit_len / 8)` or more bytes. The logical bits sit at the low
//! end of the buffer: with `offset = 8 * bytes.len() - bit_len`, logical
//! bit `j` is buffer bit `offset + j` counted from the most significant
//! bit of byte 0, and the `offset` leading bits are always zero.
//!
//! Under XOR, l-bit strings form a vector space over GF(2); this is the
//! value type of binary OKVE systems whose coefficients are single bits.

use std::ops::{Add, Neg, Sub};

use rand::Rng;

use crate::binary_field::Gf2;
use crate::traits::Module;

/// An l-bit string packed MSB-first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitString {
    bytes: Vec<u8>,
    bit_len: usize,
}

/// Returns the number of bytes needed to hold `bit_len` bits.
#[inline]
#[must_use]
pub const fn byte_len(bit_len: usize) -> usize {
    bit_len.div_ceil(8)
}

impl BitString {
    /// Wraps a packed buffer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is too short for `bit_len` bits or if any of the
    /// unused high-order bits are set.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>, bit_len: usize) -> Self {
        assert!(
            bytes.len() * 8 >= bit_len,
            "{} bytes cannot hold {bit_len} bits",
            bytes.len()
        );
        let s = Self { bytes, bit_len };
        assert!(s.padding_is_clear(), "unused high-order bits must be zero");
        s
    }

    /// Creates the all-zero string of `bit_len` bits in the minimal buffer.
    #[must_use]
    pub fn zeros(bit_len: usize) -> Self {
        Self {
            bytes: vec![0u8; byte_len(bit_len)],
            bit_len,
        }
    }

    /// Samples a uniformly random string of `bit_len` bits.
    #[must_use]
    pub fn random<R: Rng + ?Sized>(bit_len: usize, rng: &mut R) -> Self {
        let mut s = Self::zeros(bit_len);
        rng.fill_bytes(&mut s.bytes);
        s.clear_padding();
        s
    }

    /// Builds a string from logical bits, first bit most significant.
    #[must_use]
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut s = Self::zeros(bits.len());
        for (j, &bit) in bits.iter().enumerate() {
            s.set(j, bit);
        }
        s
    }

    /// Number of logical bits.
    #[inline]
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// The packed buffer.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the string, returning the packed buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Drops leading padding bytes, leaving the minimal buffer.
    #[must_use]
    pub fn into_minimal(mut self) -> Self {
        let excess = self.bytes.len() - byte_len(self.bit_len);
        self.bytes.drain(..excess);
        self
    }

    /// Writes the string right-aligned into `out`, zeroing the rest.
    ///
    /// # Panics
    ///
    /// Panics if `out` cannot hold `bit_len` bits.
    pub fn write_to(&self, out: &mut [u8]) {
        let needed = byte_len(self.bit_len);
        assert!(
            out.len() >= needed,
            "{} bytes cannot hold {} bits",
            out.len(),
            self.bit_len
        );
        let split = out.len() - needed;
        out[..split].fill(0);
        out[split..].copy_from_slice(&self.bytes[self.bytes.len() - needed..]);
    }

    #[inline]
    fn offset(&self) -> usize {
        self.bytes.len() * 8 - self.bit_len
    }

    /// Returns logical bit `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= bit_len`.
    #[inline]
    #[must_use]
    pub fn get(&self, j: usize) -> bool {
        assert!(j < self.bit_len, "bit {j} out of range for {} bits", self.bit_len);
        let pos = self.offset() + j;
        (self.bytes[pos / 8] >> (7 - pos % 8)) & 1 == 1
    }

    /// Sets logical bit `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= bit_len`.
    #[inline]
    pub fn set(&mut self, j: usize, bit: bool) {
        assert!(j < self.bit_len, "bit {j} out of range for {} bits", self.bit_len);
        let pos = self.offset() + j;
        let mask = 1u8 << (7 - pos % 8);
        if bit {
            self.bytes[pos / 8] |= mask;
        } else {
            self.bytes[pos / 8] &= !mask;
        }
    }

    /// Returns true if every bit is zero.
    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Unpacks the logical bits into GF(2) elements.
    #[must_use]
    pub fn to_gf2_vec(&self) -> Vec<Gf2> {
        (0..self.bit_len).map(|j| Gf2::new(self.get(j))).collect()
    }

    fn padding_mask(&self) -> u8 {
        let offset = self.offset();
        if offset % 8 == 0 {
            0
        } else {
            !(0xffu8 >> (offset % 8))
        }
    }

    fn padding_is_clear(&self) -> bool {
        let offset = self.offset();
        let full = offset / 8;
        self.bytes[..full].iter().all(|&b| b == 0)
            && (full == self.bytes.len() || self.bytes[full] & self.padding_mask() == 0)
    }

    fn clear_padding(&mut self) {
        let offset = self.offset();
        let full = offset / 8;
        let mask = self.padding_mask();
        self.bytes[..full].fill(0);
        if full < self.bytes.len() {
            self.bytes[full] &= !mask;
        }
    }

    fn xor_with(mut self, rhs: &Self) -> Self {
        assert_eq!(
            (self.bit_len, self.bytes.len()),
            (rhs.bit_len, rhs.bytes.len()),
            "bit strings differ in shape"
        );
        for (a, b) in self.bytes.iter_mut().zip(&rhs.bytes) {
            *a ^= b;
        }
        self
    }
}

impl Add for BitString {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.xor_with(&rhs)
    }
}

impl Sub for BitString {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.xor_with(&rhs)
    }
}

impl Neg for BitString {
    type Output = Self;

    fn neg(self) -> Self {
        self
    }
}

impl Module<Gf2> for BitString {
    fn scale(&self, scalar: &Gf2) -> Self {
        if scalar.bit() {
            self.clone()
        } else {
            self.identity_like()
        }
    }

    fn is_identity(&self) -> bool {
        self.is_all_zero()
    }

    fn identity_like(&self) -> Self {
        Self {
            bytes: vec![0u8; self.bytes.len()],
            bit_len: self.bit_len,
        }
    }

    fn random_nonidentity_like<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        assert!(self.bit_len > 0, "a zero-width string has no non-identity value");
        loop {
            let mut candidate = self.identity_like();
            rng.fill_bytes(&mut candidate.bytes);
            candidate.clear_padding();
            if !candidate.is_all_zero() {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_msb_first_layout() {
        // 10 bits in 2 bytes: 6 padding bits, then bits 0..10
        let s = BitString::from_bytes(vec![0b0000_0010, 0b0000_0001], 10);
        assert!(s.get(0));
        assert!(!s.get(1));
        assert!(s.get(9));
        assert_eq!(s.to_gf2_vec().iter().filter(|b| b.bit()).count(), 2);
    }

    #[test]
    fn test_from_bits_roundtrip() {
        let bits = [true, false, true, true, false, false, false, true, true];
        let s = BitString::from_bits(&bits);
        assert_eq!(s.as_bytes().len(), 2);
        let back: Vec<bool> = (0..bits.len()).map(|j| s.get(j)).collect();
        assert_eq!(back, bits);
    }

    #[test]
    fn test_oversized_buffer_keeps_bits_at_low_end() {
        let s = BitString::from_bytes(vec![0, 0, 0b1000_0000], 8);
        assert!(s.get(0));
    }

    #[test]
    fn test_minimal_and_write_to() {
        let s = BitString::from_bytes(vec![0, 0, 0b0000_0101], 3).into_minimal();
        assert_eq!(s.as_bytes(), &[0b0000_0101]);

        let mut out = [0xff; 3];
        s.write_to(&mut out);
        assert_eq!(out, [0, 0, 0b0000_0101]);
    }

    #[test]
    #[should_panic(expected = "unused high-order bits")]
    fn test_rejects_dirty_padding() {
        let _ = BitString::from_bytes(vec![0b1000_0000], 7);
    }

    #[test]
    #[should_panic(expected = "cannot hold")]
    fn test_rejects_short_buffer() {
        let _ = BitString::from_bytes(vec![0], 9);
    }

    #[test]
    fn test_module_ops() {
        let a = BitString::from_bits(&[true, false, true]);
        let b = BitString::from_bits(&[true, true, false]);
        assert_eq!(a.clone() + b.clone(), BitString::from_bits(&[false, true, true]));
        assert_eq!(a.clone() + a.clone(), a.identity_like());
        assert_eq!(a.scale(&Gf2::ONE), a);
        assert!(a.scale(&Gf2::ZERO).is_identity());
    }

    #[test]
    fn test_random_respects_width() {
        let mut rng = ChaCha8Rng::seed_from_u64(40);
        let template = BitString::zeros(13);
        for _ in 0..100 {
            let r = template.random_nonidentity_like(&mut rng);
            assert_eq!(r.bit_len(), 13);
            assert!(!r.is_identity());
            assert_eq!(r.as_bytes()[0] & 0b1110_0000, 0);
        }
    }
}
