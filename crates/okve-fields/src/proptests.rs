//! Property-based tests for the field and module axioms.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::big_prime_field::{Mersenne127, UBig, Zp};
    use crate::binary_field::{Gf2e40, Gf2e64, Gf2k};
    use crate::bit_string::BitString;
    use crate::prime_field::Zp64Max;
    use crate::traits::{Field, Module, Ring};

    type F127 = Zp<Mersenne127>;

    fn f127(hi: u64, lo: u64) -> F127 {
        let value = (UBig::from(hi) << 64) + UBig::from(lo);
        F127::from_ubig(&value)
    }

    proptest! {
        // Z_p (word size)

        #[test]
        fn zp64_distributive(a in any::<u64>(), b in any::<u64>(), c in any::<u64>()) {
            let (a, b, c) = (Zp64Max::new(a), Zp64Max::new(b), Zp64Max::new(c));
            prop_assert_eq!(a * (b + c), a * b + a * c);
        }

        #[test]
        fn zp64_additive_inverse(a in any::<u64>()) {
            let a = Zp64Max::new(a);
            prop_assert!(<Zp64Max as Ring>::is_zero(&(a + (-a))));
        }

        #[test]
        fn zp64_inverse(a in 1u64..u64::MAX) {
            let a = Zp64Max::new(a);
            prop_assume!(!<Zp64Max as Ring>::is_zero(&a));
            prop_assert_eq!((a * a.inv().unwrap()).value(), 1);
        }

        // Z_p (arbitrary precision)

        #[test]
        fn zp_distributive(a in any::<(u64, u64)>(), b in any::<(u64, u64)>(), c in any::<(u64, u64)>()) {
            let (a, b, c) = (f127(a.0, a.1), f127(b.0, b.1), f127(c.0, c.1));
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn zp_sub_is_add_neg(a in any::<(u64, u64)>(), b in any::<(u64, u64)>()) {
            let (a, b) = (f127(a.0, a.1), f127(b.0, b.1));
            prop_assert_eq!(a.clone() - b.clone(), a + (-b));
        }

        #[test]
        fn zp_inverse(a in any::<(u64, u64)>()) {
            let a = f127(a.0, a.1);
            prop_assume!(!a.is_zero());
            prop_assert_eq!(a.clone() * a.inv().unwrap(), F127::one());
        }

        // GF(2^l)

        #[test]
        fn gf2e40_mul_commutative(a in any::<u64>(), b in any::<u64>()) {
            let (a, b) = (Gf2e40::new(a), Gf2e40::new(b));
            prop_assert_eq!(a * b, b * a);
        }

        #[test]
        fn gf2e64_distributive(a in any::<u64>(), b in any::<u64>(), c in any::<u64>()) {
            let (a, b, c) = (Gf2e64::new(a), Gf2e64::new(b), Gf2e64::new(c));
            prop_assert_eq!(a * (b + c), a * b + a * c);
        }

        #[test]
        fn gf2e40_inverse(a in 1u64..(1u64 << 40)) {
            let a = Gf2e40::new(a);
            prop_assert_eq!(a * a.inv().unwrap(), <Gf2e40 as Ring>::one());
        }

        #[test]
        fn gf2k_mul_associative(a in any::<u128>(), b in any::<u128>(), c in any::<u128>()) {
            let (a, b, c) = (Gf2k::new(a), Gf2k::new(b), Gf2k::new(c));
            prop_assert_eq!((a * b) * c, a * (b * c));
        }

        // GF(2) module of bit strings

        #[test]
        fn bit_string_self_inverse(bits in proptest::collection::vec(any::<bool>(), 1..80)) {
            let s = BitString::from_bits(&bits);
            prop_assert!((s.clone() + s.clone()).is_identity());
            prop_assert_eq!(s.clone() - s.identity_like(), s);
        }
    }
}
