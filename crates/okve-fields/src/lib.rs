//! # okve-fields
//!
//! Algebraic structures consumed by the OKVE linear solvers.
//!
//! This crate provides:
//! - Abstract traits: `Ring`, `Field`, `Module`
//! - Binary fields: GF(2), GF(2^l) for l <= 64, GF(2^128)
//! - Prime fields: word-size `Zp64` and arbitrary-precision `Zp`
//! - `BitString`, l-bit values forming a GF(2) module
//! - The P-256 point group as a module over its scalars (`p256` feature)
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Ring
//!  └── Field ──(scalars of)──> Module<S>
//! ```
//!
//! Every field is a module over itself.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod big_prime_field;
pub mod binary_field;
pub mod bit_string;
#[cfg(feature = "p256")]
pub mod ecc;
pub mod prime_field;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use big_prime_field::{Mersenne127, P256Order, PrimeModulus, UBig, Zp};
pub use binary_field::{Gf2, Gf2e, Gf2e40, Gf2e64, Gf2e8, Gf2k};
pub use bit_string::BitString;
#[cfg(feature = "p256")]
pub use ecc::{scalar_from_ubig, ProjectivePoint, Scalar};
pub use prime_field::{Zp64, Zp64Max, ZpMersenne61};
pub use traits::{Field, Module, Ring};
