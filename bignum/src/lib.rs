//! Arbitrary-precision integer arithmetic on 64-bit limbs.
//!
//! Three layers, leaf to root:
//! - [`limbs`]: unsigned magnitudes as little-endian `u64` sequences;
//! - [`BigInt`]: a sign flag over a magnitude, with the usual operators;
//! - [`number_theory`]: GCD, modular exponentiation, primes, combinatorics.

pub mod bigint;
pub mod error;
pub mod limbs;
pub mod number_theory;

pub use bigint::BigInt;
pub use error::{ArithmeticError, ParseError};
