//! Exact rational numbers over [`bignum`] limbs.
//!
//! [`BigDouble`] keeps a numerator and a denominator in lowest terms after
//! every operation. Addition, subtraction, multiplication and comparison are
//! exact; division caps the denominator's decimal digits so repeated
//! quotients stay bounded. Rendering, roots and trig read a
//! [`NumericConfig`] passed by the caller.
//!
//! ```
//! use bigdouble::{BigDouble, NumericConfig};
//!
//! let a: BigDouble = "1.2".parse().unwrap();
//! let b = BigDouble::from(3);
//! let sum = &a + &b;
//! assert_eq!(sum.fraction_description(), "21/5");
//! assert_eq!(sum.decimal_description(&NumericConfig::DEFAULT), "4.2000");
//! ```

pub mod config;
pub mod functions;
pub mod trig;

mod format;
mod ops;
mod parse;
mod rational;
mod roots;
mod rounding;
mod serialize;

pub use bignum::{ArithmeticError, BigInt, ParseError};
pub use config::{AngleUnit, NumericConfig};
pub use parse::MAX_DECIMAL_EXPONENT;
pub use rational::BigDouble;
