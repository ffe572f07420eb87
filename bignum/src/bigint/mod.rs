//! Arbitrary-precision signed integers in sign-magnitude form.
//!
//! A [`BigInt`] is a sign flag over a canonical limb sequence from
//! [`crate::limbs`]. Values are immutable: every operation returns a new one.
//! Zero is never negative.

mod ops;
mod radix;
mod serialize;

use std::cmp::Ordering;
use std::fmt;

use crate::error::ArithmeticError;
use crate::limbs;

pub use radix::{MAX_RADIX, MIN_RADIX};

pub(crate) use radix::format_magnitude;

/// Signed big integer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    /// Strictly negative. Always `false` when the magnitude is zero.
    negative: bool,
    /// Little-endian limbs, canonical.
    magnitude: Vec<u64>,
}

// ============================================================================
// Construction
// ============================================================================

impl BigInt {
    pub fn zero() -> Self {
        Self {
            negative: false,
            magnitude: limbs::zero(),
        }
    }

    pub fn one() -> Self {
        Self {
            negative: false,
            magnitude: limbs::one(),
        }
    }

    /// Build from a sign and a magnitude, restoring canonical form.
    ///
    /// An empty magnitude is read as zero; use [`BigInt::try_from_limbs`] to
    /// reject it instead.
    ///
    /// ```
    /// use bignum::BigInt;
    ///
    /// let n = BigInt::from_parts(true, vec![5, 0, 0]);
    /// assert_eq!(n, BigInt::from(-5));
    /// assert_eq!(BigInt::from_parts(true, vec![0]), BigInt::zero());
    /// ```
    pub fn from_parts(negative: bool, mut magnitude: Vec<u64>) -> Self {
        limbs::normalize(&mut magnitude);
        let negative = negative && !limbs::is_zero(&magnitude);
        Self {
            negative,
            magnitude,
        }
    }

    /// Like [`BigInt::from_parts`], but an empty limb sequence is an error.
    pub fn try_from_limbs(negative: bool, magnitude: Vec<u64>) -> Result<Self, ArithmeticError> {
        if magnitude.is_empty() {
            return Err(ArithmeticError::EmptyLimbs);
        }
        Ok(Self::from_parts(negative, magnitude))
    }

    /// Split into `(negative, magnitude)`.
    pub fn into_parts(self) -> (bool, Vec<u64>) {
        (self.negative, self.magnitude)
    }

    /// Little-endian magnitude limbs.
    #[inline]
    pub fn magnitude(&self) -> &[u64] {
        &self.magnitude
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(v: $t) -> Self {
                    Self::from_parts(false, limbs::from_u128(v as u128))
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(v: $t) -> Self {
                    Self::from_parts(v < 0, limbs::from_u128((v as i128).unsigned_abs()))
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

// ============================================================================
// Queries and conversions
// ============================================================================

impl BigInt {
    #[inline]
    pub fn is_zero(&self) -> bool {
        limbs::is_zero(&self.magnitude)
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        !self.negative && limbs::is_one(&self.magnitude)
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.is_zero()
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        self.magnitude[0] & 1 == 0
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    /// Significant bits of the magnitude.
    pub fn bit_len(&self) -> usize {
        limbs::bit_len(&self.magnitude)
    }

    pub fn trailing_zeros(&self) -> usize {
        limbs::trailing_zeros(&self.magnitude)
    }

    /// `-1`, `0` or `1`.
    pub fn signum(&self) -> BigInt {
        if self.is_zero() {
            Self::zero()
        } else {
            Self::from_parts(self.negative, limbs::one())
        }
    }

    pub fn abs(&self) -> BigInt {
        Self::from_parts(false, self.magnitude.clone())
    }

    pub fn to_u64(&self) -> Option<u64> {
        if self.negative {
            return None;
        }
        limbs::to_u64(&self.magnitude)
    }

    pub fn to_i64(&self) -> Option<i64> {
        let m = limbs::to_u64(&self.magnitude)?;
        if self.negative {
            (m <= 1u64 << 63).then(|| (m as i64).wrapping_neg())
        } else {
            i64::try_from(m).ok()
        }
    }

    pub fn to_u128(&self) -> Option<u128> {
        if self.negative {
            return None;
        }
        limbs::to_u128(&self.magnitude)
    }

    pub fn to_i128(&self) -> Option<i128> {
        let m = limbs::to_u128(&self.magnitude)?;
        if self.negative {
            (m <= 1u128 << 127).then(|| (m as i128).wrapping_neg())
        } else {
            i128::try_from(m).ok()
        }
    }

    /// Nearest double; infinite when the magnitude exceeds `f64::MAX`.
    pub fn to_f64(&self) -> f64 {
        let v = limbs::to_f64(&self.magnitude);
        if self.negative {
            -v
        } else {
            v
        }
    }

    pub fn get_bit(&self, i: usize) -> bool {
        limbs::get_bit(&self.magnitude, i)
    }

    /// Copy with magnitude bit `i` set to `value`; the sign is kept.
    pub fn set_bit(&self, i: usize, value: bool) -> BigInt {
        Self::from_parts(self.negative, limbs::set_bit(&self.magnitude, i, value))
    }
}

// ============================================================================
// Checked arithmetic
// ============================================================================

impl BigInt {
    /// Truncating division with remainder.
    ///
    /// The quotient is negative when exactly one operand is; the remainder
    /// takes the sign of the dividend.
    ///
    /// ```
    /// use bignum::BigInt;
    ///
    /// let (q, r) = BigInt::from(-7).div_rem(&BigInt::from(2)).unwrap();
    /// assert_eq!(q, BigInt::from(-3));
    /// assert_eq!(r, BigInt::from(-1));
    /// ```
    pub fn div_rem(&self, divisor: &BigInt) -> Result<(BigInt, BigInt), ArithmeticError> {
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let (q, r) = limbs::div_mod(&self.magnitude, &divisor.magnitude);
        Ok((
            Self::from_parts(self.negative != divisor.negative, q),
            Self::from_parts(self.negative, r),
        ))
    }

    pub fn checked_div(&self, divisor: &BigInt) -> Result<BigInt, ArithmeticError> {
        self.div_rem(divisor).map(|(q, _)| q)
    }

    pub fn checked_rem(&self, divisor: &BigInt) -> Result<BigInt, ArithmeticError> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    /// `self^exp` by repeated squaring.
    pub fn pow(&self, exp: u64) -> BigInt {
        Self::from_parts(
            self.negative && exp & 1 == 1,
            limbs::pow(&self.magnitude, exp),
        )
    }

    /// `self^exp` for a big exponent. Negative exponents are rejected.
    ///
    /// Exponents past `u64::MAX` only succeed for bases of magnitude 0 or 1.
    pub fn checked_pow(&self, exp: &BigInt) -> Result<BigInt, ArithmeticError> {
        if exp.negative {
            return Err(ArithmeticError::NegativeExponent);
        }
        if let Some(e) = exp.to_u64() {
            return Ok(self.pow(e));
        }
        if self.is_zero() {
            Ok(Self::zero())
        } else if limbs::is_one(&self.magnitude) {
            Ok(Self::from_parts(self.negative && exp.is_odd(), limbs::one()))
        } else {
            Err(ArithmeticError::TooLarge)
        }
    }

    pub fn square(&self) -> BigInt {
        Self::from_parts(false, limbs::square(&self.magnitude))
    }

    /// `self!` via a divide-and-conquer range product.
    ///
    /// ```
    /// use bignum::BigInt;
    ///
    /// assert_eq!(BigInt::from(0).factorial().unwrap(), BigInt::from(1));
    /// assert_eq!(BigInt::from(5).factorial().unwrap(), BigInt::from(120));
    /// ```
    pub fn factorial(&self) -> Result<BigInt, ArithmeticError> {
        if self.negative {
            return Err(ArithmeticError::NegativeFactorial);
        }
        let n = self.to_u64().ok_or(ArithmeticError::TooLarge)?;
        Ok(Self::from_parts(false, range_product(0, n)))
    }
}

/// Product of the integers in `(n, k]`, splitting the range in half so the
/// two halves are of similar size.
pub(crate) fn range_product(n: u64, k: u64) -> Vec<u64> {
    if k <= n {
        return limbs::one();
    }
    if k - n <= 4 {
        let mut acc = limbs::from_u64(n + 1);
        for i in (n + 2)..=k {
            acc = limbs::multiply(&acc, &[i]);
        }
        return acc;
    }
    let mid = n + (k - n) / 2;
    limbs::multiply(&range_product(n, mid), &range_product(mid, k))
}

// ============================================================================
// Trait impls
// ============================================================================

impl Default for BigInt {
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => limbs::cmp(&self.magnitude, &other.magnitude),
            (true, true) => limbs::cmp(&other.magnitude, &self.magnitude),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "", &format_magnitude(&self.magnitude, 10))
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({self})")
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "0x", &format_magnitude(&self.magnitude, 16))
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = format_magnitude(&self.magnitude, 16).to_ascii_uppercase();
        f.pad_integral(!self.negative, "0x", &digits)
    }
}

impl fmt::Octal for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "0o", &format_magnitude(&self.magnitude, 8))
    }
}

impl fmt::Binary for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "0b", &format_magnitude(&self.magnitude, 2))
    }
}

// ============================================================================
// Tests
// ============================================================================
