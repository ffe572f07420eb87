//! The [`BigDouble`] value type and its exact arithmetic.
//!
//! A `BigDouble` is a sign flag over a numerator and a denominator magnitude,
//! kept in lowest terms after every operation. Addition, subtraction and
//! multiplication are exact. Division is exact up to a digit budget on the
//! resulting denominator (see [`NumericConfig::denominator_digit_cap`]).

use std::cmp::Ordering;

use bignum::number_theory::binary_gcd;
use bignum::{limbs, ArithmeticError, BigInt};
use tracing::trace;

use crate::NumericConfig;

/// log10(2), used to bound a magnitude's decimal digit count from its bits.
const LOG10_2: f64 = 0.301_029_995_663_981_2;

/// Bits of each part that `to_f64` keeps.
const F64_KEPT_BITS: usize = 128;

/// `value * 2^exp`, stepping so no intermediate power of two overflows.
fn scale_by_pow2(mut value: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    while exp > STEP && value.is_finite() && value != 0.0 {
        value *= 2f64.powi(STEP as i32);
        exp -= STEP;
    }
    while exp < -STEP && value != 0.0 {
        value *= 2f64.powi(-STEP as i32);
        exp += STEP;
    }
    value * 2f64.powi(exp.clamp(-STEP, STEP) as i32)
}

/// Exact rational number.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigDouble {
    /// Strictly negative. Always `false` for zero.
    negative: bool,
    /// Canonical limbs, coprime with `denominator`.
    numerator: Vec<u64>,
    /// Canonical limbs, never zero. `[1]` for integers.
    denominator: Vec<u64>,
}

// ============================================================================
// Construction
// ============================================================================

impl BigDouble {
    pub fn zero() -> Self {
        Self::from_reduced(false, limbs::zero(), limbs::one())
    }

    pub fn one() -> Self {
        Self::from_reduced(false, limbs::one(), limbs::one())
    }

    /// `numerator / denominator`, reduced. Signs of both parts combine.
    ///
    /// ```
    /// use bigdouble::BigDouble;
    /// use bignum::BigInt;
    ///
    /// let x = BigDouble::new(BigInt::from(10), BigInt::from(-4)).unwrap();
    /// assert_eq!(x.fraction_description(), "-5/2");
    /// assert!(BigDouble::new(BigInt::from(1), BigInt::zero()).is_err());
    /// ```
    pub fn new(numerator: BigInt, denominator: BigInt) -> Result<Self, ArithmeticError> {
        let (num_negative, num) = numerator.into_parts();
        let (den_negative, den) = denominator.into_parts();
        Self::from_limbs(num_negative != den_negative, num, den)
    }

    /// Build from raw limb sequences. Empty sequences and a zero denominator
    /// are rejected.
    pub fn from_limbs(
        negative: bool,
        numerator: Vec<u64>,
        denominator: Vec<u64>,
    ) -> Result<Self, ArithmeticError> {
        if numerator.is_empty() || denominator.is_empty() {
            return Err(ArithmeticError::EmptyLimbs);
        }
        if limbs::is_zero(&denominator) {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(Self::from_unreduced(negative, numerator, denominator))
    }

    /// Normalizes and reduces. `denominator` must be non-zero.
    pub(crate) fn from_unreduced(negative: bool, numerator: Vec<u64>, denominator: Vec<u64>) -> Self {
        let mut value = Self {
            negative,
            numerator: limbs::normalized(&numerator),
            denominator: limbs::normalized(&denominator),
        };
        value.minimize();
        value
    }

    /// Trusts that the parts are canonical, coprime and the denominator is
    /// non-zero.
    pub(crate) fn from_reduced(negative: bool, numerator: Vec<u64>, denominator: Vec<u64>) -> Self {
        let negative = negative && !limbs::is_zero(&numerator);
        Self {
            negative,
            numerator,
            denominator,
        }
    }

    /// Divide out the common factor and settle the sign of zero.
    fn minimize(&mut self) {
        if limbs::is_zero(&self.numerator) {
            self.negative = false;
            self.denominator = limbs::one();
            return;
        }
        let g = binary_gcd(&self.numerator, &self.denominator);
        if !limbs::is_one(&g) {
            self.numerator = limbs::div_mod(&self.numerator, &g).0;
            self.denominator = limbs::div_mod(&self.denominator, &g).0;
        }
    }
}

impl From<BigInt> for BigDouble {
    fn from(n: BigInt) -> Self {
        let (negative, magnitude) = n.into_parts();
        Self::from_reduced(negative, magnitude, limbs::one())
    }
}

impl From<&BigInt> for BigDouble {
    fn from(n: &BigInt) -> Self {
        Self::from_reduced(n.is_negative(), n.magnitude().to_vec(), limbs::one())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigDouble {
                fn from(v: $t) -> Self {
                    Self::from(BigInt::from(v))
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Default for BigDouble {
    fn default() -> Self {
        Self::zero()
    }
}

// ============================================================================
// Queries and conversions
// ============================================================================

impl BigDouble {
    #[inline]
    pub fn is_zero(&self) -> bool {
        limbs::is_zero(&self.numerator)
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.is_zero()
    }

    /// The denominator is one.
    #[inline]
    pub fn is_integer(&self) -> bool {
        limbs::is_one(&self.denominator)
    }

    /// Signed numerator.
    pub fn numerator(&self) -> BigInt {
        BigInt::from_parts(self.negative, self.numerator.clone())
    }

    /// Always positive.
    pub fn denominator(&self) -> BigInt {
        BigInt::from_parts(false, self.denominator.clone())
    }

    #[inline]
    pub fn numerator_limbs(&self) -> &[u64] {
        &self.numerator
    }

    #[inline]
    pub fn denominator_limbs(&self) -> &[u64] {
        &self.denominator
    }

    pub fn abs(&self) -> BigDouble {
        Self::from_reduced(false, self.numerator.clone(), self.denominator.clone())
    }

    /// `-1`, `0` or `1`.
    pub fn signum(&self) -> BigDouble {
        if self.is_zero() {
            Self::zero()
        } else {
            Self::from_reduced(self.negative, limbs::one(), limbs::one())
        }
    }

    pub fn reciprocal(&self) -> Result<BigDouble, ArithmeticError> {
        if self.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(Self::from_reduced(
            self.negative,
            self.denominator.clone(),
            self.numerator.clone(),
        ))
    }

    /// Nearest `f64`. Each part keeps only its top bits and the dropped
    /// powers of two are applied to the quotient, so values whose parts would
    /// overflow a double on their own still convert.
    pub fn to_f64(&self) -> f64 {
        let num_shift = limbs::bit_len(&self.numerator).saturating_sub(F64_KEPT_BITS);
        let den_shift = limbs::bit_len(&self.denominator).saturating_sub(F64_KEPT_BITS);
        let num = limbs::to_f64(&limbs::shift_down(&self.numerator, num_shift));
        let den = limbs::to_f64(&limbs::shift_down(&self.denominator, den_shift));
        let value = scale_by_pow2(num / den, num_shift as i64 - den_shift as i64);
        if self.negative {
            -value
        } else {
            value
        }
    }

    /// `|self - other| <= epsilon * max(1, |self|, |other|)`.
    pub fn nearly_equal(&self, other: &BigDouble, cfg: &NumericConfig) -> bool {
        let diff = self.sub_ref(other).abs();
        let scale = [self.abs(), other.abs()]
            .into_iter()
            .fold(Self::one(), |acc, v| acc.max(v));
        diff <= cfg.epsilon().mul_ref(&scale)
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

impl BigDouble {
    pub(crate) fn neg_ref(&self) -> BigDouble {
        Self::from_reduced(!self.negative, self.numerator.clone(), self.denominator.clone())
    }

    /// `a/b + c/d = (ad + bc) / bd`, with the shared-denominator case kept
    /// cheap.
    pub(crate) fn add_ref(&self, rhs: &BigDouble) -> BigDouble {
        if limbs::equal_to(&self.denominator, &rhs.denominator) {
            let sum = BigInt::from_parts(self.negative, self.numerator.clone())
                + BigInt::from_parts(rhs.negative, rhs.numerator.clone());
            let (negative, numerator) = sum.into_parts();
            return Self::from_unreduced(negative, numerator, self.denominator.clone());
        }
        let left = BigInt::from_parts(self.negative, limbs::multiply(&self.numerator, &rhs.denominator));
        let right = BigInt::from_parts(rhs.negative, limbs::multiply(&rhs.numerator, &self.denominator));
        let (negative, numerator) = (left + right).into_parts();
        Self::from_unreduced(
            negative,
            numerator,
            limbs::multiply(&self.denominator, &rhs.denominator),
        )
    }

    pub(crate) fn sub_ref(&self, rhs: &BigDouble) -> BigDouble {
        self.add_ref(&rhs.neg_ref())
    }

    pub(crate) fn mul_ref(&self, rhs: &BigDouble) -> BigDouble {
        Self::from_unreduced(
            self.negative != rhs.negative,
            limbs::multiply(&self.numerator, &rhs.numerator),
            limbs::multiply(&self.denominator, &rhs.denominator),
        )
    }

    /// Division with [`NumericConfig::DEFAULT`]; errors on a zero divisor.
    pub fn checked_div(&self, rhs: &BigDouble) -> Result<BigDouble, ArithmeticError> {
        self.div_with(rhs, &NumericConfig::DEFAULT)
    }

    /// `a/b / c/d = ad / bc`, reduced, with the denominator truncated to
    /// `cfg.denominator_digit_cap()` decimal digits and reduced again.
    ///
    /// ```
    /// use bigdouble::{BigDouble, NumericConfig};
    ///
    /// let third = BigDouble::from(1).div_with(&BigDouble::from(3), &NumericConfig::DEFAULT).unwrap();
    /// assert_eq!(third.fraction_description(), "1/3");
    /// ```
    pub fn div_with(&self, rhs: &BigDouble, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let mut quotient = Self::from_unreduced(
            self.negative != rhs.negative,
            limbs::multiply(&self.numerator, &rhs.denominator),
            limbs::multiply(&self.denominator, &rhs.numerator),
        );
        if quotient.truncate_denominator(cfg.denominator_digit_cap()) {
            quotient.minimize();
        }
        Ok(quotient)
    }

    /// Drop trailing decimal digits from both parts until the denominator has
    /// at most `cap` digits. Returns whether anything was dropped.
    fn truncate_denominator(&mut self, cap: usize) -> bool {
        let limit = limbs::pow10(cap as u64);
        if limbs::less_than(&self.denominator, &limit) {
            return false;
        }

        // The bit length gives a lower bound on the digit count; drop that
        // much in one division, then finish one digit at a time.
        let bits = limbs::bit_len(&self.denominator);
        let known_digits = ((bits - 1) as f64 * LOG10_2 - 1e-9) as usize + 1;
        let mut dropped = known_digits.saturating_sub(cap);
        if dropped > 0 {
            let scale = limbs::pow10(dropped as u64);
            self.numerator = limbs::div_mod(&self.numerator, &scale).0;
            self.denominator = limbs::div_mod(&self.denominator, &scale).0;
        }
        while !limbs::less_than(&self.denominator, &limit) {
            self.numerator = limbs::div_mod_limb(&self.numerator, 10).0;
            self.denominator = limbs::div_mod_limb(&self.denominator, 10).0;
            dropped += 1;
        }
        trace!(dropped, cap, "truncated quotient denominator");
        if limbs::is_zero(&self.numerator) {
            self.negative = false;
        }
        true
    }

    /// Integer power; a negative exponent takes the reciprocal.
    pub fn pow_int(&self, exp: i64) -> Result<BigDouble, ArithmeticError> {
        let powered = self.pow_u64(exp.unsigned_abs());
        if exp < 0 {
            powered.reciprocal()
        } else {
            Ok(powered)
        }
    }

    /// Powers of coprime parts stay coprime, so no reduction is needed.
    pub(crate) fn pow_u64(&self, exp: u64) -> BigDouble {
        Self::from_reduced(
            self.negative && exp % 2 == 1,
            limbs::pow(&self.numerator, exp),
            limbs::pow(&self.denominator, exp),
        )
    }
}

// ============================================================================
// Ordering
// ============================================================================

impl Ord for BigDouble {
    /// Sign first, then cross-multiplied magnitudes.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (negative, _) => {
                let ord = limbs::cmp(
                    &limbs::multiply(&self.numerator, &other.denominator),
                    &limbs::multiply(&other.numerator, &self.denominator),
                );
                if negative {
                    ord.reverse()
                } else {
                    ord
                }
            }
        }
    }
}

impl PartialOrd for BigDouble {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i64, d: i64) -> BigDouble {
        BigDouble::new(BigInt::from(n), BigInt::from(d)).unwrap()
    }

    #[test]
    fn test_construction_reduces() {
        let x = frac(6, 8);
        assert_eq!(x.numerator_limbs(), &[3]);
        assert_eq!(x.denominator_limbs(), &[4]);
        assert_eq!(frac(-6, -8), x);
        assert!(frac(6, -8).is_negative());
    }

    #[test]
    fn test_zero_is_canonical() {
        let z = frac(0, -7);
        assert!(!z.is_negative());
        assert_eq!(z.denominator_limbs(), &[1]);
        assert_eq!(z, BigDouble::zero());
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            BigDouble::new(BigInt::from(3), BigInt::zero()),
            Err(ArithmeticError::DivisionByZero)
        );
        assert_eq!(
            BigDouble::from_limbs(false, vec![1], vec![]),
            Err(ArithmeticError::EmptyLimbs)
        );
        assert_eq!(
            BigDouble::from_limbs(false, vec![1], vec![0, 0]),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(frac(1, 2).add_ref(&frac(1, 3)), frac(5, 6));
        assert_eq!(frac(1, 6).add_ref(&frac(5, 6)), BigDouble::one());
        assert_eq!(frac(1, 2).sub_ref(&frac(3, 4)), frac(-1, 4));
        assert_eq!(frac(-2, 3).mul_ref(&frac(9, 4)), frac(-3, 2));
        assert_eq!(frac(2, 3).checked_div(&frac(-4, 9)).unwrap(), frac(-3, 2));
        assert_eq!(
            frac(1, 2).checked_div(&BigDouble::zero()),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_division_caps_denominator() {
        let cfg = NumericConfig::DEFAULT.with_working_precision(5);
        let cap = limbs::pow10(cfg.denominator_digit_cap() as u64);

        let mut x = BigDouble::from(BigInt::from(10).pow(30));
        let mut expected = 1e30;
        for d in [7i64, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47] {
            x = x.div_with(&BigDouble::from(d), &cfg).unwrap();
            expected /= d as f64;
            assert!(limbs::less_than(x.denominator_limbs(), &cap));
        }
        assert!(!x.is_zero());
        assert!(((x.to_f64() - expected) / expected).abs() < 1e-6);
    }

    #[test]
    fn test_small_quotient_is_exact() {
        let cfg = NumericConfig::DEFAULT;
        let x = BigDouble::from(22).div_with(&BigDouble::from(7), &cfg).unwrap();
        assert_eq!(x, frac(22, 7));
    }

    #[test]
    fn test_ordering() {
        assert!(frac(1, 3) < frac(1, 2));
        assert!(frac(-1, 2) < frac(-1, 3));
        assert!(frac(-1, 2) < BigDouble::zero());
        assert_eq!(frac(2, 4).cmp(&frac(1, 2)), Ordering::Equal);
    }

    #[test]
    fn test_pow_int() {
        assert_eq!(frac(-2, 3).pow_int(3).unwrap(), frac(-8, 27));
        assert_eq!(frac(2, 3).pow_int(-2).unwrap(), frac(9, 4));
        assert_eq!(frac(5, 7).pow_int(0).unwrap(), BigDouble::one());
        assert_eq!(
            BigDouble::zero().pow_int(-1),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(frac(3, 4).to_f64(), 0.75);
        assert_eq!(frac(-1, 8).to_f64(), -0.125);

        let huge = BigDouble::from_reduced(false, limbs::pow10(400), limbs::pow(&[3], 800));
        let expected = (10f64 / 9.0).powi(400);
        let rel = ((huge.to_f64() - expected) / expected).abs();
        assert!(rel < 1e-12);
    }

    #[test]
    fn test_queries() {
        let x = frac(-7, 2);
        assert_eq!(x.numerator(), BigInt::from(-7));
        assert_eq!(x.denominator(), BigInt::from(2));
        assert_eq!(x.abs(), frac(7, 2));
        assert_eq!(x.signum(), BigDouble::from(-1));
        assert_eq!(x.reciprocal().unwrap(), frac(-2, 7));
        assert!(!x.is_integer());
        assert!(BigDouble::from(4).is_integer());
    }

    #[test]
    fn test_nearly_equal() {
        let cfg = NumericConfig::DEFAULT;
        let a = frac(1, 3);
        let b = a.add_ref(&frac(1, 100_000_000_000));
        assert!(a.nearly_equal(&b, &cfg));
        assert!(!a.nearly_equal(&frac(1, 2), &cfg));
    }
}
