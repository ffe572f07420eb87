//! Building a [`BigDouble`] from text and from `f64`.
//!
//! Decimal and scientific strings are expanded exactly: the exponent moves
//! the decimal point into the numerator or the denominator, never through a
//! float.

use std::str::FromStr;

use bignum::bigint::{MAX_RADIX, MIN_RADIX};
use bignum::{limbs, ArithmeticError, BigInt, ParseError};

use crate::BigDouble;

/// Largest decimal shift a string may ask for. `1e100000` already has a
/// 332 kbit numerator.
pub const MAX_DECIMAL_EXPONENT: i64 = 100_000;

/// Beyond this magnitude every `f64` is an integer.
const F64_INTEGER_BOUND: f64 = 9_007_199_254_740_992.0;

/// Continued fractions of a double terminate well before this.
const MAX_CONVERGENTS: usize = 96;

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

fn reject_non_alphanumeric(part: &str, radix: u32) -> Result<(), ParseError> {
    match part.chars().find(|c| !c.is_ascii_alphanumeric()) {
        Some(digit) => Err(ParseError::InvalidDigit { digit, radix }),
        None => Ok(()),
    }
}

fn parse_exponent(exponent: &str, input: &str) -> Result<i64, ParseError> {
    let (negative, digits) = split_sign(exponent);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidExponent(input.to_string()));
    }
    let value: i64 = digits
        .parse()
        .map_err(|_| ParseError::InvalidExponent(input.to_string()))?;
    Ok(if negative { -value } else { value })
}

/// `[-]int[.frac][e[-]exp]`, digits only.
fn parse_decimal(negative: bool, body: &str, input: &str) -> Result<BigDouble, ParseError> {
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], parse_exponent(&body[i + 1..], input)?),
        None => (body, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(ParseError::Empty);
    }
    let digits = format!("{int_part}{frac_part}");
    if let Some(digit) = digits.chars().find(|c| !c.is_ascii_digit()) {
        return Err(ParseError::InvalidDigit { digit, radix: 10 });
    }

    let shift = exponent
        .checked_sub(frac_part.len() as i64)
        .filter(|s| s.unsigned_abs() <= MAX_DECIMAL_EXPONENT as u64)
        .ok_or(ParseError::ExponentOutOfRange(exponent))?;
    let (_, magnitude) = BigInt::from_str_radix(&digits, 10)?.into_parts();
    let scale = limbs::pow10(shift.unsigned_abs());
    Ok(if shift >= 0 {
        BigDouble::from_unreduced(negative, limbs::multiply(&magnitude, &scale), limbs::one())
    } else {
        BigDouble::from_unreduced(negative, magnitude, scale)
    })
}

/// Accepts `"n/d"` fractions, decimals like `"-0.25"` and scientific
/// notation like `"1.2e10"`.
///
/// ```
/// use bigdouble::BigDouble;
///
/// let x: BigDouble = "1.2e10".parse().unwrap();
/// assert_eq!(x.fraction_description(), "12000000000");
/// let y: BigDouble = "1.2".parse().unwrap();
/// assert_eq!(y.fraction_description(), "6/5");
/// let z: BigDouble = "-10/4".parse().unwrap();
/// assert_eq!(z.fraction_description(), "-5/2");
/// ```
impl FromStr for BigDouble {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if let Some((num, den)) = input.split_once('/') {
            let num: BigInt = num.trim().parse()?;
            let den: BigInt = den.trim().parse()?;
            return BigDouble::new(num, den).map_err(|_| ParseError::ZeroDenominator);
        }
        let (negative, body) = split_sign(input);
        parse_decimal(negative, body, input)
    }
}

impl BigDouble {
    /// Parse `[-]int[.frac]` in `radix` as a positional sum, so `"ff.8"` in
    /// radix 16 is `255.5`. The integer part may carry the radix's own
    /// `0x`/`0o`/`0b` prefix.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, ParseError> {
        if !(MIN_RADIX..=MAX_RADIX).contains(&radix) {
            return Err(ParseError::RadixOutOfRange(radix));
        }
        let (negative, body) = split_sign(s.trim());
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseError::Empty);
        }
        reject_non_alphanumeric(int_part, radix)?;
        reject_non_alphanumeric(frac_part, radix)?;

        let whole = if int_part.is_empty() {
            limbs::zero()
        } else {
            BigInt::from_str_radix(int_part, radix)?.into_parts().1
        };
        if frac_part.is_empty() {
            return Ok(BigDouble::from_reduced(negative, whole, limbs::one()));
        }
        let (_, fraction) = BigInt::from_str_radix(frac_part, radix)?.into_parts();
        let scale = limbs::pow(&[radix as u64], frac_part.len() as u64);
        let numerator = limbs::add(&limbs::multiply(&whole, &scale), &fraction);
        Ok(BigDouble::from_unreduced(negative, numerator, scale))
    }

    /// The simplest fraction that converts back to exactly `x`.
    ///
    /// ```
    /// use bigdouble::BigDouble;
    ///
    /// assert_eq!(BigDouble::from_f64(0.1).unwrap().fraction_description(), "1/10");
    /// assert_eq!(BigDouble::from_f64(-2.5).unwrap().fraction_description(), "-5/2");
    /// ```
    pub fn from_f64(x: f64) -> Result<Self, ArithmeticError> {
        Self::from_f64_with_epsilon(x, 0.0)
    }

    /// Continued-fraction approximation of `x`, stopping at the first
    /// convergent within `epsilon` of it.
    ///
    /// When the convergents outgrow `u64` first, the exact binary value of `x`
    /// is returned instead.
    pub fn from_f64_with_epsilon(x: f64, epsilon: f64) -> Result<Self, ArithmeticError> {
        if !x.is_finite() {
            return Err(ArithmeticError::NotFinite);
        }
        let negative = x.is_sign_negative();
        let target = x.abs();
        if target >= F64_INTEGER_BOUND {
            return Ok(Self::exact_f64(negative, target));
        }

        // (h, k) are the current convergent, (h_prev, k_prev) the one before.
        let (mut h_prev, mut h) = (0u64, 1u64);
        let (mut k_prev, mut k) = (1u64, 0u64);
        let mut rest = target;
        for _ in 0..MAX_CONVERGENTS {
            let a = rest.floor();
            let next = (a as u64)
                .checked_mul(h)
                .and_then(|v| v.checked_add(h_prev))
                .zip((a as u64).checked_mul(k).and_then(|v| v.checked_add(k_prev)));
            let Some((h_next, k_next)) = next else {
                break;
            };
            (h_prev, h) = (h, h_next);
            (k_prev, k) = (k, k_next);

            let approx = h as f64 / k as f64;
            if (approx - target).abs() <= epsilon {
                return Ok(Self::from_unreduced(negative, limbs::from_u64(h), limbs::from_u64(k)));
            }
            let frac = rest - a;
            if frac == 0.0 {
                break;
            }
            rest = frac.recip();
            if !rest.is_finite() || rest >= F64_INTEGER_BOUND {
                break;
            }
        }
        Ok(Self::exact_f64(negative, target))
    }

    /// `mantissa * 2^exponent` read straight from the bits of a finite,
    /// non-negative `x`.
    fn exact_f64(negative: bool, x: f64) -> Self {
        let bits = x.to_bits();
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & ((1u64 << 52) - 1);
        let (mantissa, exponent) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), biased - 1075)
        };
        let mantissa = limbs::from_u64(mantissa);
        if exponent >= 0 {
            Self::from_reduced(
                negative,
                limbs::shift_up(&mantissa, exponent as usize),
                limbs::one(),
            )
        } else {
            Self::from_unreduced(
                negative,
                mantissa,
                limbs::shift_up(&limbs::one(), exponent.unsigned_abs() as usize),
            )
        }
    }
}
