//! Text rendering for [`BigDouble`]: exact fraction, fixed decimal and
//! scientific notation with superscript exponents.

use std::fmt;

use bignum::{limbs, BigInt};

use crate::{BigDouble, NumericConfig};

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

fn decimal_string(magnitude: &[u64]) -> String {
    BigInt::from_parts(false, magnitude.to_vec()).to_string()
}

fn superscript(exponent: i64) -> String {
    let mut out = String::new();
    if exponent < 0 {
        out.push('⁻');
    }
    for b in exponent.unsigned_abs().to_string().bytes() {
        out.push(SUPERSCRIPT_DIGITS[(b - b'0') as usize]);
    }
    out
}

/// Put a decimal point before the last `places` digits, zero-padding on the
/// left so at least one integer digit remains.
fn insert_point(digits: &str, places: usize) -> String {
    if places == 0 {
        return digits.to_string();
    }
    let padded = if digits.len() <= places {
        format!("{}{digits}", "0".repeat(places + 1 - digits.len()))
    } else {
        digits.to_string()
    };
    let (int, frac) = padded.split_at(padded.len() - places);
    format!("{int}.{frac}")
}

/// `floor(num * 10^shift / den)` for a signed decimal shift.
fn scaled_quotient(num: &[u64], den: &[u64], shift: i64) -> Vec<u64> {
    let scale = limbs::pow10(shift.unsigned_abs());
    if shift >= 0 {
        limbs::div_mod(&limbs::multiply(num, &scale), den).0
    } else {
        limbs::div_mod(num, &limbs::multiply(den, &scale)).0
    }
}

/// Drop the guard digit, rounding half away from zero.
fn round_guard_digit(q: &[u64]) -> Vec<u64> {
    limbs::div_mod_limb(&limbs::add(q, &[5]), 10).0
}

impl BigDouble {
    /// Exact `numerator/denominator`, or just the numerator for integers.
    pub fn fraction_description(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = decimal_string(self.numerator_limbs());
        if self.is_integer() {
            format!("{sign}{num}")
        } else {
            format!("{sign}{num}/{}", decimal_string(self.denominator_limbs()))
        }
    }

    /// Fixed-point decimal with `cfg.precision` fractional digits.
    ///
    /// ```
    /// use bigdouble::{BigDouble, NumericConfig};
    ///
    /// let x: BigDouble = "2/3".parse().unwrap();
    /// assert_eq!(x.decimal_description(&NumericConfig::DEFAULT), "0.6667");
    /// ```
    pub fn decimal_description(&self, cfg: &NumericConfig) -> String {
        let places = cfg.precision;
        let q = scaled_quotient(
            self.numerator_limbs(),
            self.denominator_limbs(),
            places as i64 + 1,
        );
        let rounded = round_guard_digit(&q);
        let body = insert_point(&decimal_string(&rounded), places);
        if self.is_negative() && !limbs::is_zero(&rounded) {
            format!("-{body}")
        } else {
            body
        }
    }

    /// `d.ddd×10ⁿ` with `cfg.precision` digits after the point.
    ///
    /// ```
    /// use bigdouble::{BigDouble, NumericConfig};
    ///
    /// let x: BigDouble = "-0.00012345".parse().unwrap();
    /// assert_eq!(x.scientific_description(&NumericConfig::DEFAULT), "-1.2345×10⁻⁴");
    /// ```
    pub fn scientific_description(&self, cfg: &NumericConfig) -> String {
        let places = cfg.precision;
        if self.is_zero() {
            return format!("{}×10⁰", insert_point(&"0".repeat(places + 1), places));
        }
        let (num, den) = (self.numerator_limbs(), self.denominator_limbs());

        // 10^e <= |self| < 10^(e+1), found from the digit counts and one check.
        let mut exponent = decimal_string(num).len() as i64 - decimal_string(den).len() as i64;
        if limbs::is_zero(&scaled_quotient(num, den, -exponent)) {
            exponent -= 1;
        }

        let q = scaled_quotient(num, den, places as i64 + 1 - exponent);
        let mut mantissa = round_guard_digit(&q);
        let limit = limbs::pow10(places as u64 + 1);
        if !limbs::less_than(&mantissa, &limit) {
            // 9.99995 rounded up to 10.0000
            mantissa = limbs::div_mod_limb(&mantissa, 10).0;
            exponent += 1;
        }

        let sign = if self.is_negative() { "-" } else { "" };
        let digits = insert_point(&decimal_string(&mantissa), places);
        format!("{sign}{digits}×10{}", superscript(exponent))
    }
}

/// Fixed decimal at [`NumericConfig::DEFAULT`] precision; `{:.N}` overrides
/// the number of fractional digits.
impl fmt::Display for BigDouble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = match f.precision() {
            Some(precision) => NumericConfig::DEFAULT.with_precision(precision),
            None => NumericConfig::DEFAULT,
        };
        f.write_str(&self.decimal_description(&cfg))
    }
}

impl fmt::Debug for BigDouble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigDouble({})", self.fraction_description())
    }
}
