//! Radix conversion for [`BigInt`], bases 2 through 62.
//!
//! Digits are `0-9`, then `a-z`, then `A-Z`. Up to radix 36 letters are
//! case-insensitive, so `"FF"` and `"ff"` both parse in base 16.

use std::str::FromStr;

use super::BigInt;
use crate::error::ParseError;
use crate::limbs;

pub const MIN_RADIX: u32 = 2;
pub const MAX_RADIX: u32 = 62;

const DIGITS: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn check_radix(radix: u32) -> Result<(), ParseError> {
    if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        Ok(())
    } else {
        Err(ParseError::RadixOutOfRange(radix))
    }
}

fn digit_value(c: char, radix: u32) -> Option<u32> {
    let v = match c {
        '0'..='9' => c as u32 - '0' as u32,
        'a'..='z' => c as u32 - 'a' as u32 + 10,
        'A'..='Z' if radix <= 36 => c as u32 - 'A' as u32 + 10,
        'A'..='Z' => c as u32 - 'A' as u32 + 36,
        _ => return None,
    };
    (v < radix).then_some(v)
}

/// Largest `k` with `radix^k` fitting in a limb, and that power.
fn chunk_for(radix: u32) -> (usize, u64) {
    let radix = radix as u64;
    let (mut len, mut base) = (1usize, radix);
    while let Some(next) = base.checked_mul(radix) {
        base = next;
        len += 1;
    }
    (len, base)
}

/// `a * m + c` for single-limb `m` and `c`.
fn mul_add(a: &[u64], m: u64, c: u64) -> Vec<u64> {
    limbs::add(&limbs::multiply(a, &[m]), &[c])
}

/// Strip a leading `-` or `+`.
pub(crate) fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

/// Strip a `0x`/`0o`/`0b` prefix and report the radix it names.
pub(crate) fn split_prefix(s: &str) -> (Option<u32>, &str) {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(r) = radix {
            return (Some(r), &s[2..]);
        }
    }
    (None, s)
}

/// Parse unsigned `digits` in `radix`, one limb-sized chunk at a time.
pub(crate) fn parse_magnitude(digits: &str, radix: u32) -> Result<Vec<u64>, ParseError> {
    check_radix(radix)?;
    if digits.is_empty() {
        return Err(ParseError::Empty);
    }
    let (chunk_len, chunk_base) = chunk_for(radix);
    let mut acc = limbs::zero();
    let (mut chunk, mut len) = (0u64, 0usize);
    for c in digits.chars() {
        let d = digit_value(c, radix).ok_or(ParseError::InvalidDigit { digit: c, radix })?;
        chunk = chunk * radix as u64 + d as u64;
        len += 1;
        if len == chunk_len {
            acc = mul_add(&acc, chunk_base, chunk);
            chunk = 0;
            len = 0;
        }
    }
    if len > 0 {
        acc = mul_add(&acc, (radix as u64).pow(len as u32), chunk);
    }
    Ok(acc)
}

/// Digits of `magnitude` in `radix`, most significant first. Radix must be valid.
pub(crate) fn format_magnitude(magnitude: &[u64], radix: u32) -> String {
    if limbs::is_zero(magnitude) {
        return "0".to_string();
    }
    let (chunk_len, chunk_base) = chunk_for(radix);
    let radix = radix as u64;
    // least significant digit first, reversed at the end
    let mut digits = Vec::new();
    let mut rest = limbs::normalized(magnitude);
    while !limbs::is_zero(&rest) {
        let (q, mut r) = limbs::div_mod_limb(&rest, chunk_base);
        for _ in 0..chunk_len {
            digits.push(DIGITS[(r % radix) as usize]);
            r /= radix;
        }
        rest = q;
    }
    while digits.len() > 1 && digits.last() == Some(&b'0') {
        digits.pop();
    }
    digits.iter().rev().map(|&d| d as char).collect()
}

impl BigInt {
    /// Parse `s` in `radix`, with an optional sign.
    ///
    /// A `0x`, `0o` or `0b` prefix is accepted when it names `radix` itself.
    ///
    /// ```
    /// use bignum::BigInt;
    ///
    /// assert_eq!(BigInt::from_str_radix("-ff", 16).unwrap(), BigInt::from(-255));
    /// assert_eq!(BigInt::from_str_radix("0xff", 16).unwrap(), BigInt::from(255));
    /// assert_eq!(BigInt::from_str_radix("Z", 62).unwrap(), BigInt::from(61));
    /// assert!(BigInt::from_str_radix("12", 63).is_err());
    /// ```
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, ParseError> {
        check_radix(radix)?;
        let (negative, body) = split_sign(s.trim());
        let body = match split_prefix(body) {
            (Some(r), rest) if r == radix => rest,
            _ => body,
        };
        Ok(Self::from_parts(negative, parse_magnitude(body, radix)?))
    }

    /// Render in `radix` with lowercase digits first, then uppercase.
    pub fn to_str_radix(&self, radix: u32) -> Result<String, ParseError> {
        check_radix(radix)?;
        let digits = format_magnitude(&self.magnitude, radix);
        Ok(if self.negative {
            format!("-{digits}")
        } else {
            digits
        })
    }
}

/// Decimal by default; `0x`, `0o` and `0b` select another radix.
impl FromStr for BigInt {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, body) = split_sign(s.trim());
        let (radix, digits) = split_prefix(body);
        Ok(Self::from_parts(
            negative,
            parse_magnitude(digits, radix.unwrap_or(10))?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_for() {
        assert_eq!(chunk_for(10), (19, 10_000_000_000_000_000_000));
        assert_eq!(chunk_for(2), (63, 1 << 63));
        assert_eq!(chunk_for(16), (15, 1 << 60));
    }

    #[test]
    fn test_parse_decimal() {
        let dec = "123456789012345678901234567890";
        let b: BigInt = dec.parse().unwrap();
        assert_eq!(b.to_string(), dec);
        assert_eq!("-0".parse::<BigInt>().unwrap(), BigInt::zero());
        assert_eq!("+17".parse::<BigInt>().unwrap(), BigInt::from(17));
    }

    #[test]
    fn test_parse_prefixes() {
        assert_eq!("0x2a".parse::<BigInt>().unwrap(), BigInt::from(42));
        assert_eq!("0o52".parse::<BigInt>().unwrap(), BigInt::from(42));
        assert_eq!("-0b101010".parse::<BigInt>().unwrap(), BigInt::from(-42));
        assert_eq!("0XFF".parse::<BigInt>().unwrap(), BigInt::from(255));
    }

    #[test]
    fn test_prefix_only_strips_matching_radix() {
        // In base 36 `x` is a digit, so `0x1` is just a number.
        let v = BigInt::from_str_radix("0x1", 36).unwrap();
        assert_eq!(v, BigInt::from(33 * 36 + 1));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<BigInt>(), Err(ParseError::Empty));
        assert_eq!("-".parse::<BigInt>(), Err(ParseError::Empty));
        assert_eq!("0x".parse::<BigInt>(), Err(ParseError::Empty));
        assert_eq!(
            "12a".parse::<BigInt>(),
            Err(ParseError::InvalidDigit {
                digit: 'a',
                radix: 10
            })
        );
        assert_eq!(
            BigInt::from_str_radix("1", 1),
            Err(ParseError::RadixOutOfRange(1))
        );
        assert_eq!(
            BigInt::zero().to_str_radix(63),
            Err(ParseError::RadixOutOfRange(63))
        );
    }

    #[test]
    fn test_base62_case_sensitive() {
        let lower = BigInt::from_str_radix("a", 62).unwrap();
        let upper = BigInt::from_str_radix("A", 62).unwrap();
        assert_eq!(lower, BigInt::from(10));
        assert_eq!(upper, BigInt::from(36));
    }

    #[test]
    fn test_to_str_radix() {
        let v = BigInt::from(u128::MAX);
        assert_eq!(v.to_str_radix(16).unwrap(), "f".repeat(32));
        assert_eq!(v.to_str_radix(2).unwrap(), "1".repeat(128));
        assert_eq!(BigInt::from(-61).to_str_radix(62).unwrap(), "-Z");
        assert_eq!(BigInt::zero().to_str_radix(7).unwrap(), "0");
    }

    #[test]
    fn test_cross_radix_roundtrip() {
        let s = "zYx0123AbC";
        let v = BigInt::from_str_radix(s, 62).unwrap();
        let via7 = v.to_str_radix(7).unwrap();
        let back = BigInt::from_str_radix(&via7, 7).unwrap();
        assert_eq!(back.to_str_radix(62).unwrap(), s);
    }
}
