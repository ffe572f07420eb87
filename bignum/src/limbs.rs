//! Magnitude arithmetic on little-endian sequences of 64-bit limbs.
//!
//! A limb sequence is never empty: `[0]` is the only representation of zero
//! and no other sequence ends in a zero limb. Every function here borrows its
//! operands and returns a fresh canonical sequence. There is no sign; signs
//! live one layer up in [`crate::BigInt`].

use std::cmp::Ordering;

use rand::Rng;

/// One machine word of a magnitude.
pub type Limb = u64;

/// Bits per limb.
pub const LIMB_BITS: usize = 64;

// ============================================================================
// Low-level helpers
// ============================================================================

/// Add with carry: (result, carry) = a + b + carry_in
#[inline(always)]
const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let tmp = a as u128 + b as u128 + carry as u128;
    (tmp as u64, (tmp >> 64) as u64)
}

/// Subtract with borrow: (result, borrow) = a - b - borrow_in
#[inline(always)]
const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let tmp = (a as u128)
        .wrapping_sub(b as u128)
        .wrapping_sub(borrow as u128);
    (tmp as u64, (tmp >> 127) as u64)
}

/// Multiply-accumulate: (lo, carry) = a * b + c + carry_in
#[inline(always)]
const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let tmp = a as u128 * b as u128 + c as u128 + carry as u128;
    (tmp as u64, (tmp >> 64) as u64)
}

/// Full-width product of two limbs as `(high, low)`.
#[inline(always)]
pub const fn mul_wide(a: u64, b: u64) -> (u64, u64) {
    let tmp = a as u128 * b as u128;
    ((tmp >> 64) as u64, tmp as u64)
}

/// Length of `a` ignoring high zero limbs (a lone zero limb is kept).
#[inline]
fn effective_len(a: &[u64]) -> usize {
    let mut n = a.len();
    while n > 1 && a[n - 1] == 0 {
        n -= 1;
    }
    n
}

/// `a -= b` in place. Requires `a >= b`; `a` may carry high zero limbs.
fn sub_in_place(a: &mut [u64], b: &[u64]) {
    let mut borrow = 0u64;
    for (i, limb) in a.iter_mut().enumerate() {
        let rhs = b.get(i).copied().unwrap_or(0);
        if i >= b.len() && borrow == 0 {
            break;
        }
        let (r, br) = sbb(*limb, rhs, borrow);
        *limb = r;
        borrow = br;
    }
    debug_assert_eq!(borrow, 0, "sub_in_place underflow");
}

/// Shift `a` left by one bit in place, dropping the bit shifted out of the top.
fn shl1_in_place(a: &mut [u64]) {
    let mut carry = 0u64;
    for limb in a.iter_mut() {
        let next = *limb >> 63;
        *limb = (*limb << 1) | carry;
        carry = next;
    }
}

// ============================================================================
// Construction and shape
// ============================================================================

/// Canonical zero, `[0]`.
#[inline]
pub fn zero() -> Vec<u64> {
    vec![0]
}

/// Canonical one, `[1]`.
#[inline]
pub fn one() -> Vec<u64> {
    vec![1]
}

#[inline]
pub fn from_u64(v: u64) -> Vec<u64> {
    vec![v]
}

pub fn from_u128(v: u128) -> Vec<u64> {
    let mut limbs = vec![v as u64, (v >> 64) as u64];
    normalize(&mut limbs);
    limbs
}

/// Restore canonical form: drop high zero limbs, never leave the sequence empty.
pub fn normalize(limbs: &mut Vec<u64>) {
    let n = effective_len(limbs);
    limbs.truncate(n);
    if limbs.is_empty() {
        limbs.push(0);
    }
}

/// Copy of `a` in canonical form.
pub fn normalized(a: &[u64]) -> Vec<u64> {
    let mut limbs = a.to_vec();
    normalize(&mut limbs);
    limbs
}

/// Whether `a` is non-empty with no high zero limbs.
pub fn is_canonical(a: &[u64]) -> bool {
    match a.last() {
        None => false,
        Some(&top) => a.len() == 1 || top != 0,
    }
}

#[inline]
pub fn is_zero(a: &[u64]) -> bool {
    a.iter().all(|&l| l == 0)
}

#[inline]
pub fn is_one(a: &[u64]) -> bool {
    a.first() == Some(&1) && a[1..].iter().all(|&l| l == 0)
}

/// Value of `a` if it fits in one limb.
pub fn to_u64(a: &[u64]) -> Option<u64> {
    if effective_len(a) == 1 {
        a.first().copied()
    } else {
        None
    }
}

pub fn to_u128(a: &[u64]) -> Option<u128> {
    match effective_len(a) {
        1 => a.first().map(|&l| l as u128),
        2 => Some(a[0] as u128 | (a[1] as u128) << 64),
        _ => None,
    }
}

/// Nearest double, saturating to `f64::INFINITY` for huge magnitudes.
pub fn to_f64(a: &[u64]) -> f64 {
    let n = effective_len(a);
    a[..n]
        .iter()
        .rev()
        .fold(0.0f64, |acc, &limb| acc * 18_446_744_073_709_551_616.0 + limb as f64)
}

/// Number of significant bits; 0 for zero.
pub fn bit_len(a: &[u64]) -> usize {
    let n = effective_len(a);
    if n == 0 {
        return 0;
    }
    match a.get(n - 1) {
        Some(&top) if top != 0 => {
            (n - 1) * LIMB_BITS + (LIMB_BITS - top.leading_zeros() as usize)
        }
        _ => 0,
    }
}

/// Number of trailing zero bits; 0 for zero.
pub fn trailing_zeros(a: &[u64]) -> usize {
    for (i, &limb) in a.iter().enumerate() {
        if limb != 0 {
            return i * LIMB_BITS + limb.trailing_zeros() as usize;
        }
    }
    0
}

// ============================================================================
// Comparison
// ============================================================================

/// Length first, then most significant limb first.
pub fn cmp(a: &[u64], b: &[u64]) -> Ordering {
    let (na, nb) = (effective_len(a), effective_len(b));
    if na != nb {
        return na.cmp(&nb);
    }
    for i in (0..na).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

#[inline]
pub fn less_than(a: &[u64], b: &[u64]) -> bool {
    cmp(a, b) == Ordering::Less
}

#[inline]
pub fn equal_to(a: &[u64], b: &[u64]) -> bool {
    cmp(a, b) == Ordering::Equal
}

// ============================================================================
// Arithmetic
// ============================================================================

/// `a + b`. The result has at most one more limb than the longer operand.
///
/// ```
/// use bignum::limbs;
///
/// let sum = limbs::add(&[u64::MAX], &[1]);
/// assert_eq!(sum, vec![0, 1]);
/// ```
pub fn add(a: &[u64], b: &[u64]) -> Vec<u64> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut result = Vec::with_capacity(long.len() + 1);
    let mut carry = 0u64;
    for (i, &x) in long.iter().enumerate() {
        let (r, c) = adc(x, short.get(i).copied().unwrap_or(0), carry);
        result.push(r);
        carry = c;
    }
    if carry != 0 {
        result.push(carry);
    }
    normalize(&mut result);
    result
}

/// `|a - b|`. Operands are swapped when `a < b`.
pub fn difference(a: &[u64], b: &[u64]) -> Vec<u64> {
    let (big, small) = if less_than(a, b) { (b, a) } else { (a, b) };
    let mut result = Vec::with_capacity(big.len());
    let mut borrow = 0u64;
    for (i, &x) in big.iter().enumerate() {
        let (r, br) = sbb(x, small.get(i).copied().unwrap_or(0), borrow);
        result.push(r);
        borrow = br;
    }
    debug_assert_eq!(borrow, 0);
    normalize(&mut result);
    result
}

/// Schoolbook product. Zero limbs of `a` are skipped.
///
/// ```
/// use bignum::limbs;
///
/// // (2^64 - 1)^2 = 2^128 - 2^65 + 1
/// let p = limbs::multiply(&[u64::MAX], &[u64::MAX]);
/// assert_eq!(p, vec![1, 0xffff_ffff_ffff_fffe]);
/// ```
pub fn multiply(a: &[u64], b: &[u64]) -> Vec<u64> {
    if is_zero(a) || is_zero(b) {
        return zero();
    }
    let (a, b) = (&a[..effective_len(a)], &b[..effective_len(b)]);
    let mut wide = vec![0u64; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &y) in b.iter().enumerate() {
            let (lo, hi) = mac(x, y, wide[i + j], carry);
            wide[i + j] = lo;
            carry = hi;
        }
        wide[i + b.len()] = carry;
    }
    normalize(&mut wide);
    wide
}

/// `a * a`, computing each off-diagonal partial product once and doubling.
pub fn square(a: &[u64]) -> Vec<u64> {
    if is_zero(a) {
        return zero();
    }
    let a = &a[..effective_len(a)];
    let n = a.len();
    let mut wide = vec![0u64; 2 * n];

    for i in 0..n {
        if a[i] == 0 {
            continue;
        }
        let mut carry = 0u64;
        for j in (i + 1)..n {
            let (lo, hi) = mac(a[i], a[j], wide[i + j], carry);
            wide[i + j] = lo;
            carry = hi;
        }
        wide[i + n] = carry;
    }

    // Cross terms appear twice in the square.
    shl1_in_place(&mut wide);

    let mut carry = 0u64;
    for (i, &x) in a.iter().enumerate() {
        let (hi, lo) = mul_wide(x, x);
        let (r, c) = adc(wide[2 * i], lo, carry);
        wide[2 * i] = r;
        let (r, c) = adc(wide[2 * i + 1], hi, c);
        wide[2 * i + 1] = r;
        carry = c;
    }
    debug_assert_eq!(carry, 0);

    normalize(&mut wide);
    wide
}

/// `base^exp` by repeated squaring.
pub fn pow(base: &[u64], mut exp: u64) -> Vec<u64> {
    let mut result = one();
    let mut acc = normalized(base);
    while exp > 0 {
        if exp & 1 == 1 {
            result = multiply(&result, &acc);
        }
        exp >>= 1;
        if exp > 0 {
            acc = square(&acc);
        }
    }
    result
}

/// `10^exp`.
pub fn pow10(exp: u64) -> Vec<u64> {
    pow(&[10], exp)
}

/// Short division by a single limb: `(a / d, a % d)`.
///
/// Panics if `d == 0`.
pub fn div_mod_limb(a: &[u64], d: u64) -> (Vec<u64>, u64) {
    assert!(d != 0, "attempt to divide by zero");
    let mut quotient = vec![0u64; a.len().max(1)];
    let mut remainder = 0u128;
    for i in (0..a.len()).rev() {
        let combined = (remainder << 64) | a[i] as u128;
        quotient[i] = (combined / d as u128) as u64;
        remainder = combined % d as u128;
    }
    normalize(&mut quotient);
    (quotient, remainder as u64)
}

/// `a % d` for a single-limb divisor.
pub fn rem_limb(a: &[u64], d: u64) -> u64 {
    assert!(d != 0, "attempt to divide by zero");
    let mut remainder = 0u128;
    for &limb in a.iter().rev() {
        remainder = ((remainder << 64) | limb as u128) % d as u128;
    }
    remainder as u64
}

/// Binary restoring long division: `(dividend / divisor, dividend % divisor)`.
///
/// Walks the dividend from its most significant bit down, shifting each bit
/// into a running remainder and subtracting the divisor whenever it fits.
/// A single-limb divisor takes the short-division path instead.
///
/// Panics if `divisor` is zero.
///
/// ```
/// use bignum::limbs;
///
/// let (q, r) = limbs::div_mod(&[0, 1], &[3]); // 2^64 / 3
/// assert_eq!(q, vec![0x5555_5555_5555_5555]);
/// assert_eq!(r, vec![1]);
/// ```
pub fn div_mod(dividend: &[u64], divisor: &[u64]) -> (Vec<u64>, Vec<u64>) {
    assert!(!is_zero(divisor), "attempt to divide by zero");
    if less_than(dividend, divisor) {
        return (zero(), normalized(dividend));
    }
    let divisor = &divisor[..effective_len(divisor)];
    if divisor.len() == 1 {
        let (q, r) = div_mod_limb(dividend, divisor[0]);
        return (q, vec![r]);
    }

    let dividend = &dividend[..effective_len(dividend)];
    let mut quotient = vec![0u64; dividend.len()];
    // remainder < divisor before each shift, so one spare limb is enough
    let mut remainder = vec![0u64; divisor.len() + 1];

    for i in (0..bit_len(dividend)).rev() {
        shl1_in_place(&mut remainder);
        remainder[0] |= (dividend[i / LIMB_BITS] >> (i % LIMB_BITS)) & 1;
        if !less_than(&remainder, divisor) {
            sub_in_place(&mut remainder, divisor);
            quotient[i / LIMB_BITS] |= 1u64 << (i % LIMB_BITS);
        }
    }

    normalize(&mut quotient);
    normalize(&mut remainder);
    (quotient, remainder)
}

// ============================================================================
// Bits and shifts
// ============================================================================

/// Bit `i` of `a`; bits past the end read as zero.
pub fn get_bit(a: &[u64], i: usize) -> bool {
    a.get(i / LIMB_BITS)
        .map_or(false, |&limb| (limb >> (i % LIMB_BITS)) & 1 == 1)
}

/// Copy of `a` with bit `i` set to `value`.
///
/// Setting a bit past the end grows the sequence; clearing one is a no-op.
pub fn set_bit(a: &[u64], i: usize, value: bool) -> Vec<u64> {
    let mut limbs = a.to_vec();
    set_bit_in_place(&mut limbs, i, value);
    normalize(&mut limbs);
    limbs
}

pub(crate) fn set_bit_in_place(limbs: &mut Vec<u64>, i: usize, value: bool) {
    let (limb, bit) = (i / LIMB_BITS, i % LIMB_BITS);
    if limb >= limbs.len() {
        if !value {
            return;
        }
        limbs.resize(limb + 1, 0);
    }
    if value {
        limbs[limb] |= 1u64 << bit;
    } else {
        limbs[limb] &= !(1u64 << bit);
    }
}

/// `a << n`: whole-limb insertion, then a sub-limb shift with carry.
pub fn shift_up(a: &[u64], n: usize) -> Vec<u64> {
    if is_zero(a) {
        return zero();
    }
    let a = &a[..effective_len(a)];
    let (limb_shift, bit_shift) = (n / LIMB_BITS, n % LIMB_BITS);
    let mut result = vec![0u64; limb_shift];
    result.reserve(a.len() + 1);
    if bit_shift == 0 {
        result.extend_from_slice(a);
    } else {
        let mut carry = 0u64;
        for &limb in a {
            result.push((limb << bit_shift) | carry);
            carry = limb >> (LIMB_BITS - bit_shift);
        }
        if carry != 0 {
            result.push(carry);
        }
    }
    normalize(&mut result);
    result
}

/// `a >> n`. Shifting past the top yields `[0]`.
pub fn shift_down(a: &[u64], n: usize) -> Vec<u64> {
    let (limb_shift, bit_shift) = (n / LIMB_BITS, n % LIMB_BITS);
    if limb_shift >= a.len() {
        return zero();
    }
    let src = &a[limb_shift..];
    let mut result = Vec::with_capacity(src.len());
    if bit_shift == 0 {
        result.extend_from_slice(src);
    } else {
        for i in 0..src.len() {
            let high = src
                .get(i + 1)
                .map_or(0, |&next| next << (LIMB_BITS - bit_shift));
            result.push((src[i] >> bit_shift) | high);
        }
    }
    normalize(&mut result);
    result
}

/// Limb-wise combination of two magnitudes, padding the shorter with zeros.
pub fn zip_with(a: &[u64], b: &[u64], f: impl Fn(u64, u64) -> u64) -> Vec<u64> {
    let n = a.len().max(b.len());
    let mut result: Vec<u64> = (0..n)
        .map(|i| f(a.get(i).copied().unwrap_or(0), b.get(i).copied().unwrap_or(0)))
        .collect();
    normalize(&mut result);
    result
}

/// Flip every bit of every limb.
pub fn bit_not(a: &[u64]) -> Vec<u64> {
    let mut result: Vec<u64> = a.iter().map(|&l| !l).collect();
    normalize(&mut result);
    result
}

// ============================================================================
// Randomness
// ============================================================================

/// Uniformly random magnitude below `2^bits`.
///
/// Whole limbs are filled from `rng`; the top partial limb is masked.
pub fn random<R: Rng>(bits: usize, rng: &mut R) -> Vec<u64> {
    if bits == 0 {
        return zero();
    }
    let n = bits.div_ceil(LIMB_BITS);
    let mut limbs: Vec<u64> = (0..n).map(|_| rng.gen::<u64>()).collect();
    let partial = bits % LIMB_BITS;
    if partial != 0 {
        limbs[n - 1] &= (1u64 << partial) - 1;
    }
    normalize(&mut limbs);
    limbs
}

// ============================================================================
// Tests
// ============================================================================
