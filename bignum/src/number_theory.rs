//! Number-theory helpers built on [`BigInt`] and the limb engine.
//!
//! GCD is the binary (Stein) algorithm: shifts and subtraction only, no
//! division. [`binary_gcd`] works on raw limbs so rational reduction can use
//! it without going through a signed value.

use rand::Rng;

use crate::bigint::range_product;
use crate::error::ArithmeticError;
use crate::limbs;
use crate::BigInt;

// ============================================================================
// GCD / LCM
// ============================================================================

/// Greatest common divisor of two magnitudes. `gcd(0, b) = b`.
pub fn binary_gcd(a: &[u64], b: &[u64]) -> Vec<u64> {
    if limbs::is_zero(a) {
        return limbs::normalized(b);
    }
    if limbs::is_zero(b) {
        return limbs::normalized(a);
    }
    let (za, zb) = (limbs::trailing_zeros(a), limbs::trailing_zeros(b));
    let shift = za.min(zb);
    let mut x = limbs::shift_down(a, za);
    let mut y = limbs::shift_down(b, zb);
    // x and y are odd from here on
    loop {
        match limbs::cmp(&x, &y) {
            std::cmp::Ordering::Equal => break,
            std::cmp::Ordering::Greater => {
                let d = limbs::difference(&x, &y);
                x = limbs::shift_down(&d, limbs::trailing_zeros(&d));
            }
            std::cmp::Ordering::Less => {
                let d = limbs::difference(&y, &x);
                y = limbs::shift_down(&d, limbs::trailing_zeros(&d));
            }
        }
    }
    limbs::shift_up(&x, shift)
}

/// Non-negative GCD of two integers.
///
/// ```
/// use bignum::{number_theory::gcd, BigInt};
///
/// assert_eq!(gcd(&BigInt::from(-48), &BigInt::from(180)), BigInt::from(12));
/// ```
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    BigInt::from_parts(false, binary_gcd(a.magnitude(), b.magnitude()))
}

/// Non-negative least common multiple; zero if either operand is zero.
pub fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    let g = binary_gcd(a.magnitude(), b.magnitude());
    let (q, _) = limbs::div_mod(a.magnitude(), &g);
    BigInt::from_parts(false, limbs::multiply(&q, b.magnitude()))
}

// ============================================================================
// Modular arithmetic
// ============================================================================

/// `a mod |m|` in `[0, |m|)`. `m` must be non-zero.
fn reduce(a: &BigInt, m: &BigInt) -> BigInt {
    let r = a % m;
    if r.is_negative() {
        r + m.abs()
    } else {
        r
    }
}

/// Remainder of `a` by `m`, moved into `[0, |m|)`.
///
/// ```
/// use bignum::{number_theory::nnmod, BigInt};
///
/// assert_eq!(nnmod(&BigInt::from(-7), &BigInt::from(3)).unwrap(), BigInt::from(2));
/// ```
pub fn nnmod(a: &BigInt, m: &BigInt) -> Result<BigInt, ArithmeticError> {
    if m.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(reduce(a, m))
}

/// `base^exp mod |modulus|`, square-and-multiply over the exponent bits with
/// a reduction after every product.
pub fn mod_exp(base: &BigInt, exp: &BigInt, modulus: &BigInt) -> Result<BigInt, ArithmeticError> {
    if modulus.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    if exp.is_negative() {
        return Err(ArithmeticError::NegativeExponent);
    }
    let m = modulus.abs();
    if m.is_one() {
        return Ok(BigInt::zero());
    }
    let mut result = BigInt::one();
    let mut acc = reduce(base, &m);
    for i in 0..exp.bit_len() {
        if exp.get_bit(i) {
            result = (&result * &acc) % &m;
        }
        acc = acc.square() % &m;
    }
    Ok(result)
}

// ============================================================================
// Primes
// ============================================================================

/// Trial division by 2, 3 and then `6k ± 1` up to the square root.
pub fn is_prime(n: &BigInt) -> bool {
    if n.is_negative() {
        return false;
    }
    let m = n.magnitude();
    if let Some(small) = limbs::to_u64(m) {
        if small < 4 {
            return small >= 2;
        }
    }
    if limbs::rem_limb(m, 2) == 0 || limbs::rem_limb(m, 3) == 0 {
        return false;
    }
    let mut i: u64 = 5;
    loop {
        let square = limbs::from_u128(i as u128 * i as u128);
        if limbs::less_than(m, &square) {
            return true;
        }
        if limbs::rem_limb(m, i) == 0 || limbs::rem_limb(m, i + 2) == 0 {
            return false;
        }
        i = match i.checked_add(6) {
            Some(next) => next,
            None => return has_no_wide_divisor(m, limbs::from_u128(i as u128 + 6)),
        };
    }
}

/// `6k ± 1` trial division of `m` with limb-wide divisors from `start`
/// (a `6k - 1` value) up to the square root.
fn has_no_wide_divisor(m: &[u64], start: Vec<u64>) -> bool {
    let mut i = start;
    loop {
        if limbs::less_than(m, &limbs::square(&i)) {
            return true;
        }
        let twin = limbs::add(&i, &[2]);
        if limbs::is_zero(&limbs::div_mod(m, &i).1) || limbs::is_zero(&limbs::div_mod(m, &twin).1) {
            return false;
        }
        i = limbs::add(&i, &[6]);
    }
}

/// Whether `2^p - 1` is prime, by the Lucas–Lehmer residue test.
///
/// ```
/// use bignum::number_theory::is_mersenne_prime;
///
/// assert!(is_mersenne_prime(7)); // 127
/// assert!(!is_mersenne_prime(11)); // 2047 = 23 * 89
/// ```
pub fn is_mersenne_prime(p: u64) -> bool {
    if p == 2 {
        return true;
    }
    // composite exponents give composite Mersenne numbers
    if !is_prime(&BigInt::from(p)) {
        return false;
    }
    let mersenne = BigInt::from_parts(
        false,
        limbs::difference(&limbs::shift_up(&limbs::one(), p as usize), &limbs::one()),
    );
    let two = BigInt::from(2);
    let mut s = BigInt::from(4);
    for _ in 0..p - 2 {
        s = reduce(&(s.square() - &two), &mersenne);
    }
    s.is_zero()
}

/// Prime factors of `|n|` in ascending order, with multiplicity.
///
/// Trial divisors increase by one; the remaining cofactor is re-tested for
/// primality each time it shrinks so a large prime tail ends the search.
pub fn prime_factors(n: &BigInt) -> Vec<BigInt> {
    let mut factors = Vec::new();
    let mut rest = n.abs();
    if rest.bit_len() <= 1 {
        return factors;
    }
    let mut rest_is_prime = is_prime(&rest);
    let mut d: u64 = 2;
    while !rest.is_one() {
        if rest_is_prime {
            factors.push(rest);
            break;
        }
        let mut shrunk = false;
        loop {
            let (q, r) = limbs::div_mod_limb(rest.magnitude(), d);
            if r != 0 {
                break;
            }
            factors.push(BigInt::from(d));
            rest = BigInt::from_parts(false, q);
            shrunk = true;
        }
        if shrunk {
            rest_is_prime = is_prime(&rest);
        }
        d += 1;
    }
    factors
}

// ============================================================================
// Sequences and combinatorics
// ============================================================================

/// `n!`. See [`BigInt::factorial`].
pub fn factorial(n: &BigInt) -> Result<BigInt, ArithmeticError> {
    n.factorial()
}

/// `F(n)` with `F(0) = 0`, `F(1) = 1`.
pub fn fibonacci(n: u64) -> BigInt {
    let (mut a, mut b) = (limbs::zero(), limbs::one());
    for _ in 0..n {
        let next = limbs::add(&a, &b);
        a = std::mem::replace(&mut b, next);
    }
    BigInt::from_parts(false, a)
}

/// Ordered selections of `k` from `n`: `n! / (n - k)!`.
pub fn permutations(n: u64, k: u64) -> BigInt {
    if k > n {
        return BigInt::zero();
    }
    BigInt::from_parts(false, range_product(n - k, n))
}

/// Unordered selections of `k` from `n`: `n! / (k! (n - k)!)`.
///
/// ```
/// use bignum::{number_theory::combinations, BigInt};
///
/// assert_eq!(combinations(52, 5), BigInt::from(2_598_960));
/// ```
pub fn combinations(n: u64, k: u64) -> BigInt {
    if k > n {
        return BigInt::zero();
    }
    let k = k.min(n - k);
    let (q, _) = limbs::div_mod(&range_product(n - k, n), &range_product(0, k));
    BigInt::from_parts(false, q)
}

/// Ordered selections of `k` from `n` with repetition: `n^k`.
pub fn permutations_with_repetition(n: u64, k: u64) -> BigInt {
    BigInt::from_parts(false, limbs::pow(&[n], k))
}

/// Multisets of size `k` from `n` kinds: `C(n + k - 1, k)`.
pub fn combinations_with_repetition(n: u64, k: u64) -> Result<BigInt, ArithmeticError> {
    if k == 0 {
        return Ok(BigInt::one());
    }
    if n == 0 {
        return Ok(BigInt::zero());
    }
    let top = (n - 1).checked_add(k).ok_or(ArithmeticError::TooLarge)?;
    Ok(combinations(top, k))
}

// ============================================================================
// Randomness
// ============================================================================

/// Uniformly random non-negative integer below `2^bits`.
pub fn random_bits(bits: usize) -> BigInt {
    random_bits_with(bits, &mut rand::thread_rng())
}

/// [`random_bits`] drawing from a caller-supplied generator.
pub fn random_bits_with<R: Rng>(bits: usize, rng: &mut R) -> BigInt {
    BigInt::from_parts(false, limbs::random(bits, rng))
}

// ============================================================================
// Tests
// ============================================================================
