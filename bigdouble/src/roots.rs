//! Roots and rational powers of [`BigDouble`] values.
//!
//! Small values whose tolerance a double can meet go through `f64::powf`.
//! Everything else refines an estimate with Newton's method,
//! `x' = ((n-1)·x + v / x^(n-1)) / n`, until successive iterates agree to
//! [`NumericConfig::epsilon`]. Perfect powers come back exact either way.

use bignum::{limbs, ArithmeticError};
use tracing::warn;

use crate::{BigDouble, NumericConfig};

/// Widest part, in bits, for which `to_f64` is exact.
const F64_EXACT_BITS: usize = 53;

/// Decimal digits a double reliably carries.
const F64_DIGITS: usize = 15;

/// `log2` of a non-zero magnitude from its top 64 bits.
fn log2(a: &[u64]) -> f64 {
    let shift = limbs::bit_len(a).saturating_sub(64);
    limbs::to_f64(&limbs::shift_down(a, shift)).log2() + shift as f64
}

/// `2^k` for a signed `k`.
fn pow2(k: i64) -> BigDouble {
    let power = limbs::shift_up(&limbs::one(), k.unsigned_abs() as usize);
    if k >= 0 {
        BigDouble::from_reduced(false, power, limbs::one())
    } else {
        BigDouble::from_reduced(false, limbs::one(), power)
    }
}

/// `floor(value^(1/n))` by integer Newton steps from `estimate`, for a
/// non-zero `value`.
fn integer_root(value: &[u64], n: u64, estimate: Vec<u64>) -> Vec<u64> {
    let step = |x: &[u64]| {
        let (q, _) = limbs::div_mod(value, &limbs::pow(x, n - 1));
        let sum = limbs::add(&limbs::multiply(x, &[n - 1]), &q);
        limbs::div_mod_limb(&sum, n).0
    };
    // One step from any positive start lands at or above the floor root;
    // from there the iterates decrease until they stop.
    let start = if limbs::is_zero(&estimate) { limbs::one() } else { estimate };
    let mut x = step(&start);
    loop {
        let y = step(&x);
        if !limbs::less_than(&y, &x) {
            return x;
        }
        x = y;
    }
}

impl BigDouble {
    pub fn sqrt(&self, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
        self.nth_root(2, cfg)
    }

    /// Real `n`-th root. Odd roots of negative values are negative; even
    /// roots of them are [`ArithmeticError::NegativeRoot`].
    ///
    /// ```
    /// use bigdouble::{BigDouble, NumericConfig};
    ///
    /// let cfg = NumericConfig::DEFAULT;
    /// let x: BigDouble = "-8/27".parse().unwrap();
    /// assert_eq!(x.nth_root(3, &cfg).unwrap().fraction_description(), "-2/3");
    /// ```
    pub fn nth_root(&self, n: u64, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
        match n {
            0 => return Err(ArithmeticError::ZeroRootDegree),
            1 => return Ok(self.clone()),
            _ => {}
        }
        if self.is_zero() {
            return Ok(BigDouble::zero());
        }
        if self.is_negative() {
            if n % 2 == 0 {
                return Err(ArithmeticError::NegativeRoot);
            }
            return Ok(self.abs().nth_root(n, cfg)?.neg_ref());
        }

        if let Some(exact) = self.exact_root(n) {
            return Ok(exact);
        }
        if self.fits_f64() && cfg.precision + cfg.guard_digits <= F64_DIGITS {
            return BigDouble::from_f64(self.to_f64().powf((n as f64).recip()));
        }

        // Newton runs on a value near one so the digit cap on its quotients
        // stays relative to the root.
        let (scaled, k) = self.split_power_of_two(n);
        let root = scaled.newton_root(n, scaled.root_guess(n)?, cfg)?;
        Ok(root.mul_ref(&pow2(k)))
    }

    /// `self^exponent` for a rational exponent `p/q`: the `q`-th root raised
    /// to `p`, inverted when the exponent is negative.
    ///
    /// ```
    /// use bigdouble::{BigDouble, NumericConfig};
    ///
    /// let cfg = NumericConfig::DEFAULT;
    /// let base = BigDouble::from(-27);
    /// let third: BigDouble = "1/3".parse().unwrap();
    /// assert_eq!(base.pow(&third, &cfg).unwrap(), BigDouble::from(-3));
    /// ```
    pub fn pow(&self, exponent: &BigDouble, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
        if self.is_zero() {
            return if exponent.is_negative() {
                Err(ArithmeticError::DivisionByZero)
            } else if exponent.is_zero() {
                Ok(BigDouble::one())
            } else {
                Ok(BigDouble::zero())
            };
        }
        if *self == BigDouble::one() {
            return Ok(BigDouble::one());
        }
        let p = limbs::to_u64(exponent.numerator_limbs()).ok_or(ArithmeticError::TooLarge)?;
        let q = limbs::to_u64(exponent.denominator_limbs()).ok_or(ArithmeticError::TooLarge)?;

        let base = if q == 1 {
            self.clone()
        } else {
            self.nth_root(q, cfg)?
        };
        let powered = base.pow_u64(p);
        if exponent.is_negative() {
            powered.reciprocal()
        } else {
            Ok(powered)
        }
    }

    fn fits_f64(&self) -> bool {
        limbs::bit_len(self.numerator_limbs()) <= F64_EXACT_BITS
            && limbs::bit_len(self.denominator_limbs()) <= F64_EXACT_BITS
    }

    /// Exact root of a positive value when both parts are perfect `n`-th
    /// powers.
    fn exact_root(&self, n: u64) -> Option<BigDouble> {
        let root_of = |part: &[u64]| {
            // Below 2^n the floor root is one.
            if limbs::bit_len(part) as u64 <= n {
                return limbs::is_one(part).then(limbs::one);
            }
            // 2^ceil(bits/n) is at or above the root.
            let above = limbs::shift_up(&limbs::one(), limbs::bit_len(part).div_ceil(n as usize));
            let floor = integer_root(part, n, above);
            limbs::equal_to(&limbs::pow(&floor, n), part).then_some(floor)
        };
        let num = root_of(self.numerator_limbs())?;
        let den = root_of(self.denominator_limbs())?;
        Some(BigDouble::from_reduced(false, num, den))
    }

    /// Splits a positive value into `scaled · 2^(n·k)` with `scaled` within
    /// a factor of `2^n` of one.
    fn split_power_of_two(&self, n: u64) -> (BigDouble, i64) {
        let k = ((log2(self.numerator_limbs()) - log2(self.denominator_limbs())) / n as f64).floor() as i64;
        let shift = k.unsigned_abs() as usize * n as usize;
        let (num, den) = (self.numerator_limbs(), self.denominator_limbs());
        let scaled = if k >= 0 {
            BigDouble::from_unreduced(false, num.to_vec(), limbs::shift_up(den, shift))
        } else {
            BigDouble::from_unreduced(false, limbs::shift_up(num, shift), den.to_vec())
        };
        (scaled, k)
    }

    /// `2^(log2(self) / n)` for a positive value, valid far outside the
    /// range of `f64`.
    fn root_guess(&self, n: u64) -> Result<BigDouble, ArithmeticError> {
        let exponent = (log2(self.numerator_limbs()) - log2(self.denominator_limbs())) / n as f64;
        let whole = exponent.floor();
        let mantissa = BigDouble::from_f64((exponent - whole).exp2())?;
        Ok(mantissa.mul_ref(&pow2(whole as i64)))
    }

    fn newton_root(
        &self,
        n: u64,
        guess: BigDouble,
        cfg: &NumericConfig,
    ) -> Result<BigDouble, ArithmeticError> {
        let epsilon = cfg.epsilon();
        let degree = BigDouble::from(n);
        let lower = BigDouble::from(n - 1);

        let mut x = guess;
        for _ in 0..cfg.max_iterations {
            let correction = self.div_with(&x.pow_u64(n - 1), cfg)?;
            let next = lower.mul_ref(&x).add_ref(&correction).div_with(&degree, cfg)?;
            let delta = next.sub_ref(&x).abs();
            let tolerance = epsilon.mul_ref(&next.abs());
            x = next;
            if delta <= tolerance {
                return Ok(x);
            }
        }
        warn!(
            degree = n,
            iterations = cfg.max_iterations,
            "root refinement stopped before converging"
        );
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> BigDouble {
        s.parse().unwrap()
    }

    #[test]
    fn test_exact_roots() {
        let cfg = NumericConfig::DEFAULT;
        assert_eq!(value("16").sqrt(&cfg).unwrap(), value("4"));
        assert_eq!(value("9/49").sqrt(&cfg).unwrap(), value("3/7"));
        assert_eq!(value("-27").nth_root(3, &cfg).unwrap(), value("-3"));
        assert_eq!(value("1024").nth_root(10, &cfg).unwrap(), value("2"));
    }

    #[test]
    fn test_inexact_root_is_close() {
        let cfg = NumericConfig::DEFAULT;
        let root = value("2").sqrt(&cfg).unwrap();
        assert!(root.pow_u64(2).nearly_equal(&value("2"), &cfg));
    }

    #[test]
    fn test_high_precision_uses_newton() {
        let cfg = NumericConfig::DEFAULT.with_precision(30);
        let root = value("2").sqrt(&cfg).unwrap();
        let digits = root.decimal_description(&cfg);
        assert_eq!(digits, "1.414213562373095048801688724210");
    }

    #[test]
    fn test_huge_values() {
        let cfg = NumericConfig::DEFAULT;
        let big = BigDouble::from(bignum::BigInt::from(10).pow(80));
        assert_eq!(big.sqrt(&cfg).unwrap(), BigDouble::from(bignum::BigInt::from(10).pow(40)));

        let odd = big.add_ref(&BigDouble::one());
        let root = odd.sqrt(&cfg).unwrap();
        assert!(root.pow_u64(2).nearly_equal(&odd, &cfg));
    }

    #[test]
    fn test_tiny_values() {
        let cfg = NumericConfig::DEFAULT;
        assert_eq!(value("1e-100").sqrt(&cfg).unwrap(), value("1e-50"));
        assert_eq!(value("1e-90").nth_root(3, &cfg).unwrap(), value("1e-30"));

        let v = value("2e-100");
        let root = v.sqrt(&cfg).unwrap();
        let ratio = root.pow_u64(2).div_with(&v, &cfg).unwrap();
        assert!(ratio.nearly_equal(&BigDouble::one(), &cfg));
        assert!((root.to_f64() / 1.4142135623730951e-50 - 1.0).abs() < 1e-12);

        let v = value("5e-200");
        let root = v.nth_root(3, &cfg).unwrap();
        let ratio = root.pow_u64(3).div_with(&v, &cfg).unwrap();
        assert!(ratio.nearly_equal(&BigDouble::one(), &cfg));
    }

    #[test]
    fn test_wide_rational_perfect_power() {
        let cfg = NumericConfig::DEFAULT;
        let big = bignum::BigInt::from(10).pow(30) + bignum::BigInt::from(7);
        let base = BigDouble::new(big, bignum::BigInt::from(3)).unwrap();
        assert_eq!(base.pow_u64(2).sqrt(&cfg).unwrap(), base);
        assert_eq!(base.pow_u64(5).nth_root(5, &cfg).unwrap(), base);

        let near = base.pow_u64(2).add_ref(&value("1/9"));
        let root = near.sqrt(&cfg).unwrap();
        assert!(root.pow_u64(2).nearly_equal(&near, &cfg));
    }

    #[test]
    fn test_high_degree_of_small_value() {
        let cfg = NumericConfig::DEFAULT.with_precision(20);
        assert_eq!(value("1").nth_root(1 << 40, &cfg).unwrap(), BigDouble::one());
        assert_eq!(value("1/1024").nth_root(10, &cfg).unwrap(), value("1/2"));
    }

    #[test]
    fn test_integer_root() {
        assert_eq!(integer_root(&[1_000_000], 3, vec![7]), vec![100]);
        assert_eq!(integer_root(&[1_000_001], 3, vec![200]), vec![100]);
        assert_eq!(integer_root(&[15], 2, vec![0]), vec![3]);
    }

    #[test]
    fn test_root_errors() {
        let cfg = NumericConfig::DEFAULT;
        assert_eq!(value("-4").sqrt(&cfg), Err(ArithmeticError::NegativeRoot));
        assert_eq!(value("4").nth_root(0, &cfg), Err(ArithmeticError::ZeroRootDegree));
        assert_eq!(BigDouble::zero().sqrt(&cfg).unwrap(), BigDouble::zero());
    }

    #[test]
    fn test_rational_powers() {
        let cfg = NumericConfig::DEFAULT;
        assert_eq!(value("-8").pow(&value("2/3"), &cfg).unwrap(), value("4"));
        assert_eq!(value("4").pow(&value("-3/2"), &cfg).unwrap(), value("1/8"));
        assert_eq!(value("2/3").pow(&value("3"), &cfg).unwrap(), value("8/27"));
        assert_eq!(value("5").pow(&BigDouble::zero(), &cfg).unwrap(), BigDouble::one());
        assert_eq!(
            BigDouble::zero().pow(&value("-1"), &cfg),
            Err(ArithmeticError::DivisionByZero)
        );
        assert_eq!(
            value("-4").pow(&value("1/2"), &cfg),
            Err(ArithmeticError::NegativeRoot)
        );
    }

    #[test]
    fn test_iteration_cap_still_returns_estimate() {
        let cfg = NumericConfig::DEFAULT.with_precision(30).with_max_iterations(1);
        let root = value("2").sqrt(&cfg).unwrap();
        assert!((root.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-6);
    }
}
