//! Integer rounding of [`BigDouble`] values.

use bignum::{limbs, BigInt};

use crate::BigDouble;

impl BigDouble {
    /// `(|numerator| / denominator, remainder)`.
    fn split_magnitude(&self) -> (Vec<u64>, Vec<u64>) {
        limbs::div_mod(self.numerator_limbs(), self.denominator_limbs())
    }

    /// Toward zero.
    pub fn trunc(&self) -> BigInt {
        let (q, _) = self.split_magnitude();
        BigInt::from_parts(self.is_negative(), q)
    }

    /// What `trunc` drops; carries the sign of `self`.
    pub fn fract(&self) -> BigDouble {
        self.sub_ref(&BigDouble::from(self.trunc()))
    }

    /// Toward negative infinity.
    pub fn floor(&self) -> BigInt {
        let (q, r) = self.split_magnitude();
        if self.is_negative() && !limbs::is_zero(&r) {
            BigInt::from_parts(true, limbs::add(&q, &[1]))
        } else {
            BigInt::from_parts(self.is_negative(), q)
        }
    }

    /// Toward positive infinity.
    pub fn ceil(&self) -> BigInt {
        let (q, r) = self.split_magnitude();
        if !self.is_negative() && !limbs::is_zero(&r) {
            BigInt::from_parts(false, limbs::add(&q, &[1]))
        } else {
            BigInt::from_parts(self.is_negative(), q)
        }
    }

    /// Nearest integer, halves away from zero.
    ///
    /// ```
    /// use bigdouble::BigDouble;
    /// use bignum::BigInt;
    ///
    /// let x: BigDouble = "-2.5".parse().unwrap();
    /// assert_eq!(x.rounded(), BigInt::from(-3));
    /// ```
    pub fn rounded(&self) -> BigInt {
        let (q, r) = self.split_magnitude();
        let round_up = !limbs::less_than(&limbs::shift_up(&r, 1), self.denominator_limbs());
        let q = if round_up { limbs::add(&q, &[1]) } else { q };
        BigInt::from_parts(self.is_negative(), q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> BigDouble {
        s.parse().unwrap()
    }

    #[test]
    fn test_positive() {
        let x = value("7/2");
        assert_eq!(x.trunc(), BigInt::from(3));
        assert_eq!(x.floor(), BigInt::from(3));
        assert_eq!(x.ceil(), BigInt::from(4));
        assert_eq!(x.rounded(), BigInt::from(4));
        assert_eq!(x.fract(), value("1/2"));
    }

    #[test]
    fn test_negative() {
        let x = value("-7/3");
        assert_eq!(x.trunc(), BigInt::from(-2));
        assert_eq!(x.floor(), BigInt::from(-3));
        assert_eq!(x.ceil(), BigInt::from(-2));
        assert_eq!(x.rounded(), BigInt::from(-2));
        assert_eq!(x.fract(), value("-1/3"));
    }

    #[test]
    fn test_integers_are_fixed_points() {
        for s in ["0", "5", "-5"] {
            let x = value(s);
            let n: BigInt = s.parse().unwrap();
            assert_eq!(x.floor(), n);
            assert_eq!(x.ceil(), n);
            assert_eq!(x.rounded(), n);
            assert!(x.fract().is_zero());
        }
    }

    #[test]
    fn test_round_half_cases() {
        assert_eq!(value("0.5").rounded(), BigInt::from(1));
        assert_eq!(value("0.49999").rounded(), BigInt::from(0));
        assert_eq!(value("-0.5").rounded(), BigInt::from(-1));
        assert_eq!(value("-0.2").rounded(), BigInt::zero());
        assert_eq!(value("-0.2").ceil(), BigInt::zero());
    }
}
