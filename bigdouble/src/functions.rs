//! Free-function forms of the [`BigDouble`] methods, for call sites that read
//! like formulas.

use bignum::{ArithmeticError, BigInt};

use crate::{BigDouble, NumericConfig};

pub fn abs(x: &BigDouble) -> BigDouble {
    x.abs()
}

pub fn signum(x: &BigDouble) -> BigDouble {
    x.signum()
}

pub fn round(x: &BigDouble) -> BigInt {
    x.rounded()
}

pub fn floor(x: &BigDouble) -> BigInt {
    x.floor()
}

pub fn ceil(x: &BigDouble) -> BigInt {
    x.ceil()
}

pub fn trunc(x: &BigDouble) -> BigInt {
    x.trunc()
}

pub fn sqrt(x: &BigDouble, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
    x.sqrt(cfg)
}

pub fn nth_root(x: &BigDouble, n: u64, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
    x.nth_root(n, cfg)
}

pub fn pow(
    base: &BigDouble,
    exponent: &BigDouble,
    cfg: &NumericConfig,
) -> Result<BigDouble, ArithmeticError> {
    base.pow(exponent, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> BigDouble {
        s.parse().unwrap()
    }

    #[test]
    fn test_forwarding() {
        let cfg = NumericConfig::DEFAULT;
        let x = value("-9/4");
        assert_eq!(abs(&x), value("9/4"));
        assert_eq!(signum(&x), BigDouble::from(-1));
        assert_eq!(round(&x), BigInt::from(-2));
        assert_eq!(floor(&x), BigInt::from(-3));
        assert_eq!(ceil(&x), BigInt::from(-2));
        assert_eq!(trunc(&x), BigInt::from(-2));
        assert_eq!(sqrt(&abs(&x), &cfg).unwrap(), value("3/2"));
        assert_eq!(nth_root(&BigDouble::from(-125), 3, &cfg).unwrap(), BigDouble::from(-5));
        assert_eq!(pow(&BigDouble::from(9), &value("1/2"), &cfg).unwrap(), BigDouble::from(3));
    }
}
