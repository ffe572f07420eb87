//! Trigonometric helpers that honour [`NumericConfig::angle_unit`].
//!
//! These go through `f64`, so results carry double precision. Arguments are
//! read in the configured unit and inverse functions answer in it.

use bignum::ArithmeticError;

use crate::{AngleUnit, BigDouble, NumericConfig};

fn to_radians(x: &BigDouble, cfg: &NumericConfig) -> f64 {
    match cfg.angle_unit {
        AngleUnit::Radians => x.to_f64(),
        AngleUnit::Degrees => x.to_f64().to_radians(),
    }
}

fn from_radians(radians: f64, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
    let angle = match cfg.angle_unit {
        AngleUnit::Radians => radians,
        AngleUnit::Degrees => radians.to_degrees(),
    };
    BigDouble::from_f64(angle)
}

pub fn sin(x: &BigDouble, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
    BigDouble::from_f64(to_radians(x, cfg).sin())
}

pub fn cos(x: &BigDouble, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
    BigDouble::from_f64(to_radians(x, cfg).cos())
}

pub fn tan(x: &BigDouble, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
    BigDouble::from_f64(to_radians(x, cfg).tan())
}

/// Arguments outside `[-1, 1]` give [`ArithmeticError::NotFinite`].
pub fn asin(x: &BigDouble, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
    from_radians(x.to_f64().asin(), cfg)
}

/// Arguments outside `[-1, 1]` give [`ArithmeticError::NotFinite`].
pub fn acos(x: &BigDouble, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
    from_radians(x.to_f64().acos(), cfg)
}

pub fn atan(x: &BigDouble, cfg: &NumericConfig) -> Result<BigDouble, ArithmeticError> {
    from_radians(x.to_f64().atan(), cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degrees() -> NumericConfig {
        NumericConfig::DEFAULT.with_angle_unit(AngleUnit::Degrees)
    }

    #[test]
    fn test_degrees() {
        let cfg = degrees();
        let half: BigDouble = "1/2".parse().unwrap();
        assert!(sin(&BigDouble::from(30), &cfg).unwrap().nearly_equal(&half, &cfg));
        assert!(cos(&BigDouble::from(60), &cfg).unwrap().nearly_equal(&half, &cfg));
        assert!(tan(&BigDouble::from(45), &cfg).unwrap().nearly_equal(&BigDouble::one(), &cfg));
        assert!(asin(&half, &cfg).unwrap().nearly_equal(&BigDouble::from(30), &cfg));
        assert!(atan(&BigDouble::one(), &cfg).unwrap().nearly_equal(&BigDouble::from(45), &cfg));
    }

    #[test]
    fn test_radians() {
        let cfg = NumericConfig::DEFAULT;
        assert_eq!(sin(&BigDouble::zero(), &cfg).unwrap(), BigDouble::zero());
        assert_eq!(cos(&BigDouble::zero(), &cfg).unwrap(), BigDouble::one());
        let pi = BigDouble::from_f64(std::f64::consts::PI).unwrap();
        assert!(acos(&BigDouble::from(-1), &cfg).unwrap().nearly_equal(&pi, &cfg));
    }

    #[test]
    fn test_out_of_domain() {
        let cfg = NumericConfig::DEFAULT;
        assert_eq!(asin(&BigDouble::from(2), &cfg), Err(ArithmeticError::NotFinite));
        assert_eq!(acos(&BigDouble::from(-3), &cfg), Err(ArithmeticError::NotFinite));
    }
}
