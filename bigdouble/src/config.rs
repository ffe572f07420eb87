//! Numeric configuration context.
//!
//! Presentation precision, the division digit budget, the root-finding
//! tolerance and the trig angle unit all live in one [`NumericConfig`] that
//! callers pass by reference. Nothing here is global.

use bignum::limbs;
use serde::{Deserialize, Serialize};

use crate::BigDouble;

/// Unit that trig helpers read and produce angles in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

/// Settings for rendering, division and iterative algorithms.
///
/// Missing fields fall back to [`NumericConfig::DEFAULT`] when deserialized:
///
/// ```
/// use bigdouble::{AngleUnit, NumericConfig};
///
/// let cfg: NumericConfig = serde_json::from_str(r#"{"angle_unit":"degrees"}"#).unwrap();
/// assert_eq!(cfg.angle_unit, AngleUnit::Degrees);
/// assert_eq!(cfg.precision, NumericConfig::DEFAULT.precision);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericConfig {
    /// Digits after the decimal point in decimal and scientific output.
    pub precision: usize,
    /// Decimal digits a quotient's denominator keeps before guard digits.
    pub working_precision: usize,
    /// Extra digits added to both the display tolerance and the digit cap.
    pub guard_digits: usize,
    pub angle_unit: AngleUnit,
    /// Upper bound on Newton iterations.
    pub max_iterations: usize,
}

impl NumericConfig {
    pub const DEFAULT: NumericConfig = NumericConfig {
        precision: 4,
        working_precision: 40,
        guard_digits: 5,
        angle_unit: AngleUnit::Radians,
        max_iterations: 256,
    };

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_working_precision(mut self, working_precision: usize) -> Self {
        self.working_precision = working_precision;
        self
    }

    pub fn with_angle_unit(mut self, angle_unit: AngleUnit) -> Self {
        self.angle_unit = angle_unit;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Largest number of decimal digits a quotient's denominator may have.
    /// Never less than one.
    pub fn denominator_digit_cap(&self) -> usize {
        (self.working_precision + self.guard_digits).max(1)
    }

    /// Tolerance `10^-(precision + guard_digits)` used by roots and
    /// [`BigDouble::nearly_equal`].
    pub fn epsilon(&self) -> BigDouble {
        let digits = (self.precision + self.guard_digits) as u64;
        BigDouble::from_reduced(false, limbs::one(), limbs::pow10(digits))
    }
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
