use thiserror::Error;

/// Errors from turning text into a number.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("cannot parse a number from an empty string")]
    Empty,
    #[error("invalid digit `{digit}` for radix {radix}")]
    InvalidDigit { digit: char, radix: u32 },
    #[error("radix {0} is outside the supported range 2..=62")]
    RadixOutOfRange(u32),
    #[error("malformed exponent in `{0}`")]
    InvalidExponent(String),
    #[error("decimal exponent {0} is too large to expand")]
    ExponentOutOfRange(i64),
    #[error("fraction has a zero denominator")]
    ZeroDenominator,
}

/// Arithmetic preconditions that a checked operation refused to violate.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("negative exponent")]
    NegativeExponent,
    #[error("factorial of a negative number")]
    NegativeFactorial,
    #[error("even root of a negative number")]
    NegativeRoot,
    #[error("root of degree zero")]
    ZeroRootDegree,
    #[error("value is not finite")]
    NotFinite,
    #[error("empty limb sequence")]
    EmptyLimbs,
    #[error("operand too large for this operation")]
    TooLarge,
}
