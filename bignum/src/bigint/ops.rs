//! `std::ops` impls for [`BigInt`].
//!
//! Every binary operator is implemented for all four owned/borrowed operand
//! combinations and forwards to one by-reference routine. `/` and `%` panic
//! on a zero divisor like the primitive integers do; see
//! [`BigInt::div_rem`] for the checked form.

use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, BitAnd, BitOr, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Not, Rem,
    RemAssign, Shl, Shr, Sub, SubAssign,
};

use super::BigInt;
use crate::limbs;

impl BigInt {
    /// Same sign adds magnitudes; otherwise the larger magnitude wins the sign.
    fn add_signed(&self, rhs_negative: bool, rhs: &[u64]) -> BigInt {
        if self.negative == rhs_negative {
            return BigInt::from_parts(self.negative, limbs::add(&self.magnitude, rhs));
        }
        let negative = if limbs::less_than(&self.magnitude, rhs) {
            rhs_negative
        } else {
            self.negative
        };
        BigInt::from_parts(negative, limbs::difference(&self.magnitude, rhs))
    }

    fn add_ref(&self, rhs: &BigInt) -> BigInt {
        self.add_signed(rhs.negative, &rhs.magnitude)
    }

    fn sub_ref(&self, rhs: &BigInt) -> BigInt {
        self.add_signed(!rhs.negative, &rhs.magnitude)
    }

    fn mul_ref(&self, rhs: &BigInt) -> BigInt {
        BigInt::from_parts(
            self.negative != rhs.negative,
            limbs::multiply(&self.magnitude, &rhs.magnitude),
        )
    }

    fn div_ref(&self, rhs: &BigInt) -> BigInt {
        assert!(!rhs.is_zero(), "attempt to divide by zero");
        let (q, _) = limbs::div_mod(&self.magnitude, &rhs.magnitude);
        BigInt::from_parts(self.negative != rhs.negative, q)
    }

    fn rem_ref(&self, rhs: &BigInt) -> BigInt {
        assert!(
            !rhs.is_zero(),
            "attempt to calculate the remainder with a divisor of zero"
        );
        let (_, r) = limbs::div_mod(&self.magnitude, &rhs.magnitude);
        BigInt::from_parts(self.negative, r)
    }

    // Bitwise operators work on the magnitudes directly; the sign is combined
    // with the same operator instead of using two's complement.

    fn and_ref(&self, rhs: &BigInt) -> BigInt {
        BigInt::from_parts(
            self.negative && rhs.negative,
            limbs::zip_with(&self.magnitude, &rhs.magnitude, |a, b| a & b),
        )
    }

    fn or_ref(&self, rhs: &BigInt) -> BigInt {
        BigInt::from_parts(
            self.negative || rhs.negative,
            limbs::zip_with(&self.magnitude, &rhs.magnitude, |a, b| a | b),
        )
    }

    fn xor_ref(&self, rhs: &BigInt) -> BigInt {
        BigInt::from_parts(
            self.negative != rhs.negative,
            limbs::zip_with(&self.magnitude, &rhs.magnitude, |a, b| a ^ b),
        )
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $inner:ident) => {
        impl $imp<&BigInt> for &BigInt {
            type Output = BigInt;
            fn $method(self, rhs: &BigInt) -> BigInt {
                self.$inner(rhs)
            }
        }

        impl $imp<BigInt> for BigInt {
            type Output = BigInt;
            fn $method(self, rhs: BigInt) -> BigInt {
                (&self).$inner(&rhs)
            }
        }

        impl $imp<&BigInt> for BigInt {
            type Output = BigInt;
            fn $method(self, rhs: &BigInt) -> BigInt {
                (&self).$inner(rhs)
            }
        }

        impl $imp<BigInt> for &BigInt {
            type Output = BigInt;
            fn $method(self, rhs: BigInt) -> BigInt {
                self.$inner(&rhs)
            }
        }
    };
}

macro_rules! forward_assign {
    ($imp:ident, $method:ident, $inner:ident) => {
        impl $imp<&BigInt> for BigInt {
            fn $method(&mut self, rhs: &BigInt) {
                *self = (&*self).$inner(rhs);
            }
        }

        impl $imp<BigInt> for BigInt {
            fn $method(&mut self, rhs: BigInt) {
                *self = (&*self).$inner(&rhs);
            }
        }
    };
}

forward_binop!(Add, add, add_ref);
forward_binop!(Sub, sub, sub_ref);
forward_binop!(Mul, mul, mul_ref);
forward_binop!(Div, div, div_ref);
forward_binop!(Rem, rem, rem_ref);
forward_binop!(BitAnd, bitand, and_ref);
forward_binop!(BitOr, bitor, or_ref);
forward_binop!(BitXor, bitxor, xor_ref);

forward_assign!(AddAssign, add_assign, add_ref);
forward_assign!(SubAssign, sub_assign, sub_ref);
forward_assign!(MulAssign, mul_assign, mul_ref);
forward_assign!(DivAssign, div_assign, div_ref);
forward_assign!(RemAssign, rem_assign, rem_ref);

impl Neg for BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        BigInt::from_parts(!self.negative, self.magnitude)
    }
}

impl Neg for &BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        BigInt::from_parts(!self.negative, self.magnitude.clone())
    }
}

/// Flips every bit of every magnitude limb and the sign.
impl Not for &BigInt {
    type Output = BigInt;
    fn not(self) -> BigInt {
        BigInt::from_parts(!self.negative, limbs::bit_not(&self.magnitude))
    }
}

impl Not for BigInt {
    type Output = BigInt;
    fn not(self) -> BigInt {
        !&self
    }
}

/// Magnitude shift; the sign is kept.
impl Shl<usize> for &BigInt {
    type Output = BigInt;
    fn shl(self, n: usize) -> BigInt {
        BigInt::from_parts(self.negative, limbs::shift_up(&self.magnitude, n))
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;
    fn shl(self, n: usize) -> BigInt {
        &self << n
    }
}

/// Magnitude shift, so negative values truncate toward zero.
impl Shr<usize> for &BigInt {
    type Output = BigInt;
    fn shr(self, n: usize) -> BigInt {
        BigInt::from_parts(self.negative, limbs::shift_down(&self.magnitude, n))
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;
    fn shr(self, n: usize) -> BigInt {
        &self >> n
    }
}

impl Sum for BigInt {
    fn sum<I: Iterator<Item = BigInt>>(iter: I) -> BigInt {
        iter.fold(BigInt::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a BigInt> for BigInt {
    fn sum<I: Iterator<Item = &'a BigInt>>(iter: I) -> BigInt {
        iter.fold(BigInt::zero(), |acc, x| acc + x)
    }
}

impl Product for BigInt {
    fn product<I: Iterator<Item = BigInt>>(iter: I) -> BigInt {
        iter.fold(BigInt::one(), |acc, x| acc * x)
    }
}

impl<'a> Product<&'a BigInt> for BigInt {
    fn product<I: Iterator<Item = &'a BigInt>>(iter: I) -> BigInt {
        iter.fold(BigInt::one(), |acc, x| acc * x)
    }
}
