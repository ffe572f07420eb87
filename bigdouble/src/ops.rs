//! `std::ops` impls for [`BigDouble`].
//!
//! `/` divides with [`NumericConfig::DEFAULT`] and panics on a zero divisor;
//! use [`BigDouble::div_with`] to pick the digit budget or handle the error.

use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{BigDouble, NumericConfig};

impl BigDouble {
    fn div_ref(&self, rhs: &BigDouble) -> BigDouble {
        match self.div_with(rhs, &NumericConfig::DEFAULT) {
            Ok(quotient) => quotient,
            Err(_) => panic!("attempt to divide by zero"),
        }
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $inner:ident) => {
        impl $imp<&BigDouble> for &BigDouble {
            type Output = BigDouble;
            fn $method(self, rhs: &BigDouble) -> BigDouble {
                self.$inner(rhs)
            }
        }

        impl $imp<BigDouble> for &BigDouble {
            type Output = BigDouble;
            fn $method(self, rhs: BigDouble) -> BigDouble {
                self.$inner(&rhs)
            }
        }

        impl $imp<&BigDouble> for BigDouble {
            type Output = BigDouble;
            fn $method(self, rhs: &BigDouble) -> BigDouble {
                self.$inner(rhs)
            }
        }

        impl $imp<BigDouble> for BigDouble {
            type Output = BigDouble;
            fn $method(self, rhs: BigDouble) -> BigDouble {
                self.$inner(&rhs)
            }
        }
    };
}

macro_rules! forward_assign {
    ($imp:ident, $method:ident, $inner:ident) => {
        impl $imp<&BigDouble> for BigDouble {
            fn $method(&mut self, rhs: &BigDouble) {
                *self = self.$inner(rhs);
            }
        }

        impl $imp<BigDouble> for BigDouble {
            fn $method(&mut self, rhs: BigDouble) {
                *self = self.$inner(&rhs);
            }
        }
    };
}

forward_binop!(Add, add, add_ref);
forward_binop!(Sub, sub, sub_ref);
forward_binop!(Mul, mul, mul_ref);
forward_binop!(Div, div, div_ref);

forward_assign!(AddAssign, add_assign, add_ref);
forward_assign!(SubAssign, sub_assign, sub_ref);
forward_assign!(MulAssign, mul_assign, mul_ref);
forward_assign!(DivAssign, div_assign, div_ref);

impl Neg for BigDouble {
    type Output = BigDouble;
    fn neg(self) -> BigDouble {
        self.neg_ref()
    }
}

impl Neg for &BigDouble {
    type Output = BigDouble;
    fn neg(self) -> BigDouble {
        self.neg_ref()
    }
}

impl Sum for BigDouble {
    fn sum<I: Iterator<Item = BigDouble>>(iter: I) -> BigDouble {
        iter.fold(BigDouble::zero(), |acc, x| acc.add_ref(&x))
    }
}

impl<'a> Sum<&'a BigDouble> for BigDouble {
    fn sum<I: Iterator<Item = &'a BigDouble>>(iter: I) -> BigDouble {
        iter.fold(BigDouble::zero(), |acc, x| acc.add_ref(x))
    }
}

impl Product for BigDouble {
    fn product<I: Iterator<Item = BigDouble>>(iter: I) -> BigDouble {
        iter.fold(BigDouble::one(), |acc, x| acc.mul_ref(&x))
    }
}

impl<'a> Product<&'a BigDouble> for BigDouble {
    fn product<I: Iterator<Item = &'a BigDouble>>(iter: I) -> BigDouble {
        iter.fold(BigDouble::one(), |acc, x| acc.mul_ref(x))
    }
}
