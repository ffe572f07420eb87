//! Integration tests for `BigDouble`: fixed examples plus property checks of
//! the field identities, ordering and the lowest-terms invariant.

use bigdouble::{ArithmeticError, BigDouble, BigInt, NumericConfig};
use bignum::{limbs, number_theory::binary_gcd};
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn value(s: &str) -> BigDouble {
    s.parse().unwrap()
}

fn is_lowest_terms(x: &BigDouble) -> bool {
    let (num, den) = (x.numerator_limbs(), x.denominator_limbs());
    let gcd_ok = limbs::is_zero(num) || limbs::is_one(&binary_gcd(num, den));
    let zero_ok = !limbs::is_zero(num) || (!x.is_negative() && limbs::is_one(den));
    gcd_ok && zero_ok && !limbs::is_zero(den) && limbs::is_canonical(num) && limbs::is_canonical(den)
}

/// Strategy: a rational with numerator and denominator up to 2^96.
fn rational() -> impl Strategy<Value = BigDouble> {
    (any::<i64>(), any::<u32>(), 1u64..=u64::MAX, any::<u32>()).prop_map(|(n, n_hi, d, d_hi)| {
        let num = BigInt::from(n) * BigInt::from(n_hi as u64 + 1);
        let den = BigInt::from(d) * BigInt::from(d_hi as u64 + 1);
        BigDouble::new(num, den).unwrap()
    })
}

/// Strategy: `n / 10^k`, often far below one.
fn small_rational() -> impl Strategy<Value = BigDouble> {
    (1u64..=u64::MAX, 0u64..=200).prop_map(|(n, k)| {
        BigDouble::new(BigInt::from(n), BigInt::from(10).pow(k)).unwrap()
    })
}

fn nonzero_rational() -> impl Strategy<Value = BigDouble> {
    rational().prop_filter("non-zero", |x| !x.is_zero())
}

// ============================================================================
// Fixed examples
// ============================================================================

#[test]
fn test_decimal_and_scientific_parsing() {
    assert_eq!(value("1.2e10").fraction_description(), "12000000000");
    assert_eq!(value("1.2").fraction_description(), "6/5");
    assert_eq!(value("-3.75e-2").fraction_description(), "-3/80");
}

#[test]
fn test_cube_root_of_negative() {
    let cfg = NumericConfig::DEFAULT;
    let root = BigDouble::from(-27).pow(&value("1/3"), &cfg).unwrap();
    assert!(root.nearly_equal(&BigDouble::from(-3), &cfg));
}

#[test]
fn test_zero_denominator_is_rejected() {
    assert_eq!(
        BigDouble::new(BigInt::from(1), BigInt::zero()),
        Err(ArithmeticError::DivisionByZero)
    );
    assert_eq!(
        BigDouble::one().checked_div(&BigDouble::zero()),
        Err(ArithmeticError::DivisionByZero)
    );
    assert!("5/0".parse::<BigDouble>().is_err());
}

#[test]
#[should_panic(expected = "divide by zero")]
fn test_division_operator_panics_on_zero() {
    let _ = value("1/2") / BigDouble::zero();
}

#[test]
fn test_harmonic_sum_is_exact() {
    let total: BigDouble = (1..=20).map(|k| BigDouble::one() / BigDouble::from(k)).sum();
    assert_eq!(total.fraction_description(), "55835135/15519504");
    assert_eq!(total.decimal_description(&NumericConfig::DEFAULT), "3.5977");
}

#[test]
fn test_repeated_division_stays_bounded() {
    let cfg = NumericConfig::DEFAULT;
    let cap = limbs::pow10(cfg.denominator_digit_cap() as u64);
    let mut x = BigDouble::from(BigInt::from(10).pow(60));
    for k in 2..200u32 {
        x = x.div_with(&BigDouble::from(k), &cfg).unwrap();
        assert!(limbs::less_than(x.denominator_limbs(), &cap));
        assert!(is_lowest_terms(&x));
    }
}

#[test]
fn test_rendering() {
    let cfg = NumericConfig::DEFAULT.with_precision(6);
    let x = value("-1234.5678");
    assert_eq!(x.decimal_description(&cfg), "-1234.567800");
    assert_eq!(x.scientific_description(&cfg), "-1.234568×10³");
    assert_eq!(x.to_string(), "-1234.5678");
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_results_are_lowest_terms(a in rational(), b in rational()) {
        prop_assert!(is_lowest_terms(&a));
        prop_assert!(is_lowest_terms(&(&a + &b)));
        prop_assert!(is_lowest_terms(&(&a - &b)));
        prop_assert!(is_lowest_terms(&(&a * &b)));
    }

    #[test]
    fn prop_additive_inverse(a in rational()) {
        prop_assert_eq!(&a + &(-&a), BigDouble::zero());
        prop_assert_eq!(&a - &a, BigDouble::zero());
    }

    #[test]
    fn prop_addition_commutes_and_associates(a in rational(), b in rational(), c in rational()) {
        prop_assert_eq!(&a + &b, &b + &a);
        prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
    }

    #[test]
    fn prop_division_undoes_multiplication(a in rational(), b in nonzero_rational()) {
        let cfg = NumericConfig::DEFAULT;
        let back = &(&a / &b) * &b;
        prop_assert!(back.nearly_equal(&a, &cfg));
    }

    #[test]
    fn prop_comparison_is_total(a in rational(), b in rational()) {
        let outcomes = [a < b, a == b, a > b];
        prop_assert_eq!(outcomes.iter().filter(|&&o| o).count(), 1);
        prop_assert_eq!(a < b, (&b - &a).is_positive());
    }

    #[test]
    fn prop_comparison_matches_cross_products(a in -1_000_000i64..1_000_000, b in 1i64..1000, c in -1_000_000i64..1_000_000, d in 1i64..1000) {
        let x = BigDouble::new(BigInt::from(a), BigInt::from(b)).unwrap();
        let y = BigDouble::new(BigInt::from(c), BigInt::from(d)).unwrap();
        // a/b < c/d exactly iff a*d < c*b
        prop_assert_eq!(x.cmp(&y), (a * d).cmp(&(c * b)));
    }

    #[test]
    fn prop_floor_ceil_bracket(a in rational()) {
        let floor = BigDouble::from(a.floor());
        let ceil = BigDouble::from(a.ceil());
        prop_assert!(floor <= a && a <= ceil);
        prop_assert!(&ceil - &floor <= BigDouble::one());
        let rounded = BigDouble::from(a.rounded());
        prop_assert!((&rounded - &a).abs() <= value("1/2"));
    }

    #[test]
    fn prop_fraction_description_roundtrips(a in rational()) {
        prop_assert_eq!(value(&a.fraction_description()), a);
    }

    #[test]
    fn prop_square_root_squares_back(a in prop_oneof![nonzero_rational(), small_rational()]) {
        let cfg = NumericConfig::DEFAULT;
        let root = a.abs().sqrt(&cfg).unwrap();
        prop_assert!(root.pow_int(2).unwrap().nearly_equal(&a.abs(), &cfg));
    }

    #[test]
    fn prop_roots_of_small_values_are_relative(a in small_rational(), n in 2u64..=5) {
        let cfg = NumericConfig::DEFAULT;
        let root = a.nth_root(n, &cfg).unwrap();
        prop_assert!(root.is_positive());
        let ratio = root.pow_int(n as i64).unwrap().div_with(&a, &cfg).unwrap();
        prop_assert!(ratio.nearly_equal(&BigDouble::one(), &cfg));
    }

    #[test]
    fn prop_from_f64_is_exact(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        prop_assert_eq!(BigDouble::from_f64(x).unwrap().to_f64(), x);
    }
}
