use common::float_ext::FloatExt;

use super::*;
use crate::float::WorkingFloat;

const PRECISION: usize = 256;

fn exact(value: f64) -> ExactNumber {
    ExactNumber::from_f64(value, PRECISION).unwrap()
}

#[test]
fn non_finite_values_are_rejected() {
    assert_eq!(
        ExactNumber::from_f64(f64::INFINITY, PRECISION),
        Err(ExactError::NonFinite(f64::INFINITY))
    );
    assert_eq!(
        ExactNumber::from_f32(f32::NEG_INFINITY, PRECISION),
        Err(ExactError::NonFinite(f64::NEG_INFINITY))
    );
    assert!(matches!(
        ExactNumber::from_f64(f64::NAN, PRECISION),
        Err(ExactError::NonFinite(v)) if v.is_nan()
    ));
    assert!(ExactNumber::from_f32(f32::NAN, PRECISION).is_err());
    assert!(f64::INFINITY.to_exact(PRECISION).is_err());
}

#[test]
fn zero_precision_is_rejected() {
    assert_eq!(ExactNumber::zero(0), Err(ExactError::ZeroPrecision));
}

#[test]
fn precision_is_carried_by_the_value() {
    let value = exact(1.5);
    assert_eq!(value.precision(), PRECISION);
    let wide = ExactNumber::from_f64(1.5, 2 * PRECISION).unwrap();
    assert_eq!((&value + &wide).precision(), 2 * PRECISION);
}

#[test]
fn products_of_doubles_are_not_rounded() {
    let a = 1.0 + f64::EPSILON;
    let product = &exact(a) * &exact(a);
    let rounded = exact(a * a);
    let residual = &product - &rounded;
    assert_eq!(residual, exact(f64::EPSILON * f64::EPSILON));
}

#[test]
fn cancellation_is_exact() {
    let big = exact(2.0_f64.powi(80));
    let one = exact(1.0);
    let sum = &(&big + &one) - &big;
    assert_eq!(sum, one);
}

#[test]
fn ordering_and_sign() {
    assert!(exact(-2.0) < exact(1.0));
    assert!(exact(-2.0).is_negative());
    assert_eq!(exact(-2.0).abs(), exact(2.0));
    assert_eq!(-exact(3.0), exact(-3.0));
    assert!(ExactNumber::zero(PRECISION).unwrap().is_zero());
    assert!(!exact(1e-300).is_zero());
}

#[test]
fn division_and_roots() {
    assert_eq!(&exact(1.0) / &exact(4.0), exact(0.25));
    assert_eq!(exact(2.25).sqrt(), exact(1.5));
    assert!(exact(1.0).ln().to_f64().abs() < 1e-60);
    let ln_e = exact(std::f64::consts::E).ln().to_f64();
    assert!(ln_e.approximately_eq(1.0), "ln(e) = {ln_e}");
}

#[test]
fn counts_convert_exactly() {
    let six = ExactNumber::from_count(6, PRECISION).unwrap();
    assert_eq!(six, exact(6.0));
}

#[test]
fn add_assign_accumulates() {
    let mut sum = ExactNumber::zero(PRECISION).unwrap();
    for value in [0.1, 0.2, 0.3] {
        sum += &exact(value);
    }
    let expected = &(&exact(0.1) + &exact(0.2)) + &exact(0.3);
    assert_eq!(sum, expected);
}

#[test]
fn decimal_rendering() {
    let text = exact(0.5).to_decimal_string(6);
    assert!(text.contains('5'), "unexpected rendering {text}");
    assert_eq!(format!("{}", exact(2.0)), exact(2.0).to_decimal_string(DISPLAY_DIGITS));
}

#[test]
fn longer_renderings_keep_more_digits() {
    let third = &exact(1.0) / &exact(3.0);
    let count_threes = |text: &str| text.chars().filter(|&c| c == '3').count();
    assert!(count_threes(&third.to_string()) <= DISPLAY_DIGITS);
    assert!(count_threes(&third.to_decimal_string(60)) >= 58);
}
