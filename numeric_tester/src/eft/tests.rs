use proptest::prelude::*;

use super::*;
use crate::exact::ExactNumber;

const PRECISION: usize = f64::EXACT_PRECISION;

fn exact<F: WorkingFloat>(value: F) -> ExactNumber {
    value.to_exact(PRECISION).unwrap()
}

/// Normal doubles with |exponent| <= 300: products and their residuals stay
/// far from overflow and from the subnormal range.
fn moderate_f64() -> impl Strategy<Value = f64> {
    (
        any::<bool>(),
        0..=f64::MAX_MANTISSA,
        (f64::EXPONENT_BIAS - 300)..=(f64::EXPONENT_BIAS + 300),
    )
        .prop_map(|(sign, mantissa, exponent)| f64::from_fields(sign, exponent, mantissa))
}

fn moderate_f32() -> impl Strategy<Value = f32> {
    (
        any::<bool>(),
        0..=f32::MAX_MANTISSA,
        (f32::EXPONENT_BIAS - 30)..=(f32::EXPONENT_BIAS + 30),
    )
        .prop_map(|(sign, mantissa, exponent)| f32::from_fields(sign, exponent, mantissa))
}

#[test]
fn two_sum_recovers_lost_addend() {
    let big = 2.0_f64.powi(53);
    let (s, e) = two_sum(big, 1.0);
    assert_eq!(s, big);
    assert_eq!(e, 1.0);

    let (s, e) = two_sum(1.0, big);
    assert_eq!(s, big);
    assert_eq!(e, 1.0);
}

#[test]
fn two_prod_of_power_of_two_has_no_residual() {
    assert_eq!(two_prod(0.75_f64, 8.0), (6.0, 0.0));
}

#[test]
fn two_prod_residual_of_square() {
    let a = 1.0_f32 + f32::EPSILON;
    let (p, e) = two_prod(a, a);
    assert_eq!(p, 1.0 + 2.0 * f32::EPSILON);
    assert_eq!(e, f32::EPSILON * f32::EPSILON);
}

#[test]
fn three_fma_catches_both_roundings() {
    let a = 1.0_f64 + f64::EPSILON;
    let c = -1.0e-30_f64;
    let (s, e1, e2) = three_fma(a, a, c);
    assert_eq!(s, a.fma(a, c));
    let total = &(&exact(s) + &exact(e1)) + &exact(e2);
    assert_eq!(total, &(&exact(a) * &exact(a)) + &exact(c));
}

#[test]
fn three_fma_with_total_cancellation() {
    let (s, e1, e2) = three_fma(-(2.0_f64.powi(60)), 1.0, 2.0_f64.powi(60));
    assert_eq!((s, e1, e2), (0.0, 0.0, 0.0));
}

proptest! {
    #[test]
    fn two_prod_is_exact_f64(a in moderate_f64(), b in moderate_f64()) {
        let (p, e) = two_prod(a, b);
        prop_assert_eq!(p, a * b);
        prop_assert_eq!(&exact(p) + &exact(e), &exact(a) * &exact(b));
    }

    #[test]
    fn two_prod_is_exact_f32(a in moderate_f32(), b in moderate_f32()) {
        let (p, e) = two_prod(a, b);
        prop_assert_eq!(&exact(p) + &exact(e), &exact(a) * &exact(b));
    }

    #[test]
    fn two_sum_is_exact(a in moderate_f64(), b in moderate_f64()) {
        let (s, e) = two_sum(a, b);
        prop_assert_eq!(s, a + b);
        prop_assert_eq!(&exact(s) + &exact(e), &exact(a) + &exact(b));
    }

    #[test]
    fn three_fma_is_exact_f64(a in moderate_f64(), b in moderate_f64(), c in moderate_f64()) {
        let (s, e1, e2) = three_fma(a, b, c);
        prop_assert_eq!(s, a.fma(b, c));
        let decomposed = &(&exact(s) + &exact(e1)) + &exact(e2);
        prop_assert_eq!(decomposed, &(&exact(a) * &exact(b)) + &exact(c));
    }

    #[test]
    fn three_fma_is_exact_f32(a in moderate_f32(), b in moderate_f32(), c in moderate_f32()) {
        let (s, e1, e2) = three_fma(a, b, c);
        let decomposed = &(&exact(s) + &exact(e1)) + &exact(e2);
        prop_assert_eq!(decomposed, &(&exact(a) * &exact(b)) + &exact(c));
    }
}
