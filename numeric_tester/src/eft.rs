//! Error-free transformations.
//!
//! Each function returns a rounded result together with the exact rounding
//! error, using only working-precision operations. The identities hold as
//! long as no intermediate overflows and the products stay clear of the
//! subnormal range, where the low half of a product cannot be represented.
//!
//! `two_prod` and `three_fma` need a correctly rounded fused multiply-add
//! (see [`WorkingFloat::fma`]).

use crate::float::WorkingFloat;

/// Knuth's branch-free two-sum: `s = fl(a + b)` and `s + e == a + b`.
#[inline(always)]
pub fn two_sum<F: WorkingFloat>(a: F, b: F) -> (F, F) {
    let s = a + b;
    let b_virtual = s - a;
    let a_virtual = s - b_virtual;
    let e = (a - a_virtual) + (b - b_virtual);
    (s, e)
}

/// `p = fl(a * b)` and `p + e == a * b`.
#[inline(always)]
pub fn two_prod<F: WorkingFloat>(a: F, b: F) -> (F, F) {
    let p = a * b;
    let e = a.fma(b, -p);
    (p, e)
}

/// Boldo-Muller ErrFma: `s = fma(a, b, c)` and `s + e1 + e2 == a * b + c`.
#[inline(always)]
pub fn three_fma<F: WorkingFloat>(a: F, b: F, c: F) -> (F, F, F) {
    let s = a.fma(b, c);
    let (u1, u2) = two_prod(a, b);
    let (alpha1, z) = two_sum(c, u2);
    let (beta1, beta2) = two_sum(u1, alpha1);
    let gamma = (beta1 - s) + beta2;
    let (e1, e2) = two_sum(gamma, z);
    (s, e1, e2)
}

#[cfg(test)]
mod tests;
