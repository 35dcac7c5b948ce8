//! The six accumulation strategies.
//!
//! Every kernel reads operands of type `F` and returns its estimate as `R`,
//! which is `F` itself or a wider type. Where each intermediate lives
//! differs per kernel and is part of what is measured: a wider `R` does not
//! make every step exact. Kernels keep no state between invocations; empty
//! input is not guarded.

use crate::eft::{three_fma, two_prod};
use crate::float::WorkingFloat;
use crate::genus::kobbelt_dot_product;
use crate::harness::Algorithm;

use super::DotProductCase;

/// Products rounded in `F`, accumulated in `R`.
pub fn naive<F, R>(v1: &[F], v2: &[F]) -> R
where
    F: WorkingFloat,
    R: WorkingFloat + From<F>,
{
    let mut accumulator = R::zero();
    for (&a, &b) in v1.iter().zip(v2) {
        accumulator = accumulator + <R as From<F>>::from(a * b);
    }
    accumulator
}

/// Fused accumulation in `F`, widened once at the end.
pub fn fma<F, R>(v1: &[F], v2: &[F]) -> R
where
    F: WorkingFloat,
    R: WorkingFloat + From<F>,
{
    let mut accumulator = F::zero();
    for (&a, &b) in v1.iter().zip(v2) {
        accumulator = a.fma(b, accumulator);
    }
    <R as From<F>>::from(accumulator)
}

/// Products rounded in `F`, compensated summation in `R`.
pub fn kahan<F, R>(v1: &[F], v2: &[F]) -> R
where
    F: WorkingFloat,
    R: WorkingFloat + From<F>,
{
    let mut accumulator = R::zero();
    let mut c = R::zero();
    for (&a, &b) in v1.iter().zip(v2) {
        let modified = <R as From<F>>::from(a * b) - c;
        let tmp = accumulator + modified;
        c = (tmp - accumulator) - modified;
        accumulator = tmp;
    }
    accumulator
}

/// Compensated summation in `R` with the product folded into the
/// compensation by a fused multiply-add on widened operands.
pub fn fma_kahan<F, R>(v1: &[F], v2: &[F]) -> R
where
    F: WorkingFloat,
    R: WorkingFloat + From<F>,
{
    let mut accumulator = R::zero();
    let mut c = R::zero();
    for (&a, &b) in v1.iter().zip(v2) {
        let modified = <R as From<F>>::from(a).fma(<R as From<F>>::from(b), -c);
        let tmp = accumulator + modified;
        c = (tmp - accumulator) - modified;
        accumulator = tmp;
    }
    accumulator
}

/// Double-length accumulation `(high, low)` in `F` built from error-free
/// transformations only; `high + low` is rounded in `F` and then widened.
/// Panics on empty input.
pub fn exact_fma_compensated<F, R>(v1: &[F], v2: &[F]) -> R
where
    F: WorkingFloat,
    R: WorkingFloat + From<F>,
{
    let (mut high, mut low) = two_prod(v1[0], v2[0]);
    for (&a, &b) in v1.iter().zip(v2).skip(1) {
        let (sum, e1, e2) = three_fma(a, b, high);
        high = sum;
        low = low + (e1 + e2);
    }
    <R as From<F>>::from(high + low)
}

/// Genus table in `F`, drained into `R`.
pub fn kobbelt<F, R>(v1: &[F], v2: &[F]) -> R
where
    F: WorkingFloat,
    R: WorkingFloat + From<F>,
{
    kobbelt_dot_product(v1, v2)
}

macro_rules! dot_product_algorithm {
    ($name:ident, $label:literal, $kernel:ident) => {
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        impl<F, R> Algorithm<DotProductCase<F>, R> for $name
        where
            F: WorkingFloat,
            R: WorkingFloat + From<F>,
        {
            fn name(&self) -> String {
                format!("{} Dot Product with {}", $label, R::NAME)
            }

            #[inline(never)]
            fn run(&self, case: &DotProductCase<F>) -> R {
                $kernel(case.v1(), case.v2())
            }
        }
    };
}

dot_product_algorithm!(Naive, "Naive", naive);
dot_product_algorithm!(Fma, "FMA", fma);
dot_product_algorithm!(Kahan, "Kahan", kahan);
dot_product_algorithm!(FmaKahan, "Kahan FMA", fma_kahan);
dot_product_algorithm!(
    ExactFmaCompensated,
    "Exact FMA Compensated",
    exact_fma_compensated
);
dot_product_algorithm!(Kobbelt, "Kobbelt", kobbelt);

/// Every algorithm, from least to most accurate, reading `F` operands and
/// returning `R` estimates.
pub fn all<F, R>() -> Vec<Box<dyn Algorithm<DotProductCase<F>, R>>>
where
    F: WorkingFloat,
    R: WorkingFloat + From<F>,
{
    vec![
        Box::new(Naive),
        Box::new(Fma),
        Box::new(Kahan),
        Box::new(FmaKahan),
        Box::new(ExactFmaCompensated),
        Box::new(Kobbelt),
    ]
}
