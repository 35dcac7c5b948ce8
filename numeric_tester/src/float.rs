//! Working-precision floating point types.
//!
//! The set of supported precisions is closed: `f32` ("float") and `f64`
//! ("double"). Everything generic over [`WorkingFloat`] is monomorphized for
//! both, so no run-time type inspection is needed to recover the operand type.

use std::fmt::{Debug, Display};

use num_traits::Float;
use rand::distr::uniform::SampleUniform;

use crate::exact::{ExactNumber, ExactResult};

pub trait WorkingFloat:
    Float + Debug + Display + Default + SampleUniform + Into<f64> + Send + Sync + 'static
{
    /// Human readable type name used in algorithm names.
    const NAME: &'static str;
    /// Stored mantissa bits (without the implicit leading one).
    const MANTISSA_BITS: u32;
    const EXPONENT_BITS: u32;
    /// Biased exponent field of 1.0.
    const EXPONENT_BIAS: u32;
    /// Biased exponent field reserved for infinities and NaN.
    const MAX_EXPONENT: u32 = (1 << Self::EXPONENT_BITS) - 1;
    const MAX_MANTISSA: u64 = (1 << Self::MANTISSA_BITS) - 1;
    /// Exact-number precision that holds any sum of a few exact products of
    /// operands drawn from the default generator range without rounding.
    const EXACT_PRECISION: usize;

    fn is_sign_bit_set(self) -> bool;
    fn biased_exponent(self) -> u32;
    fn mantissa_bits(self) -> u64;
    fn from_fields(sign: bool, biased_exponent: u32, mantissa: u64) -> Self;

    /// `self * b + c` with a single rounding.
    ///
    /// Relies on `mul_add` being correctly rounded on the target. Every
    /// error-free transformation in [`crate::eft`] depends on this; targets
    /// whose `fma` is emulated with two roundings silently lose exactness.
    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        self.mul_add(b, c)
    }

    fn to_exact(self, precision: usize) -> ExactResult<ExactNumber>;
}

impl WorkingFloat for f32 {
    const NAME: &'static str = "float";
    const MANTISSA_BITS: u32 = 23;
    const EXPONENT_BITS: u32 = 8;
    const EXPONENT_BIAS: u32 = 127;
    const EXACT_PRECISION: usize = 1024;

    #[inline]
    fn is_sign_bit_set(self) -> bool {
        self.to_bits() >> 31 == 1
    }

    #[inline]
    fn biased_exponent(self) -> u32 {
        (self.to_bits() >> Self::MANTISSA_BITS) & Self::MAX_EXPONENT
    }

    #[inline]
    fn mantissa_bits(self) -> u64 {
        (self.to_bits() as u64) & Self::MAX_MANTISSA
    }

    fn from_fields(sign: bool, biased_exponent: u32, mantissa: u64) -> Self {
        debug_assert!(biased_exponent <= Self::MAX_EXPONENT);
        debug_assert!(mantissa <= Self::MAX_MANTISSA);
        let bits = ((sign as u32) << 31)
            | ((biased_exponent & Self::MAX_EXPONENT) << Self::MANTISSA_BITS)
            | (mantissa & Self::MAX_MANTISSA) as u32;
        f32::from_bits(bits)
    }

    fn to_exact(self, precision: usize) -> ExactResult<ExactNumber> {
        ExactNumber::from_f32(self, precision)
    }
}

impl WorkingFloat for f64 {
    const NAME: &'static str = "double";
    const MANTISSA_BITS: u32 = 52;
    const EXPONENT_BITS: u32 = 11;
    const EXPONENT_BIAS: u32 = 1023;
    const EXACT_PRECISION: usize = 4352;

    #[inline]
    fn is_sign_bit_set(self) -> bool {
        self.to_bits() >> 63 == 1
    }

    #[inline]
    fn biased_exponent(self) -> u32 {
        ((self.to_bits() >> Self::MANTISSA_BITS) as u32) & Self::MAX_EXPONENT
    }

    #[inline]
    fn mantissa_bits(self) -> u64 {
        self.to_bits() & Self::MAX_MANTISSA
    }

    fn from_fields(sign: bool, biased_exponent: u32, mantissa: u64) -> Self {
        debug_assert!(biased_exponent <= Self::MAX_EXPONENT);
        debug_assert!(mantissa <= Self::MAX_MANTISSA);
        let bits = ((sign as u64) << 63)
            | (((biased_exponent & Self::MAX_EXPONENT) as u64) << Self::MANTISSA_BITS)
            | (mantissa & Self::MAX_MANTISSA);
        f64::from_bits(bits)
    }

    fn to_exact(self, precision: usize) -> ExactResult<ExactNumber> {
        ExactNumber::from_f64(self, precision)
    }
}
