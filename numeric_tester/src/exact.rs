//! Arbitrary-precision reference numbers.
//!
//! `ExactNumber` wraps a binary `FBig` whose precision is fixed when the
//! number is created. There is no global precision setting: results of
//! arithmetic carry the larger precision of their operands, so runs at
//! different precisions never interfere.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use dashu_float::ops::SquareRoot;
use dashu_float::round::mode::HalfEven;
use dashu_float::FBig;
use thiserror::Error;

type Repr = FBig<HalfEven>;

/// Significant decimal digits used by `Display`. This rounds the stored
/// value; use [`ExactNumber::to_decimal_string`] for longer renderings.
pub const DISPLAY_DIGITS: usize = 24;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExactError {
    #[error("Non-finite value {0} has no exact representation")]
    NonFinite(f64),
    #[error("Precision must be at least one bit")]
    ZeroPrecision,
}

pub type ExactResult<T> = Result<T, ExactError>;

#[derive(Clone, Debug)]
pub struct ExactNumber {
    value: Repr,
}

impl ExactNumber {
    pub fn zero(precision: usize) -> ExactResult<Self> {
        Self::with_precision(Repr::ZERO, precision)
    }

    /// Fails on infinities and NaN, which `FBig` would otherwise accept as
    /// values that panic in arithmetic.
    pub fn from_f32(value: f32, precision: usize) -> ExactResult<Self> {
        if !value.is_finite() {
            return Err(ExactError::NonFinite(value as f64));
        }
        let repr = Repr::try_from(value).map_err(|_| ExactError::NonFinite(value as f64))?;
        Self::with_precision(repr, precision)
    }

    pub fn from_f64(value: f64, precision: usize) -> ExactResult<Self> {
        if !value.is_finite() {
            return Err(ExactError::NonFinite(value));
        }
        let repr = Repr::try_from(value).map_err(|_| ExactError::NonFinite(value))?;
        Self::with_precision(repr, precision)
    }

    /// Exact for counts below 2^53.
    pub fn from_count(count: usize, precision: usize) -> ExactResult<Self> {
        debug_assert!(count < (1 << 53));
        Self::from_f64(count as f64, precision)
    }

    fn with_precision(repr: Repr, precision: usize) -> ExactResult<Self> {
        // Precision zero means "unlimited" to FBig, which makes division panic.
        if precision == 0 {
            return Err(ExactError::ZeroPrecision);
        }
        Ok(Self {
            value: repr.with_precision(precision).value(),
        })
    }

    pub fn precision(&self) -> usize {
        self.value.precision()
    }

    pub fn is_zero(&self) -> bool {
        self.value == Repr::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.value < Repr::ZERO
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    /// Panics on negative input.
    pub fn sqrt(&self) -> Self {
        Self {
            value: self.value.sqrt(),
        }
    }

    /// Natural logarithm. Panics on non-positive input.
    pub fn ln(&self) -> Self {
        Self {
            value: self.value.ln(),
        }
    }

    /// Nearest `f64`, saturating to infinity outside its range.
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().value()
    }

    /// Decimal rendering rounded to `digits` significant digits.
    pub fn to_decimal_string(&self, digits: usize) -> String {
        let decimal = self.value.clone().to_decimal().value();
        decimal.with_precision(digits.max(1)).value().to_string()
    }
}

impl PartialEq for ExactNumber {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ExactNumber {}

impl PartialOrd for ExactNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExactNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for ExactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string(DISPLAY_DIGITS))
    }
}

macro_rules! exact_binary_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&ExactNumber> for &ExactNumber {
            type Output = ExactNumber;

            fn $method(self, rhs: &ExactNumber) -> ExactNumber {
                ExactNumber {
                    value: &self.value $op &rhs.value,
                }
            }
        }

        impl $trait for ExactNumber {
            type Output = ExactNumber;

            fn $method(self, rhs: ExactNumber) -> ExactNumber {
                &self $op &rhs
            }
        }
    };
}

exact_binary_op!(Add, add, +);
exact_binary_op!(Sub, sub, -);
exact_binary_op!(Mul, mul, *);
// Panics on a zero divisor; callers check `is_zero` first.
exact_binary_op!(Div, div, /);

impl AddAssign<&ExactNumber> for ExactNumber {
    fn add_assign(&mut self, rhs: &ExactNumber) {
        self.value = &self.value + &rhs.value;
    }
}

impl Neg for &ExactNumber {
    type Output = ExactNumber;

    fn neg(self) -> ExactNumber {
        ExactNumber {
            value: -self.value.clone(),
        }
    }
}

impl Neg for ExactNumber {
    type Output = ExactNumber;

    fn neg(self) -> ExactNumber {
        ExactNumber { value: -self.value }
    }
}

#[cfg(test)]
mod tests;
