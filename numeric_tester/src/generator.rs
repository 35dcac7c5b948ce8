//! Pseudo-random operand generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::float::WorkingFloat;

/// Largest biased exponent drawn above the bias of 1.0, so operands stay
/// below `2^(DEFAULT_EXPONENT_HEADROOM + 1)` in magnitude.
pub const DEFAULT_EXPONENT_HEADROOM: u32 = 20;

#[derive(Debug)]
pub struct OperandGenerator {
    rng: StdRng,
    seed: u64,
    exponent_headroom: u32,
    rejected: u64,
}

impl OperandGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            exponent_headroom: DEFAULT_EXPONENT_HEADROOM,
            rejected: 0,
        }
    }

    #[must_use]
    pub fn with_exponent_headroom(mut self, headroom: u32) -> Self {
        self.exponent_headroom = headroom;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of bit patterns discarded because they decoded to NaN or
    /// infinity.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Draws sign, biased exponent and mantissa independently and uniformly.
    /// Patterns that decode to NaN or infinity are redrawn.
    pub fn bit_pattern<F: WorkingFloat>(&mut self) -> F {
        let max_exponent = F::EXPONENT_BIAS
            .saturating_add(self.exponent_headroom)
            .min(F::MAX_EXPONENT);
        loop {
            let sign = self.rng.random_bool(0.5);
            let exponent = self.rng.random_range(0..=max_exponent);
            let mantissa = self.rng.random_range(0..=F::MAX_MANTISSA);
            let value = F::from_fields(sign, exponent, mantissa);
            if value.is_finite() {
                return value;
            }
            self.rejected += 1;
            trace!(exponent, mantissa, "Rejected non-finite bit pattern");
        }
    }

    /// Uniform draw from `[low, high)`.
    pub fn uniform<F: WorkingFloat>(&mut self, low: F, high: F) -> F {
        self.rng.random_range(low..high)
    }

    /// Uniform index in `0..len`.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}
