//! Dot product test cases and accumulation algorithms.

pub mod algorithms;

use crate::exact::{ExactNumber, ExactResult};
use crate::float::WorkingFloat;
use crate::generator::OperandGenerator;
use crate::harness::TestCase;

/// Two operand vectors of equal length and the exact sum of their
/// elementwise products.
#[derive(Clone, Debug)]
pub struct DotProductCase<F: WorkingFloat> {
    v1: Vec<F>,
    v2: Vec<F>,
    reference: ExactNumber,
}

impl<F: WorkingFloat> DotProductCase<F> {
    pub fn from_vectors(v1: Vec<F>, v2: Vec<F>, precision: usize) -> ExactResult<Self> {
        assert_eq!(v1.len(), v2.len(), "Operand vectors must have equal length");

        let mut reference = ExactNumber::zero(precision)?;
        for (&a, &b) in v1.iter().zip(&v2) {
            reference += &(&a.to_exact(precision)? * &b.to_exact(precision)?);
        }

        Ok(Self { v1, v2, reference })
    }

    pub fn generate(
        generator: &mut OperandGenerator,
        dimension: usize,
        precision: usize,
    ) -> ExactResult<Self> {
        let mut v1 = Vec::with_capacity(dimension);
        let mut v2 = Vec::with_capacity(dimension);
        for _ in 0..dimension {
            v1.push(generator.bit_pattern());
            v2.push(generator.bit_pattern());
        }
        Self::from_vectors(v1, v2, precision)
    }

    pub fn v1(&self) -> &[F] {
        &self.v1
    }

    pub fn v2(&self) -> &[F] {
        &self.v2
    }

    pub fn dimension(&self) -> usize {
        self.v1.len()
    }
}

impl<F: WorkingFloat> TestCase for DotProductCase<F> {
    fn reference(&self) -> &ExactNumber {
        &self.reference
    }
}
