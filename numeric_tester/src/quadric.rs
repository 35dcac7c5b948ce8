//! Evaluation of a translated implicit quadric.
//!
//! The surface is `f(p) = Σ (pᵢ + tᵢ)² − r²`, evaluated at a random point
//! for a sphere and for a cylinder aligned with one coordinate axis. The
//! algorithms expand the square as `Σ pᵢ(pᵢ + tᵢ) + Σ (pᵢtᵢ + tᵢ²) − r²`,
//! which is where they differ in rounding.

use strum_macros::{Display, EnumIter};

use crate::exact::{ExactNumber, ExactResult};
use crate::float::WorkingFloat;
use crate::generator::OperandGenerator;
use crate::harness::{Algorithm, TestCase};

pub const DIMENSION: usize = 3;

/// Operand magnitude bound used by the original measurements, 2^20.
pub const DEFAULT_MAX_MAGNITUDE: f32 = 1024.0 * 1024.0;

/// Exact precision that keeps quadric references exact for `f32` operands.
pub const DEFAULT_PRECISION: usize = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
pub enum QuadricShape {
    #[strum(to_string = "Sphere Tests")]
    Sphere,
    #[strum(to_string = "Axis Aligned Cylinder Tests")]
    AxisCylinder,
}

#[derive(Clone, Debug)]
pub struct QuadricCase<F: WorkingFloat> {
    pos: [F; DIMENSION],
    trans: [F; DIMENSION],
    radius: F,
    reference: ExactNumber,
}

impl<F: WorkingFloat> QuadricCase<F> {
    pub fn new(
        pos: [F; DIMENSION],
        trans: [F; DIMENSION],
        radius: F,
        precision: usize,
    ) -> ExactResult<Self> {
        let exact_radius = radius.to_exact(precision)?;
        let mut reference = -(&exact_radius * &exact_radius);
        for (&p, &t) in pos.iter().zip(&trans) {
            let shifted = &p.to_exact(precision)? + &t.to_exact(precision)?;
            reference += &(&shifted * &shifted);
        }

        Ok(Self {
            pos,
            trans,
            radius,
            reference,
        })
    }

    /// Draws every operand uniformly from `[-max_magnitude, max_magnitude)`.
    /// Cylinder cases leave the translation along one random axis at zero.
    pub fn generate(
        shape: QuadricShape,
        generator: &mut OperandGenerator,
        max_magnitude: F,
        precision: usize,
    ) -> ExactResult<Self> {
        let draw =
            |generator: &mut OperandGenerator| generator.uniform(-max_magnitude, max_magnitude);

        let fixed_axis = match shape {
            QuadricShape::Sphere => None,
            QuadricShape::AxisCylinder => Some(generator.index(DIMENSION)),
        };
        let radius = draw(generator).abs();

        let mut pos = [F::zero(); DIMENSION];
        let mut trans = [F::zero(); DIMENSION];
        for axis in 0..DIMENSION {
            if fixed_axis != Some(axis) {
                trans[axis] = draw(generator);
            }
            pos[axis] = draw(generator);
        }

        Self::new(pos, trans, radius, precision)
    }

    pub fn pos(&self) -> &[F; DIMENSION] {
        &self.pos
    }

    pub fn trans(&self) -> &[F; DIMENSION] {
        &self.trans
    }

    pub fn radius(&self) -> F {
        self.radius
    }
}

impl<F: WorkingFloat> TestCase for QuadricCase<F> {
    fn reference(&self) -> &ExactNumber {
        &self.reference
    }
}

fn shifted<F: WorkingFloat>(case: &QuadricCase<F>) -> [F; DIMENSION] {
    std::array::from_fn(|i| case.pos[i] + case.trans[i])
}

/// Does no arithmetic; its running time is the harness overhead.
#[derive(Clone, Copy, Debug, Default)]
pub struct Null;

impl<F: WorkingFloat> Algorithm<QuadricCase<F>, F> for Null {
    fn name(&self) -> String {
        "Null Quadric Evaluation".to_string()
    }

    fn run(&self, _case: &QuadricCase<F>) -> F {
        F::zero()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Naive;

impl<F: WorkingFloat> Algorithm<QuadricCase<F>, F> for Naive {
    fn name(&self) -> String {
        "Naive Quadric Evaluation".to_string()
    }

    #[inline(never)]
    fn run(&self, case: &QuadricCase<F>) -> F {
        let moved = shifted(case);
        let mut trans_sum = -case.radius * case.radius;
        for (&p, &t) in case.pos.iter().zip(&case.trans) {
            trans_sum = trans_sum + (p * t + t * t);
        }

        let mut accumulator = trans_sum;
        for (&p, &m) in case.pos.iter().zip(&moved) {
            accumulator = accumulator + p * m;
        }
        accumulator
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Fma;

impl<F: WorkingFloat> Algorithm<QuadricCase<F>, F> for Fma {
    fn name(&self) -> String {
        "FMA Quadric Evaluation".to_string()
    }

    #[inline(never)]
    fn run(&self, case: &QuadricCase<F>) -> F {
        let moved = shifted(case);
        let mut trans_sum = -case.radius * case.radius;
        for (&p, &t) in case.pos.iter().zip(&case.trans) {
            trans_sum = p.fma(t, trans_sum);
            trans_sum = t.fma(t, trans_sum);
        }

        let mut accumulator = trans_sum;
        for (&p, &m) in case.pos.iter().zip(&moved) {
            accumulator = p.fma(m, accumulator);
        }
        accumulator
    }
}

/// Translation sum with separate Kahan compensation for the `pᵢtᵢ` and
/// `tᵢ²` terms, each folded in through a fused `fma(·, ·, −c)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct KahanFma;

impl<F: WorkingFloat> Algorithm<QuadricCase<F>, F> for KahanFma {
    fn name(&self) -> String {
        "Kahan FMA Quadric Evaluation".to_string()
    }

    #[inline(never)]
    fn run(&self, case: &QuadricCase<F>) -> F {
        let moved = shifted(case);
        let mut trans_sum = -case.radius * case.radius;
        let mut c1 = F::zero();
        let mut c2 = F::zero();
        for (&p, &t) in case.pos.iter().zip(&case.trans) {
            let mod1 = p.fma(t, -c1);
            let tmp = trans_sum + mod1;
            c1 = (tmp - trans_sum) - mod1;
            trans_sum = tmp;

            let mod2 = t.fma(t, -c2);
            let tmp = trans_sum + mod2;
            c2 = (tmp - trans_sum) - mod2;
            trans_sum = tmp;
        }

        let mut accumulator = trans_sum;
        for (&p, &m) in case.pos.iter().zip(&moved) {
            accumulator = p.fma(m, accumulator);
        }
        accumulator
    }
}

pub fn all<F: WorkingFloat>() -> Vec<Box<dyn Algorithm<QuadricCase<F>, F>>> {
    vec![
        Box::new(Null),
        Box::new(Naive),
        Box::new(Fma),
        Box::new(KahanFma),
    ]
}

#[cfg(test)]
mod tests;
