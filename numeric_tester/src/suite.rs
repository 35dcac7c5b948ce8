//! Trial loops: one generated case per trial, consumed by every algorithm
//! of the suite in turn.

use anyhow::Context;
use tracing::{debug, info};

use crate::dot_product::{algorithms, DotProductCase};
use crate::generator::OperandGenerator;
use crate::harness::NumericTest;
use crate::quadric::{self, QuadricCase, QuadricShape};
use crate::report::TestSummary;
use crate::timer::TimerResult;

const PROGRESS_STEPS: usize = 10;

fn log_progress(suite: &str, trial: usize, trials: usize) {
    let step = (trials / PROGRESS_STEPS).max(1);
    if (trial + 1) % step == 0 {
        debug!(suite, done = trial + 1, trials, "Progress");
    }
}

/// Every dot product algorithm returning single and double precision.
///
/// Both families read the same single precision case; the double family
/// only differs in the type its intermediates and results are kept in.
pub struct DotProductSuite {
    single: Vec<NumericTest<DotProductCase<f32>, f32>>,
    double: Vec<NumericTest<DotProductCase<f32>, f64>>,
}

impl Default for DotProductSuite {
    fn default() -> Self {
        Self {
            single: algorithms::all::<f32, f32>()
                .into_iter()
                .map(NumericTest::new)
                .collect(),
            double: algorithms::all::<f32, f64>()
                .into_iter()
                .map(NumericTest::new)
                .collect(),
        }
    }
}

impl DotProductSuite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.single.len() + self.double.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn run_trial(&mut self, case: &DotProductCase<f32>) -> TimerResult<()> {
        for test in &mut self.single {
            test.update_stats(case)?;
        }
        for test in &mut self.double {
            test.update_stats(case)?;
        }
        Ok(())
    }

    pub fn run(
        &mut self,
        generator: &mut OperandGenerator,
        trials: usize,
        dimension: usize,
        precision: usize,
    ) -> anyhow::Result<()> {
        info!(trials, dimension, precision, tests = self.len(), "Running dot product suite");

        for trial in 0..trials {
            let case = DotProductCase::generate(generator, dimension, precision)
                .with_context(|| format!("Failed to generate dot product case {trial}"))?;
            self.run_trial(&case)?;
            log_progress("dot product", trial, trials);
        }

        info!(
            rejected_patterns = generator.rejected(),
            "Dot product suite finished"
        );
        Ok(())
    }

    pub fn summaries(&self) -> Vec<TestSummary<'_>> {
        self.single
            .iter()
            .map(NumericTest::summary)
            .chain(self.double.iter().map(NumericTest::summary))
            .collect()
    }
}

/// Quadric evaluations of one shape in single precision.
pub struct QuadricSuite {
    shape: QuadricShape,
    tests: Vec<NumericTest<QuadricCase<f32>, f32>>,
}

impl QuadricSuite {
    pub fn new(shape: QuadricShape) -> Self {
        Self {
            shape,
            tests: quadric::all::<f32>()
                .into_iter()
                .map(NumericTest::new)
                .collect(),
        }
    }

    pub fn shape(&self) -> QuadricShape {
        self.shape
    }

    pub fn run_trial(&mut self, case: &QuadricCase<f32>) -> TimerResult<()> {
        for test in &mut self.tests {
            test.update_stats(case)?;
        }
        Ok(())
    }

    pub fn run(
        &mut self,
        generator: &mut OperandGenerator,
        trials: usize,
        precision: usize,
    ) -> anyhow::Result<()> {
        info!(shape = %self.shape, trials, precision, "Running quadric suite");

        for trial in 0..trials {
            let case = QuadricCase::generate(
                self.shape,
                generator,
                quadric::DEFAULT_MAX_MAGNITUDE,
                precision,
            )
            .with_context(|| format!("Failed to generate quadric case {trial}"))?;
            self.run_trial(&case)?;
            log_progress("quadric", trial, trials);
        }

        info!(shape = %self.shape, "Quadric suite finished");
        Ok(())
    }

    pub fn summaries(&self) -> Vec<TestSummary<'_>> {
        self.tests.iter().map(NumericTest::summary).collect()
    }
}
