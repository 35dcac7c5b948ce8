//! Per-algorithm measurement: one timer and one statistics engine for each
//! algorithm under comparison.

use std::hint::black_box;
use std::time::Duration;

use tracing::{debug, warn};

use crate::exact::ExactNumber;
use crate::float::WorkingFloat;
use crate::report::TestSummary;
use crate::stats::ErrorStatistics;
use crate::timer::{CpuTimer, TimerResult};

/// A generated input together with its exact result.
pub trait TestCase {
    fn reference(&self) -> &ExactNumber;
}

/// An accumulation strategy evaluated on test cases of type `C`, returning
/// its estimate in precision `R`. The operand precision is the case's own,
/// so `R` may be wider than the inputs.
///
/// Implementations must be pure: the same case always yields the same bits.
pub trait Algorithm<C: TestCase, R: WorkingFloat> {
    fn name(&self) -> String;
    fn run(&self, case: &C) -> R;
}

/// What happened to one trial's estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrialOutcome {
    Recorded,
    /// The reference was zero; relative error has no value.
    UndefinedRelativeError,
    /// The algorithm overflowed to infinity or produced NaN.
    NonFiniteEstimate,
}

pub struct NumericTest<C: TestCase, R: WorkingFloat> {
    name: String,
    algorithm: Box<dyn Algorithm<C, R>>,
    timer: CpuTimer,
    stats: ErrorStatistics,
    excluded: u64,
}

impl<C: TestCase, R: WorkingFloat> NumericTest<C, R> {
    pub fn new(algorithm: Box<dyn Algorithm<C, R>>) -> Self {
        Self::with_name(algorithm.name(), algorithm)
    }

    pub fn with_name(name: String, algorithm: Box<dyn Algorithm<C, R>>) -> Self {
        Self {
            name,
            algorithm,
            timer: CpuTimer::new(),
            stats: ErrorStatistics::new(),
            excluded: 0,
        }
    }

    /// Times one run of the algorithm on `case` and records its error.
    ///
    /// Only timer failures are returned as errors; estimates whose error
    /// cannot be measured are counted as excluded.
    pub fn update_stats(&mut self, case: &C) -> TimerResult<TrialOutcome> {
        let algorithm = &self.algorithm;
        let estimate = self.timer.time(|| algorithm.run(black_box(case)))?;
        let reference = case.reference();

        let outcome = match estimate.to_exact(reference.precision()) {
            Err(_) => TrialOutcome::NonFiniteEstimate,
            // A zero reference is the only input record_trial rejects.
            Ok(estimate) => match self.stats.record_trial(&estimate, reference) {
                Ok(_) => TrialOutcome::Recorded,
                Err(_) => TrialOutcome::UndefinedRelativeError,
            },
        };

        if outcome != TrialOutcome::Recorded {
            if self.excluded == 0 {
                warn!(test = %self.name, ?outcome, "Excluding trial from statistics");
            }
            debug!(test = %self.name, ?outcome, estimate = %estimate, "Trial excluded");
            self.excluded += 1;
        }
        Ok(outcome)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &ErrorStatistics {
        &self.stats
    }

    pub fn excluded(&self) -> u64 {
        self.excluded
    }

    pub fn total_run_time(&self) -> Duration {
        self.timer.total()
    }

    pub fn summary(&self) -> TestSummary<'_> {
        TestSummary {
            name: &self.name,
            run_time: self.total_run_time(),
            stats: &self.stats,
            excluded: self.excluded,
        }
    }
}
