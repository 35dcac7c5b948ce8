//! Error statistics over the trials of one algorithm.
//!
//! All aggregates are kept as [`ExactNumber`]s at the precision of the
//! references fed in, so the statistics themselves add no rounding noise at
//! working precision. Samples are append-only.

use thiserror::Error;

use crate::exact::{ExactError, ExactNumber};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error("No samples recorded")]
    Empty,
    #[error("At least {required} samples required, {actual} recorded")]
    InsufficientSamples { required: usize, actual: usize },
    #[error("Percentile fraction {0} is outside [0, 1]")]
    InvalidPercentile(f64),
    #[error("Relative error is undefined for a zero reference value")]
    UndefinedRelativeError,
    #[error("Variance is zero; standardized moments are undefined")]
    DegenerateVariance,
    #[error(transparent)]
    Exact(#[from] ExactError),
}

pub type StatsResult<T> = Result<T, StatsError>;

/// Error of one estimate against its reference.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorSample {
    pub absolute: ExactNumber,
    pub relative: ExactNumber,
}

impl ErrorSample {
    pub fn new(estimate: &ExactNumber, reference: &ExactNumber) -> StatsResult<Self> {
        if reference.is_zero() {
            return Err(StatsError::UndefinedRelativeError);
        }
        let absolute = (estimate - reference).abs();
        let relative = (&absolute / reference).abs();
        Ok(Self { absolute, relative })
    }
}

#[derive(Debug, Default)]
pub struct ErrorStatistics {
    samples: Vec<ErrorSample>,
    relative_sum: Option<ExactNumber>,
    min: Option<ExactNumber>,
    max: Option<ExactNumber>,
}

impl ErrorStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the error of `estimate` and appends it. A zero `reference`
    /// is rejected and leaves the statistics untouched.
    pub fn record_trial(
        &mut self,
        estimate: &ExactNumber,
        reference: &ExactNumber,
    ) -> StatsResult<&ErrorSample> {
        let sample = ErrorSample::new(estimate, reference)?;

        self.relative_sum = Some(match self.relative_sum.take() {
            Some(sum) => &sum + &sample.relative,
            None => sample.relative.clone(),
        });
        if self.min.as_ref().is_none_or(|min| sample.relative < *min) {
            self.min = Some(sample.relative.clone());
        }
        if self.max.as_ref().is_none_or(|max| sample.relative > *max) {
            self.max = Some(sample.relative.clone());
        }

        self.samples.push(sample);
        Ok(&self.samples[self.samples.len() - 1])
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[ErrorSample] {
        &self.samples
    }

    pub fn min(&self) -> StatsResult<&ExactNumber> {
        self.min.as_ref().ok_or(StatsError::Empty)
    }

    pub fn max(&self) -> StatsResult<&ExactNumber> {
        self.max.as_ref().ok_or(StatsError::Empty)
    }

    /// Mean relative error.
    pub fn mean(&self) -> StatsResult<ExactNumber> {
        let sum = self.relative_sum.as_ref().ok_or(StatsError::Empty)?;
        let count = ExactNumber::from_count(self.count(), sum.precision())?;
        Ok(sum / &count)
    }

    /// `Σ (x - mean)^order / (n - 1)` over the relative errors.
    pub fn central_moment(&self, order: u32) -> StatsResult<ExactNumber> {
        let mean = self.mean()?;
        if self.count() < 2 {
            return Err(StatsError::InsufficientSamples {
                required: 2,
                actual: self.count(),
            });
        }

        let mut total = ExactNumber::zero(mean.precision())?;
        for sample in &self.samples {
            let delta = &sample.relative - &mean;
            let mut power = delta.clone();
            for _ in 1..order {
                power = &power * &delta;
            }
            total += &power;
        }

        let divisor = ExactNumber::from_count(self.count() - 1, mean.precision())?;
        Ok(&total / &divisor)
    }

    /// Unbiased sample variance.
    pub fn variance(&self) -> StatsResult<ExactNumber> {
        self.central_moment(2)
    }

    pub fn std_dev(&self) -> StatsResult<ExactNumber> {
        Ok(self.variance()?.sqrt())
    }

    /// Third central moment over the cubed standard deviation.
    pub fn skewness(&self) -> StatsResult<ExactNumber> {
        let variance = self.non_degenerate_variance()?;
        let std_dev = variance.sqrt();
        let cubed = &(&std_dev * &std_dev) * &std_dev;
        Ok(&self.central_moment(3)? / &cubed)
    }

    /// Excess kurtosis: fourth central moment over the squared variance,
    /// minus 3.
    pub fn kurtosis(&self) -> StatsResult<ExactNumber> {
        let variance = self.non_degenerate_variance()?;
        let normalized = &self.central_moment(4)? / &(&variance * &variance);
        let three = ExactNumber::from_count(3, normalized.precision())?;
        Ok(&normalized - &three)
    }

    fn non_degenerate_variance(&self) -> StatsResult<ExactNumber> {
        let variance = self.variance()?;
        if variance.is_zero() {
            return Err(StatsError::DegenerateVariance);
        }
        Ok(variance)
    }

    pub fn median(&self) -> StatsResult<ExactNumber> {
        let sorted = self.sorted_relative()?;
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 1 {
            return Ok(sorted[mid].clone());
        }

        let two = ExactNumber::from_count(2, sorted[mid].precision())?;
        Ok(&(sorted[mid - 1] + sorted[mid]) / &two)
    }

    /// Returns the lower and upper tail values of the central interval
    /// holding `fraction` of the samples: positions `floor((1 - f) * n)` and
    /// `ceil(f * n)` of the sorted relative errors, clamped to the last
    /// sample.
    pub fn percentile(&self, fraction: f64) -> StatsResult<(ExactNumber, ExactNumber)> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(StatsError::InvalidPercentile(fraction));
        }
        let sorted = self.sorted_relative()?;
        let n = sorted.len();
        let last = n - 1;

        let lower = (((1.0 - fraction) * n as f64).floor() as usize).min(last);
        let upper = ((fraction * n as f64).ceil() as usize).min(last);
        Ok((sorted[lower].clone(), sorted[upper].clone()))
    }

    fn sorted_relative(&self) -> StatsResult<Vec<&ExactNumber>> {
        if self.is_empty() {
            return Err(StatsError::Empty);
        }
        let mut sorted: Vec<&ExactNumber> = self.samples.iter().map(|s| &s.relative).collect();
        sorted.sort_unstable();
        Ok(sorted)
    }
}
