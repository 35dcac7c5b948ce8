//! Command line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rand::Rng;
use strum_macros::Display;
use thiserror::Error;

use crate::exact::DISPLAY_DIGITS;
use crate::float::WorkingFloat;
use crate::quadric;

pub const DEFAULT_TRIALS: i64 = 100_000;
pub const DEFAULT_DIMENSION: i64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Suite {
    /// Six dot product algorithms in single and double precision
    #[default]
    DotProduct,
    /// Sphere and axis aligned cylinder evaluation in single precision
    Quadric,
}

#[derive(Debug, Parser)]
#[command(name = "numeric_tester", version)]
#[command(about = "Accuracy and timing comparison of floating point accumulation algorithms")]
pub struct Cli {
    /// Number of trials
    #[arg(default_value_t = DEFAULT_TRIALS, allow_negative_numbers = true)]
    pub trials: i64,

    /// Length of the operand vectors
    #[arg(default_value_t = DEFAULT_DIMENSION, allow_negative_numbers = true)]
    pub dimension: i64,

    #[arg(long, value_enum, default_value_t = Suite::DotProduct)]
    pub suite: Suite,

    /// Operand generator seed; drawn from OS entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Binary precision of the exact reference values
    #[arg(long)]
    pub precision: Option<usize>,

    /// Fraction of samples inside the reported interval
    #[arg(long, default_value_t = 0.99)]
    pub percentile: f64,

    /// Directory receiving the CSV dumps
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Skip writing CSV dumps
    #[arg(long)]
    pub no_dump: bool,

    /// Significant decimal digits of each error in the CSV dumps
    #[arg(long, default_value_t = DISPLAY_DIGITS)]
    pub dump_digits: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Number of tests must be greater than 0")]
    NonPositiveTrials(i64),
    #[error("Vector size must be greater than 0")]
    NonPositiveDimension(i64),
    #[error("Percentile must be within [0, 1], got {0}")]
    InvalidPercentile(f64),
    #[error("Precision must be at least one bit")]
    ZeroPrecision,
    #[error("Dump digits must be greater than 0")]
    ZeroDumpDigits,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub trials: usize,
    pub dimension: usize,
    pub suite: Suite,
    pub seed: u64,
    pub precision: usize,
    pub percentile: f64,
    pub output_dir: PathBuf,
    pub dump: bool,
    pub dump_digits: usize,
    pub log_level: String,
}

impl Cli {
    pub fn into_config(self) -> ConfigResult<Config> {
        if self.trials <= 0 {
            return Err(ConfigError::NonPositiveTrials(self.trials));
        }
        if self.dimension <= 0 {
            return Err(ConfigError::NonPositiveDimension(self.dimension));
        }
        if !(0.0..=1.0).contains(&self.percentile) {
            return Err(ConfigError::InvalidPercentile(self.percentile));
        }

        if self.dump_digits == 0 {
            return Err(ConfigError::ZeroDumpDigits);
        }

        let precision = match self.precision {
            Some(0) => return Err(ConfigError::ZeroPrecision),
            Some(precision) => precision,
            None => match self.suite {
                Suite::DotProduct => f32::EXACT_PRECISION,
                Suite::Quadric => quadric::DEFAULT_PRECISION,
            },
        };

        Ok(Config {
            trials: self.trials as usize,
            dimension: self.dimension as usize,
            suite: self.suite,
            seed: self.seed.unwrap_or_else(|| rand::rng().random()),
            precision,
            percentile: self.percentile,
            output_dir: self.output_dir,
            dump: !self.no_dump,
            dump_digits: self.dump_digits,
            log_level: self.log_level,
        })
    }
}

#[cfg(test)]
mod tests;
