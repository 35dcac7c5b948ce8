//! Runs the configured suite and writes its reports.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use strum::IntoEnumIterator;
use tracing::info;

use crate::config::{Config, Suite};
use crate::generator::OperandGenerator;
use crate::quadric::{QuadricShape, DIMENSION};
use crate::report::{self, TestSummary};
use crate::suite::{DotProductSuite, QuadricSuite};

/// Runs every trial of the configured suite, writes the reports to `out`
/// and returns the paths of the dump files written.
pub fn run(config: &Config, out: &mut impl Write) -> anyhow::Result<Vec<PathBuf>> {
    info!(
        suite = %config.suite,
        trials = config.trials,
        dimension = config.dimension,
        seed = config.seed,
        precision = config.precision,
        "Starting run"
    );
    let mut generator = OperandGenerator::from_seed(config.seed);
    let mut written = Vec::new();

    match config.suite {
        Suite::DotProduct => {
            let mut suite = DotProductSuite::new();
            suite.run(
                &mut generator,
                config.trials,
                config.dimension,
                config.precision,
            )?;
            written.extend(publish(config, out, "", &suite.summaries())?);
        }
        Suite::Quadric => {
            if config.dimension != DIMENSION {
                info!(
                    dimension = DIMENSION,
                    "Quadric cases are three dimensional; ignoring requested dimension"
                );
            }
            for shape in QuadricShape::iter() {
                let mut suite = QuadricSuite::new(shape);
                suite.run(&mut generator, config.trials, config.precision)?;

                let label = shape.to_string();
                writeln!(out, "{label}").context("Failed to write report")?;
                written.extend(publish(config, out, &label, &suite.summaries())?);
            }
        }
    }

    out.flush().context("Failed to flush report")?;
    info!(files = written.len(), "Run finished");
    Ok(written)
}

fn publish(
    config: &Config,
    out: &mut impl Write,
    label: &str,
    summaries: &[TestSummary<'_>],
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for summary in summaries {
        report::write_report(out, summary, config.percentile).context("Failed to write report")?;
        if config.dump {
            let path = report::dump_to_file(
                &config.output_dir,
                label,
                summary,
                config.percentile,
                config.dump_digits,
            )?;
            info!(path = %path.display(), "Wrote dump");
            written.push(path);
        }
    }
    Ok(written)
}
