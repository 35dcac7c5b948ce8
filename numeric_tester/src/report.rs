//! Text report and CSV dump of one algorithm's measurements.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use tracing::debug;

use crate::exact::ExactNumber;
use crate::stats::{ErrorStatistics, StatsResult};

/// Read-only view of one finished test.
#[derive(Clone, Copy, Debug)]
pub struct TestSummary<'a> {
    pub name: &'a str,
    pub run_time: Duration,
    pub stats: &'a ErrorStatistics,
    pub excluded: u64,
}

/// `seconds.nanoseconds` with the nanoseconds zero padded to nine digits.
pub fn format_run_time(run_time: Duration) -> String {
    format!("{}.{:09}", run_time.as_secs(), run_time.subsec_nanos())
}

fn write_stat(
    out: &mut impl Write,
    label: &str,
    value: StatsResult<impl Display>,
) -> std::io::Result<()> {
    match value {
        Ok(value) => writeln!(out, "{label}: {value}"),
        Err(err) => writeln!(out, "{label}: {err}"),
    }
}

/// Decimal digits of the reference the estimates get right on average,
/// `-log10(mean relative error)`.
fn correct_digits(stats: &ErrorStatistics) -> StatsResult<String> {
    let mean = stats.mean()?;
    if mean.is_zero() {
        return Ok("exact".to_string());
    }
    let ten = ExactNumber::from_count(10, mean.precision())?;
    let digits = -(&mean.ln() / &ten.ln());
    Ok(format!("{:.2}", digits.to_f64()))
}

/// Human readable summary. A statistic that cannot be computed is replaced
/// by its error message; the rest of the report is still written.
pub fn write_report(
    out: &mut impl Write,
    summary: &TestSummary<'_>,
    percentile: f64,
) -> std::io::Result<()> {
    let stats = summary.stats;

    writeln!(out, "{}", summary.name)?;
    writeln!(out, "Running Time: {}", format_run_time(summary.run_time))?;
    write_stat(out, "Average", stats.mean())?;
    write_stat(out, "Variance", stats.variance())?;
    write_stat(out, "Skew", stats.skewness())?;
    write_stat(out, "Kurtosis", stats.kurtosis())?;
    write_stat(out, "Minimum", stats.min())?;
    write_stat(out, "Maximum", stats.max())?;
    write_stat(out, "Median", stats.median())?;
    write_stat(
        out,
        &format!("{:.2}% Interval", percentile * 100.0),
        stats
            .percentile(percentile)
            .map(|(lower, upper)| format!("({lower}, {upper})")),
    )?;
    write_stat(out, "Correct Digits", correct_digits(stats))?;
    writeln!(out, "Recorded Trials: {}", stats.count())?;
    writeln!(out, "Excluded Trials: {}", summary.excluded)?;
    writeln!(out)
}

/// Summary block followed by one `absolute, relative` line per recorded
/// trial, in trial order, each error rounded to `digits` significant
/// decimal digits.
pub fn write_dump(
    out: &mut impl Write,
    summary: &TestSummary<'_>,
    percentile: f64,
    digits: usize,
) -> std::io::Result<()> {
    write_report(out, summary, percentile)?;
    writeln!(out, "Absolute Error, Relative Error")?;
    for sample in summary.stats.samples() {
        writeln!(
            out,
            "{}, {}",
            sample.absolute.to_decimal_string(digits),
            sample.relative.to_decimal_string(digits)
        )?;
    }
    Ok(())
}

/// `<name><label>.csv`; the label tells apart suites that reuse algorithm
/// names.
pub fn dump_file_name(name: &str, label: &str) -> String {
    format!("{name}{label}.csv")
}

pub fn dump_to_file(
    dir: &Path,
    label: &str,
    summary: &TestSummary<'_>,
    percentile: f64,
    digits: usize,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(dump_file_name(summary.name, label));
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_dump(&mut writer, summary, percentile, digits)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(path = %path.display(), samples = summary.stats.count(), "Dump written");
    Ok(path)
}
