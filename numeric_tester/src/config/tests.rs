use clap::Parser;

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("numeric_tester").chain(args.iter().copied())).unwrap()
}

#[test]
fn defaults() {
    let config = parse(&["--seed", "9"]).into_config().unwrap();
    assert_eq!(config.trials, 100_000);
    assert_eq!(config.dimension, 4);
    assert_eq!(config.suite, Suite::DotProduct);
    assert_eq!(config.seed, 9);
    assert_eq!(config.precision, f32::EXACT_PRECISION);
    assert_eq!(config.percentile, 0.99);
    assert_eq!(config.output_dir, PathBuf::from("."));
    assert!(config.dump);
    assert_eq!(config.dump_digits, 24);
    assert_eq!(config.log_level, "info");
}

#[test]
fn positional_arguments() {
    let config = parse(&["250", "7"]).into_config().unwrap();
    assert_eq!(config.trials, 250);
    assert_eq!(config.dimension, 7);
}

#[test]
fn non_positive_counts_are_rejected() {
    assert_eq!(
        parse(&["0"]).into_config(),
        Err(ConfigError::NonPositiveTrials(0))
    );
    assert_eq!(
        parse(&["10", "-3"]).into_config(),
        Err(ConfigError::NonPositiveDimension(-3))
    );
    assert_eq!(
        ConfigError::NonPositiveTrials(-1).to_string(),
        "Number of tests must be greater than 0"
    );
    assert_eq!(
        ConfigError::NonPositiveDimension(0).to_string(),
        "Vector size must be greater than 0"
    );
}

#[test]
fn quadric_suite_uses_narrow_precision() {
    let config = parse(&["--suite", "quadric"]).into_config().unwrap();
    assert_eq!(config.suite, Suite::Quadric);
    assert_eq!(config.precision, quadric::DEFAULT_PRECISION);
    assert_eq!(config.suite.to_string(), "quadric");
    assert_eq!(Suite::DotProduct.to_string(), "dot-product");
}

#[test]
fn explicit_options() {
    let config = parse(&[
        "--precision",
        "512",
        "--percentile",
        "0.9",
        "--output-dir",
        "out",
        "--no-dump",
        "--dump-digits",
        "60",
        "--log-level",
        "debug",
    ])
    .into_config()
    .unwrap();
    assert_eq!(config.precision, 512);
    assert_eq!(config.percentile, 0.9);
    assert_eq!(config.output_dir, PathBuf::from("out"));
    assert!(!config.dump);
    assert_eq!(config.dump_digits, 60);
    assert_eq!(config.log_level, "debug");
}

#[test]
fn invalid_options_are_rejected() {
    assert_eq!(
        parse(&["--percentile", "1.5"]).into_config(),
        Err(ConfigError::InvalidPercentile(1.5))
    );
    assert_eq!(
        parse(&["--precision", "0"]).into_config(),
        Err(ConfigError::ZeroPrecision)
    );
    assert_eq!(
        parse(&["--dump-digits", "0"]).into_config(),
        Err(ConfigError::ZeroDumpDigits)
    );
}
