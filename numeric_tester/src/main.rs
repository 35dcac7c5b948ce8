use anyhow::Result;
use clap::Parser;

use numeric_tester::config::Cli;
use numeric_tester::runner;

fn main() -> Result<()> {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(-1);
        }
    };

    common::log_setup::setup_logging(&config.log_level)?;

    let stdout = std::io::stdout();
    runner::run(&config, &mut stdout.lock())?;
    Ok(())
}
