mod cli;
mod config;
mod cycle;
mod error;
mod output;

use std::error::Error;

use clap::Parser;
use log::{error, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use vehicle::Engine;

use crate::cli::Cli;
use crate::error::AppError;

fn run(cli: &Cli) -> Result<(), AppError> {
    let params = cli.overrides.apply(config::load_parameters(cli.params.as_deref())?);
    config::validate(&params).map_err(AppError::Invalid)?;

    let cycle = cli.cycle.as_deref().map(cycle::read_cycle).transpose()?;
    if let Some(cycle) = &cycle {
        info!("drive cycle: {} samples", cycle.len());
    }

    let report = Engine::new(params).run(cycle.as_ref())?;
    output::log_summary(&report);

    if let Some(path) = &cli.output {
        output::write_report(path, &report)?;
        info!("report written to {}", path.display());
    }
    if let Some(path) = &cli.curves {
        output::write_curves(path, &report.performance)?;
        info!("performance curves written to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    run(&cli).map_err(|err| {
        error!("{err}");
        let mut source = err.source();
        while let Some(cause) = source {
            error!("  caused by: {cause}");
            source = cause.source();
        }
        err.into()
    })
}
