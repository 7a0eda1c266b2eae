//! `matexpr <order> <parallel_width> <strategy> <print>`

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use log::LevelFilter;

use matexpr::cli::{RunArgs, RunConfig};
use matexpr::driver;

fn main() -> ExitCode {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("MATEXPR_LOG", "warn"))
        .init();

    let args = match RunArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    match run(args.into()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(config: RunConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    driver::run(&config, &mut out).with_context(|| {
        format!(
            "failed to evaluate order {} with `{}`",
            config.order, config.strategy
        )
    })?;
    Ok(())
}
