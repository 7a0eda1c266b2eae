//! Sweep the expression benchmark over orders, widths and strategies and
//! write the timings as CSV.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use log::{LevelFilter, info};

use matexpr::Strategy;
use matexpr::sweep::{SweepPlan, run_sweep, write_csv};

#[derive(Parser, Debug)]
#[command(name = "sweep", version, about = "Time the matexpr expression across a grid of settings")]
struct SweepArgs {
    /// First matrix order
    #[arg(long, default_value_t = 64)]
    order_start: usize,

    /// Last matrix order (inclusive)
    #[arg(long, default_value_t = 512)]
    order_stop: usize,

    /// Step between orders
    #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u32).range(1..))]
    order_step: u32,

    /// Smallest parallel width
    #[arg(long, default_value_t = 1)]
    threads_start: usize,

    /// Largest parallel width (inclusive); defaults to the processor count
    #[arg(long)]
    threads_stop: Option<usize>,

    /// Strategies to time; repeat the flag for several
    #[arg(long = "strategy", value_enum, default_values_t = [Strategy::Simple])]
    strategies: Vec<Strategy>,

    /// Timed runs averaged per configuration
    #[arg(long, default_value_t = 3)]
    runs: usize,

    /// Seed for the input generator
    #[arg(long)]
    seed: Option<u64>,

    /// CSV destination; stdout when omitted
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl SweepArgs {
    fn plan(&self) -> SweepPlan {
        let threads_stop = self.threads_stop.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        SweepPlan {
            orders: (self.order_start..=self.order_stop)
                .step_by(self.order_step as usize)
                .collect(),
            widths: self.threads_start..=threads_stop,
            strategies: self.strategies.clone(),
            runs: self.runs,
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("MATEXPR_LOG", "info"))
        .init();

    let args = match SweepArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &SweepArgs) -> Result<()> {
    let plan = args.plan();
    let records = run_sweep(&plan).context("sweep failed")?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            write_csv(&records, file)?;
            info!("saved {} rows to {}", records.len(), path.display());
        }
        None => write_csv(&records, io::stdout().lock())?,
    }
    Ok(())
}
