//! Benchmark sweep over orders, widths and strategies.
//!
//! Each configuration is timed `runs` times on fresh uniform inputs. The
//! mean, population variance and speedup relative to the first width of the
//! same (strategy, order) pair are recorded and written as CSV.

use std::io::Write;
use std::ops::RangeInclusive;
use std::time::Instant;

use log::{debug, info};
use serde::Serialize;

use crate::cli::MAX_ORDER;
use crate::driver::{input_rng, seed_inputs};
use crate::error::RunError;
use crate::expression::evaluate;
use crate::threaded::{Executor, Strategy};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepPlan {
    pub orders: Vec<usize>,
    pub widths: RangeInclusive<usize>,
    pub strategies: Vec<Strategy>,
    pub runs: usize,
    pub seed: Option<u64>,
}

impl SweepPlan {
    pub fn validate(&self) -> Result<(), RunError> {
        if self.orders.is_empty() || self.strategies.is_empty() {
            return Err(RunError::InvalidInput(
                "sweep needs at least one order and one strategy".to_string(),
            ));
        }
        if let Some(&bad) = self.orders.iter().find(|&&o| o == 0 || o > MAX_ORDER) {
            return Err(RunError::InvalidInput(format!(
                "incorrect matrix size {bad}, expected 1..={MAX_ORDER}"
            )));
        }
        if *self.widths.start() == 0 || self.widths.is_empty() {
            return Err(RunError::InvalidInput(format!(
                "incorrect threads range {}..={}",
                self.widths.start(),
                self.widths.end()
            )));
        }
        if self.runs == 0 {
            return Err(RunError::InvalidInput("runs must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// One CSV row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SweepRecord {
    pub order: usize,
    pub width: usize,
    pub strategy: Strategy,
    pub mean_seconds: f64,
    pub variance: f64,
    pub speedup: f64,
}

/// Mean and population variance; `None` for an empty sample.
pub fn mean_and_variance(samples: &[f64]) -> Option<(f64, f64)> {
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance))
}

/// Runs every configuration of the plan.
///
/// A fresh pool is started per width; it is never resized while a
/// configuration is being timed.
pub fn run_sweep(plan: &SweepPlan) -> Result<Vec<SweepRecord>, RunError> {
    plan.validate()?;
    let mut rng = input_rng(plan.seed);
    let mut records = Vec::new();

    for &strategy in &plan.strategies {
        for &order in &plan.orders {
            let mut baseline = None;
            for width in plan.widths.clone() {
                let exec = Executor::new(strategy, width)?;
                let mut samples = Vec::with_capacity(plan.runs);
                for _ in 0..plan.runs {
                    let (b, c) = seed_inputs(order, false, &mut rng);
                    let started = Instant::now();
                    evaluate(&exec, &b, &c)?;
                    samples.push(started.elapsed().as_secs_f64());
                }
                let Some((mean, variance)) = mean_and_variance(&samples) else {
                    continue;
                };
                let base = *baseline.get_or_insert(mean);
                let speedup = if mean > 0.0 { base / mean } else { 1.0 };
                debug!("order={order} width={width} strategy={strategy} mean={mean:.6}s");
                records.push(SweepRecord {
                    order,
                    width,
                    strategy,
                    mean_seconds: mean,
                    variance,
                    speedup,
                });
            }
        }
        info!("finished strategy `{strategy}`");
    }
    Ok(records)
}

pub fn write_csv<W: Write>(records: &[SweepRecord], out: W) -> Result<(), RunError> {
    let mut writer = csv::Writer::from_writer(out);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
