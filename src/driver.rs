//! Execution driver: seed the inputs, time one evaluation, report it.

use std::io::Write;
use std::time::{Duration, Instant};

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cli::RunConfig;
use crate::error::RunError;
use crate::expression::evaluate;
use crate::matrix::Matrix;
use crate::threaded::Executor;

/// Inputs, result and timing of one run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub b: Matrix,
    pub c: Matrix,
    pub a: Matrix,
    pub elapsed: Duration,
}

/// Builds the generator for a run: fixed seed when given, entropy otherwise.
pub fn input_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Seeds `B` and `C`. Printed runs get small integers in `[1, order]` so the
/// result can be checked by hand; timing runs get uniform doubles.
pub fn seed_inputs(order: usize, print: bool, rng: &mut StdRng) -> (Matrix, Matrix) {
    let mut b = Matrix::zeros(order);
    let mut c = Matrix::zeros(order);
    if print {
        b.randomize_bounded_int(rng);
        c.randomize_bounded_int(rng);
    } else {
        b.randomize_uniform(rng);
        c.randomize_uniform(rng);
    }
    (b, c)
}

/// Starts the pool, seeds the inputs and times a single evaluation.
///
/// Pool start-up and seeding happen before the clock starts.
pub fn execute(config: &RunConfig) -> Result<RunReport, RunError> {
    config.validate()?;
    let exec = Executor::new(config.strategy, config.width)?;
    let mut rng = input_rng(config.seed);
    let (b, c) = seed_inputs(config.order, config.print, &mut rng);

    let started = Instant::now();
    let a = evaluate(&exec, &b, &c)?;
    let elapsed = started.elapsed();

    info!(
        "order={} width={} strategy={} elapsed={:.6}s",
        config.order,
        config.width,
        config.strategy,
        elapsed.as_secs_f64()
    );
    Ok(RunReport { b, c, a, elapsed })
}

/// Writes the report: labelled matrices and time when `print` is set,
/// otherwise only the elapsed seconds.
pub fn render<W: Write + ?Sized>(report: &RunReport, print: bool, out: &mut W) -> Result<(), RunError> {
    let seconds = report.elapsed.as_secs_f64();
    if print {
        writeln!(out, "Elements of the matrix B:")?;
        report.b.write_to(out)?;
        writeln!(out, "Elements of the matrix C:")?;
        report.c.write_to(out)?;
        writeln!(out, "Elements of the matrix A:")?;
        report.a.write_to(out)?;
        writeln!(out, "The time spent on the calculation: {seconds}")?;
    } else {
        writeln!(out, "{seconds}")?;
    }
    out.flush()?;
    Ok(())
}

/// [`execute`] followed by [`render`].
pub fn run<W: Write + ?Sized>(config: &RunConfig, out: &mut W) -> Result<RunReport, RunError> {
    let report = execute(config)?;
    render(&report, config.print, out)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threaded::Strategy;

    #[test]
    fn printed_runs_use_bounded_integers() {
        let mut rng = input_rng(Some(3));
        let (b, c) = seed_inputs(5, true, &mut rng);
        for v in b.as_slice().iter().chain(c.as_slice()) {
            assert_eq!(v.fract(), 0.0);
            assert!((1.0..=5.0).contains(v));
        }
    }

    #[test]
    fn same_seed_same_inputs() {
        let (b1, c1) = seed_inputs(4, false, &mut input_rng(Some(11)));
        let (b2, c2) = seed_inputs(4, false, &mut input_rng(Some(11)));
        assert_eq!(b1, b2);
        assert_eq!(c1, c2);
        assert_ne!(b1, c1);
    }

    #[test]
    fn timing_mode_prints_a_single_token() {
        let config = RunConfig::new(8, 2, Strategy::Tasks, false).unwrap().with_seed(1);
        let mut out = Vec::new();
        run(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let tokens: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].parse::<f64>().unwrap() >= 0.0);
    }

    #[test]
    fn print_mode_labels_every_section() {
        let config = RunConfig::new(3, 1, Strategy::Simple, true).unwrap().with_seed(5);
        let mut out = Vec::new();
        let report = run(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        for label in [
            "Elements of the matrix B:",
            "Elements of the matrix C:",
            "Elements of the matrix A:",
            "The time spent on the calculation: ",
        ] {
            assert!(text.contains(label), "missing {label:?}");
        }
        assert!(text.contains(&report.a.to_string()));
        assert_eq!(text.lines().count(), 4 * 3 + 1);
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let config = RunConfig {
            order: 0,
            width: 1,
            strategy: Strategy::Simple,
            print: false,
            seed: None,
        };
        let mut out = Vec::new();
        assert!(matches!(run(&config, &mut out), Err(RunError::InvalidInput(_))));
        assert!(out.is_empty());
    }
}
