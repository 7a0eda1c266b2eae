//! Command-line contract of the `matexpr` binary.
//!
//! `matexpr <order> <parallel_width> <strategy> <print>`

use clap::{ArgAction, Parser};

use crate::error::RunError;
use crate::threaded::Strategy;

/// Largest accepted matrix order.
pub const MAX_ORDER: usize = 4096;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "matexpr",
    version,
    about = "Evaluate A = B*C^3 + Tr(C)*I + C + Tr(B)*E on random square matrices and time it"
)]
pub struct RunArgs {
    /// Matrix order, 1..=4096
    #[arg(value_parser = clap::value_parser!(u32).range(1..=MAX_ORDER as i64))]
    pub order: u32,

    /// Worker threads in the shared pool, at least 1
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub parallel_width: u32,

    /// Concurrency strategy used by every kernel
    #[arg(value_enum)]
    pub strategy: Strategy,

    /// `true` prints B, C, A and the labelled time; `false` prints only the
    /// elapsed seconds. Case-insensitive.
    #[arg(required = true, action = ArgAction::Set, value_parser = parse_print_flag)]
    pub print: bool,

    /// Seed for the input generator; entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Validated settings for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub order: usize,
    pub width: usize,
    pub strategy: Strategy,
    pub print: bool,
    pub seed: Option<u64>,
}

impl RunConfig {
    pub fn new(order: usize, width: usize, strategy: Strategy, print: bool) -> Result<Self, RunError> {
        let config = Self {
            order,
            width,
            strategy,
            print,
            seed: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), RunError> {
        if self.order == 0 || self.order > MAX_ORDER {
            return Err(RunError::InvalidInput(format!(
                "incorrect matrix size {}, expected 1..={MAX_ORDER}",
                self.order
            )));
        }
        if self.width == 0 {
            return Err(RunError::InvalidInput(
                "incorrect threads count 0, expected at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        Self {
            order: args.order as usize,
            width: args.parallel_width as usize,
            strategy: args.strategy,
            print: args.print,
            seed: args.seed,
        }
    }
}

/// Accepts `true` / `false` in any letter case.
pub fn parse_print_flag(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("expected `true` or `false`, got `{s}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<RunConfig, clap::Error> {
        RunArgs::try_parse_from(std::iter::once("matexpr").chain(args.iter().copied()))
            .map(RunConfig::from)
    }

    #[test]
    fn parses_full_contract() {
        let config = parse(&["128", "4", "tasks", "TRUE"]).unwrap();
        assert_eq!(
            config,
            RunConfig {
                order: 128,
                width: 4,
                strategy: Strategy::Tasks,
                print: true,
                seed: None,
            }
        );
        assert!(!parse(&["1", "1", "simple", "false"]).unwrap().print);
        assert!(!parse(&["1", "1", "sections", "FaLsE"]).unwrap().print);
    }

    #[test]
    fn seed_flag_is_optional() {
        let config = parse(&["2", "1", "simple", "true", "--seed", "42"]).unwrap();
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn rejects_out_of_range_order() {
        assert_eq!(
            parse(&["0", "1", "simple", "true"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["5000", "1", "simple", "true"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert!(parse(&["4096", "1", "simple", "true"]).is_ok());
    }

    #[test]
    fn rejects_bad_width_strategy_and_flag() {
        assert!(parse(&["8", "0", "simple", "true"]).is_err());
        assert_eq!(
            parse(&["8", "2", "bogus", "true"]).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert!(parse(&["8", "2", "simple", "yes"]).is_err());
    }

    #[test]
    fn rejects_wrong_argument_count() {
        assert!(parse(&["8", "2", "simple"]).is_err());
        assert!(parse(&["8", "2", "simple", "true", "extra"]).is_err());
    }

    #[test]
    fn programmatic_config_is_validated() {
        assert!(RunConfig::new(0, 1, Strategy::Simple, false).is_err());
        assert!(RunConfig::new(MAX_ORDER + 1, 1, Strategy::Simple, false).is_err());
        assert!(RunConfig::new(4, 0, Strategy::Simple, false).is_err());
        let config = RunConfig::new(4, 2, Strategy::Sections, false).unwrap().with_seed(9);
        assert_eq!(config.seed, Some(9));
    }
}
