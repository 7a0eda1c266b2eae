use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

/// Concurrency scheme applied uniformly to every kernel call of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Data-parallel row split over the shared worker pool.
    Simple,
    /// Rows cut into tasks, all registered in a task group, joined at a
    /// barrier.
    Tasks,
    /// Recursive fork-join bisection of the row range into sections.
    Sections,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Simple, Strategy::Tasks, Strategy::Sections];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Simple => "simple",
            Strategy::Tasks => "tasks",
            Strategy::Sections => "sections",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| format!("<strategy> one of: `simple`, `tasks`, `sections`; got `{s}`"))
    }
}
