//! Game balance simulator for Monte Carlo analysis.
//!
//! Runs many characters through real `GameSession`s on auto-combat to see
//! how fast the realm ladder is climbed and where players die.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, RunStats};
