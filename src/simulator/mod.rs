//! Balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of headless runs with a simple bot to see:
//! - How high runs climb before the roster is wiped
//! - How many species a run collects
//! - How often bosses stop a run cold
//!
//! The bot drives the real `Game` controller, so results match what a player
//! would get from the same choices.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunEnding, RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
