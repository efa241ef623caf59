//! Simulation configuration.

use crate::core::config::{GameConfig, PacingConfig};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Floor a run must reach to count as completed
    pub target_floor: u32,

    /// Bot actions per run before timeout
    pub max_actions_per_run: u32,

    /// Coins the bot keeps in reserve for healing when shopping
    pub heal_reserve: u32,

    /// Rules the runs are played under
    pub game: GameConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            target_floor: 50,
            max_actions_per_run: 20_000,
            heal_reserve: 40,
            game: GameConfig::headless(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking the first few blocks
    pub fn quick_check() -> Self {
        Self {
            num_runs: 100,
            target_floor: 20,
            ..Default::default()
        }
    }

    /// Long climbs to see where runs end
    pub fn deep_climb() -> Self {
        Self {
            num_runs: 200,
            target_floor: 100,
            max_actions_per_run: 100_000,
            ..Default::default()
        }
    }

    /// Same rules, more capture devices at the start
    pub fn generous_start(num_runs: u32) -> Self {
        Self {
            num_runs,
            game: GameConfig {
                pacing: PacingConfig::instant(),
                ..GameConfig::generous()
            },
            ..Default::default()
        }
    }
}
