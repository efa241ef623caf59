//! Run configuration.
//!
//! Starting resources differ between revisions of the game, so they are
//! configuration rather than constants. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use super::constants::*;
use super::error::ConfigError;

/// Tunables for a run. Deserializes from JSON with every field optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Coins at the start of a run
    pub starting_currency: u32,
    /// Capture devices at the start of a run
    pub starting_capture_devices: u32,
    /// Entries kept by the player-facing log
    pub log_capacity: usize,
    /// First floor where stage-2 creatures may appear in the wild
    pub evolved_form_min_floor: u32,
    /// Chance (0.0-1.0) that an eligible spawn uses a stage-2 template
    pub evolved_form_chance: f64,
    pub pacing: PacingConfig,
}

/// Delays between a player action and its scheduled follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub enemy_turn_ms: u64,
    pub victory_ms: u64,
    pub switch_prompt_ms: u64,
    pub game_over_ms: u64,
    pub auto_explore_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            enemy_turn_ms: ENEMY_TURN_DELAY_MS,
            victory_ms: VICTORY_DELAY_MS,
            switch_prompt_ms: SWITCH_PROMPT_DELAY_MS,
            game_over_ms: GAME_OVER_DELAY_MS,
            auto_explore_ms: AUTO_EXPLORE_DELAY_MS,
        }
    }
}

impl PacingConfig {
    /// No waiting at all; used by the simulator and tests.
    pub fn instant() -> Self {
        Self {
            enemy_turn_ms: 0,
            victory_ms: 0,
            switch_prompt_ms: 0,
            game_over_ms: 0,
            auto_explore_ms: 0,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_currency: STARTING_CURRENCY,
            starting_capture_devices: STARTING_CAPTURE_DEVICES,
            log_capacity: LOG_CAPACITY,
            evolved_form_min_floor: EVOLVED_FORM_MIN_FLOOR,
            evolved_form_chance: EVOLVED_FORM_CHANCE,
            pacing: PacingConfig::default(),
        }
    }
}

impl GameConfig {
    /// The five-device variant from the earlier ruleset.
    pub fn generous() -> Self {
        Self {
            starting_capture_devices: 5,
            ..Default::default()
        }
    }

    /// Default rules without pacing delays.
    pub fn headless() -> Self {
        Self {
            pacing: PacingConfig::instant(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.evolved_form_chance) {
            return Err(ConfigError::Invalid {
                field: "evolved_form_chance",
                reason: format!("{} is outside 0.0..=1.0", self.evolved_form_chance),
            });
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "log_capacity",
                reason: "must keep at least one entry".to_string(),
            });
        }
        if self.evolved_form_min_floor == 0 {
            return Err(ConfigError::Invalid {
                field: "evolved_form_min_floor",
                reason: "floors start at 1".to_string(),
            });
        }
        Ok(())
    }
}
