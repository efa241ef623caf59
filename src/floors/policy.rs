//! Floor number to encounter category and spawn parameters.
//!
//! Floors are grouped into blocks of ten. The block number drives levels,
//! rarity odds and shop prices; the position inside the block nudges levels
//! upward as the boss floor gets closer.

use rand::Rng;

use super::types::{FloorKind, SpawnParams};
use crate::core::config::GameConfig;
use crate::core::constants::*;
use crate::creatures::{Rarity, Stage};

pub fn classify(floor: u32) -> FloorKind {
    if floor <= 1 {
        FloorKind::GuaranteedCatch
    } else if floor % FLOORS_PER_BLOCK == 0 {
        FloorKind::Boss
    } else if floor % FLOORS_PER_BLOCK == SHOP_FLOOR_OFFSET {
        FloorKind::Shop
    } else {
        FloorKind::Exploration
    }
}

/// 1-based block index: floors 1-10 are block 1, 11-20 block 2, ...
pub fn block_of(floor: u32) -> u32 {
    floor.saturating_sub(1) / FLOORS_PER_BLOCK + 1
}

/// 0-based offset of the floor inside its block.
pub fn floors_into_block(floor: u32) -> u32 {
    let block_start = (block_of(floor) - 1) * FLOORS_PER_BLOCK + 1;
    floor.saturating_sub(block_start)
}

/// True on the first floor of every block after the first.
pub fn starts_new_block(floor: u32) -> bool {
    floor > 1 && floors_into_block(floor) == 0
}

/// Chance that an exploration floor holds a creature instead of an event.
pub fn monster_chance(floor: u32) -> f64 {
    if floors_into_block(floor) < MONSTER_HEAVY_POSITIONS {
        MONSTER_CHANCE_EARLY_BLOCK
    } else {
        MONSTER_CHANCE_LATE_BLOCK
    }
}

/// Inclusive (min, max) wild level for a floor, before any boss premium.
pub fn level_range(floor: u32) -> (u32, u32) {
    let block = block_of(floor);
    let into = floors_into_block(floor);
    let min = (2 * block + into / 3).saturating_sub(1).max(1);
    let max = 2 * block + 1 + into / 2;
    (min, max)
}

/// Rolls a wild level, skewed toward the top of the range later in a block.
pub fn roll_level(floor: u32, rng: &mut impl Rng) -> u32 {
    let (min, max) = level_range(floor);
    if max <= min {
        return min;
    }
    let bias = LEVEL_BIAS_BASE + floors_into_block(floor) as f64 * LEVEL_BIAS_PER_FLOOR;
    let r = rng.gen::<f64>().powf(1.0 - bias);
    let span = (max - min + 1) as f64;
    (min + (r * span).floor() as u32).min(max)
}

pub fn boss_premium(floor: u32) -> u32 {
    BOSS_LEVEL_PREMIUM + block_of(floor) / 2
}

/// Cumulative (common, uncommon, rare) cutoffs; legendary takes the rest.
pub fn rarity_thresholds(block: u32) -> (f64, f64, f64) {
    if block <= RARITY_EARLY_MAX_BLOCK {
        RARITY_THRESHOLDS_EARLY
    } else if block <= RARITY_MID_MAX_BLOCK {
        RARITY_THRESHOLDS_MID
    } else {
        RARITY_THRESHOLDS_LATE
    }
}

pub fn rarity_for_roll(block: u32, roll: f64) -> Rarity {
    let (common, uncommon, rare) = rarity_thresholds(block);
    if roll < common {
        Rarity::Common
    } else if roll < uncommon {
        Rarity::Uncommon
    } else if roll < rare {
        Rarity::Rare
    } else {
        Rarity::Legendary
    }
}

pub fn roll_rarity(block: u32, rng: &mut impl Rng) -> Rarity {
    rarity_for_roll(block, rng.gen::<f64>())
}

/// Stage-2 spawns unlock at a configurable floor. The caller falls back to
/// stage 1 when the rolled rarity has no stage-2 species.
pub fn roll_stage(floor: u32, config: &GameConfig, rng: &mut impl Rng) -> Stage {
    if floor >= config.evolved_form_min_floor && rng.gen::<f64>() < config.evolved_form_chance {
        Stage::Evolved
    } else {
        Stage::Base
    }
}

/// Level, rarity and stage for a wild or boss spawn on `floor`.
pub fn spawn_params(floor: u32, config: &GameConfig, rng: &mut impl Rng) -> SpawnParams {
    let mut level = roll_level(floor, rng);
    let is_boss = classify(floor) == FloorKind::Boss;
    if is_boss {
        level += boss_premium(floor);
    }
    let rarity = roll_rarity(block_of(floor), rng);
    let stage = if is_boss {
        Stage::Base
    } else {
        roll_stage(floor, config, rng)
    };
    SpawnParams {
        level,
        rarity,
        stage,
    }
}

pub fn floor_description(floor: u32) -> String {
    match classify(floor) {
        FloorKind::GuaranteedCatch => {
            format!("Floor {}: a timid creature peeks out from the entrance.", floor)
        }
        FloorKind::Boss => format!(
            "Floor {}: a powerful presence guards the stairs. Block {} boss!",
            floor,
            block_of(floor)
        ),
        FloorKind::Shop => format!("Floor {}: a travelling merchant has set up shop.", floor),
        FloorKind::Exploration => format!("Floor {}: you explore the corridors...", floor),
    }
}
