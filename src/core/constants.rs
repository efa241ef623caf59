// Floor layout
pub const FLOORS_PER_BLOCK: u32 = 10;
pub const SHOP_FLOOR_OFFSET: u32 = 5;
pub const MONSTER_HEAVY_POSITIONS: u32 = 7;
pub const MONSTER_CHANCE_EARLY_BLOCK: f64 = 0.8;
pub const MONSTER_CHANCE_LATE_BLOCK: f64 = 0.6;

// Creature growth law, applied per level above 1
pub const HP_GROWTH_PER_LEVEL: f64 = 0.1;
pub const ATTACK_GROWTH_PER_LEVEL: f64 = 0.15;
pub const DEFENSE_GROWTH_PER_LEVEL: f64 = 0.1;
pub const EXP_VALUE_GROWTH_PER_LEVEL: f64 = 0.2;
pub const CATCH_RATE_DROP_PER_LEVEL: u32 = 2;
pub const MIN_WILD_CATCH_RATE: u32 = 5;

// Experience curve: exp_to_next = floor(EXP_CURVE_BASE * EXP_CURVE_GROWTH^(level-1))
pub const EXP_CURVE_BASE: f64 = 50.0;
pub const EXP_CURVE_GROWTH: f64 = 1.2;

// Spawn levels
pub const GUARANTEED_CATCH_MAX_LEVEL: u32 = 2;
pub const BOSS_LEVEL_PREMIUM: u32 = 2;
pub const LEVEL_BIAS_BASE: f64 = 0.5;
pub const LEVEL_BIAS_PER_FLOOR: f64 = 0.05;

// Rarity thresholds (cumulative): (common, uncommon, rare); legendary is the remainder
pub const RARITY_THRESHOLDS_EARLY: (f64, f64, f64) = (0.70, 0.95, 1.0);
pub const RARITY_THRESHOLDS_MID: (f64, f64, f64) = (0.40, 0.70, 0.95);
pub const RARITY_THRESHOLDS_LATE: (f64, f64, f64) = (0.30, 0.50, 0.80);
pub const RARITY_EARLY_MAX_BLOCK: u32 = 2;
pub const RARITY_MID_MAX_BLOCK: u32 = 4;

// Evolved (stage 2) wild spawns
pub const EVOLVED_FORM_MIN_FLOOR: u32 = 20;
pub const EVOLVED_FORM_CHANCE: f64 = 0.3;

// Capture
pub const GUARANTEED_CATCH_RATE: u32 = 100;
pub const DUPLICATE_LINE_PENALTY: u32 = 8;
pub const MIN_CATCH_CHANCE: u32 = 10;
pub const MAX_CATCH_CHANCE: u32 = 95;
pub const CATCH_REWARD_MULTIPLIER: f64 = 0.5;
pub const BASE_FLEE_CHANCE: f64 = 0.4;
pub const FLEE_CHANCE_PER_FAILURE: f64 = 0.2;
pub const MAX_FLEE_CHANCE: f64 = 0.9;

// Merging duplicates
pub const MERGE_PENALTY_PER_LEVEL: f64 = 0.3;
pub const MIN_MERGE_PENALTY: f64 = 0.1;

// Battle
pub const LEVEL_MODIFIER_PER_LEVEL: f64 = 0.1;
pub const LEVEL_MODIFIER_MAX: f64 = 1.5;
pub const PLAYER_LEVEL_MODIFIER_MIN: f64 = 0.5;
pub const ENEMY_LEVEL_MODIFIER_MIN: f64 = 0.25;
pub const DAMAGE_FACTOR_MIN: f64 = 0.8;
pub const DAMAGE_FACTOR_SPREAD: f64 = 0.4;
pub const VICTORY_CURRENCY_MULTIPLIER: f64 = 1.2;
pub const DEFEATED_CATCH_RATE_BONUS: u32 = 25;
pub const DEFEATED_CATCH_RATE_CAP: u32 = 90;

// Shop prices: base + step * (block - 1)
pub const DEVICE_PRICE_BASE: u32 = 25;
pub const DEVICE_PRICE_STEP: u32 = 25;
pub const HEAL_PRICE_BASE: u32 = 50;
pub const HEAL_PRICE_STEP: u32 = 50;

// Flavor events
pub const EVENT_HEAL_WEIGHT: f64 = 0.25;
pub const EVENT_CURRENCY_WEIGHT: f64 = 0.30;
pub const EVENT_DEVICE_WEIGHT: f64 = 0.20;
pub const EVENT_CURRENCY_BASE: u32 = 15;
pub const EVENT_CURRENCY_PER_BLOCK: u32 = 10;
pub const EVENT_DEVICE_GAIN: u32 = 1;

// Run defaults
pub const STARTING_CURRENCY: u32 = 100;
pub const STARTING_CAPTURE_DEVICES: u32 = 3;
pub const LOG_CAPACITY: usize = 50;

// Pacing delays (milliseconds)
pub const ENEMY_TURN_DELAY_MS: u64 = 1500;
pub const VICTORY_DELAY_MS: u64 = 500;
pub const SWITCH_PROMPT_DELAY_MS: u64 = 1000;
pub const GAME_OVER_DELAY_MS: u64 = 1000;
pub const AUTO_EXPLORE_DELAY_MS: u64 = 500;
