//! Floor layout and spawn distribution over many seeded rolls.

use monster_tower::core::{GameConfig, RunState};
use monster_tower::creatures::{Rarity, Stage};
use monster_tower::floors::{
    block_of, boss_premium, classify, level_range, roll_rarity, spawn, Encounter, FloorKind,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SAMPLES: usize = 4000;

#[test]
fn test_first_hundred_floors_layout() {
    let kinds: Vec<FloorKind> = (1..=100).map(classify).collect();
    let count = |kind: FloorKind| kinds.iter().filter(|k| **k == kind).count();

    assert_eq!(count(FloorKind::GuaranteedCatch), 1);
    assert_eq!(count(FloorKind::Boss), 10);
    assert_eq!(count(FloorKind::Shop), 10);
    assert_eq!(count(FloorKind::Exploration), 79);
    assert_eq!(classify(15), FloorKind::Shop);
    assert_eq!(classify(30), FloorKind::Boss);
}

#[test]
fn test_exploration_floor_creature_share() {
    let config = GameConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut creatures = 0;
    for _ in 0..SAMPLES {
        let mut state = RunState::new(&config);
        state.floor = 2;
        if spawn(&mut state, &config, &mut rng).unwrap().wild().is_some() {
            creatures += 1;
        }
    }
    let share = creatures as f64 / SAMPLES as f64;
    assert!((share - 0.8).abs() < 0.04, "creature share {}", share);
}

#[test]
fn test_early_blocks_are_mostly_common() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let commons = (0..SAMPLES)
        .filter(|_| roll_rarity(1, &mut rng) == Rarity::Common)
        .count();
    let share = commons as f64 / SAMPLES as f64;
    assert!((share - 0.7).abs() < 0.04, "common share {}", share);

    let legendaries = (0..SAMPLES)
        .filter(|_| roll_rarity(6, &mut rng) == Rarity::Legendary)
        .count();
    let share = legendaries as f64 / SAMPLES as f64;
    assert!((share - 0.2).abs() < 0.04, "legendary share {}", share);
}

#[test]
fn test_spawned_levels_stay_in_range() {
    let config = GameConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    for floor in [2, 7, 13, 29, 44] {
        let (min, max) = level_range(floor);
        for _ in 0..200 {
            let mut state = RunState::new(&config);
            state.floor = floor;
            if let Encounter::Wild(wild) = spawn(&mut state, &config, &mut rng).unwrap() {
                let level = wild.creature.level;
                assert!(level >= min && level <= max, "floor {} level {}", floor, level);
            }
        }
    }
}

#[test]
fn test_bosses_are_base_forms_above_range() {
    let config = GameConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    for floor in [10, 20, 50] {
        let (min, max) = level_range(floor);
        let premium = boss_premium(floor);
        for _ in 0..100 {
            let mut state = RunState::new(&config);
            state.floor = floor;
            let encounter = spawn(&mut state, &config, &mut rng).unwrap();
            assert!(encounter.is_mandatory_boss());
            let boss = &encounter.wild().unwrap().creature;
            assert_eq!(boss.stage(), Stage::Base);
            assert!(boss.level >= min + premium, "boss level {}", boss.level);
            assert!(boss.level <= max + premium);
            assert_eq!(state.battles_this_block, 1);
        }
    }
}

#[test]
fn test_evolved_forms_only_from_floor_twenty() {
    let config = GameConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut evolved_late = 0;
    for _ in 0..SAMPLES / 4 {
        let mut early = RunState::new(&config);
        early.floor = 12;
        if let Some(wild) = spawn(&mut early, &config, &mut rng).unwrap().wild() {
            assert_eq!(wild.creature.stage(), Stage::Base);
        }
        let mut late = RunState::new(&config);
        late.floor = 22;
        if let Some(wild) = spawn(&mut late, &config, &mut rng).unwrap().wild() {
            if wild.creature.stage() == Stage::Evolved {
                evolved_late += 1;
            }
        }
    }
    assert!(evolved_late > 0);
    assert_eq!(block_of(22), 3);
}
