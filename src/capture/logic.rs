//! Catch probability, catch attempts and duplicate merging.

use rand::Rng;
use tracing::{debug, info};

use super::types::{CatchOutcome, Placement};
use crate::core::constants::*;
use crate::core::error::GameError;
use crate::core::game_state::RunState;
use crate::creatures::{can_evolve, evolve, grant_experience, instantiate_owned, Creature, Roster};

/// Catch chance in percent.
///
/// The guaranteed encounter is always 100. Otherwise each roster member of
/// the same evolution line costs a flat penalty, clamped to 10..=95.
pub fn catch_chance(target: &Creature, guaranteed: bool, roster: &Roster) -> u32 {
    if guaranteed {
        return GUARANTEED_CATCH_RATE;
    }
    let penalty = DUPLICATE_LINE_PENALTY * roster.count_in_line(target.line()) as u32;
    target
        .catch_rate
        .saturating_sub(penalty)
        .clamp(MIN_CATCH_CHANCE, MAX_CATCH_CHANCE)
}

/// Penalty applied when a higher-level member absorbs a weaker duplicate.
pub fn merge_penalty(existing_level: u32, caught_level: u32) -> f64 {
    if existing_level > caught_level {
        let gap = (existing_level - caught_level) as f64;
        (1.0 - MERGE_PENALTY_PER_LEVEL * gap).max(MIN_MERGE_PENALTY)
    } else {
        1.0
    }
}

/// Experience a duplicate is worth when merged into an existing member.
pub fn merge_exp(exp_value: u32, caught_level: u32, existing_level: u32) -> u32 {
    let penalty = merge_penalty(existing_level, caught_level);
    (exp_value as f64 * caught_level as f64 * penalty).floor() as u32
}

/// Chance the creature runs off after the `failed`th missed throw.
pub fn flee_chance(failed: u32) -> f64 {
    let extra = failed.saturating_sub(1) as f64 * FLEE_CHANCE_PER_FAILURE;
    (BASE_FLEE_CHANCE + extra).min(MAX_FLEE_CHANCE)
}

pub fn catch_reward(creature: &Creature, defeated_in_battle: bool) -> u32 {
    if defeated_in_battle {
        0
    } else {
        (creature.exp_value as f64 * CATCH_REWARD_MULTIPLIER).floor() as u32
    }
}

/// Places a caught creature: merge into the first member of its line, or
/// join the roster as a new member.
fn place_caught(state: &mut RunState, caught: &Creature, captured_at: i64) -> Placement {
    if let Some(index) = state.roster.first_in_line(caught.line()) {
        if let Some(existing) = state.roster.get_mut(index) {
            let exp = merge_exp(caught.exp_value, caught.level, existing.level);
            let report = grant_experience(existing, exp);
            if let Some(evolution) = &report.evolution {
                state.capture_history.insert(evolution.to.name.to_string());
            }
            debug!(index, exp, "merged duplicate into roster member");
            return Placement::Merged { index, exp, report };
        }
    }

    let mut owned = instantiate_owned(caught, captured_at);
    let evolution = if can_evolve(&owned) {
        evolve(&mut owned)
    } else {
        None
    };
    if let Some(evolution) = &evolution {
        state.capture_history.insert(evolution.to.name.to_string());
    }
    let index = state.roster.push(owned);
    Placement::Added { index, evolution }
}

/// Throws one capture device at the current creature encounter.
pub fn attempt_catch(
    state: &mut RunState,
    captured_at: i64,
    rng: &mut impl Rng,
) -> Result<CatchOutcome, GameError> {
    let encounter = state.encounter.as_ref().ok_or(GameError::NoCreatureEncounter)?;
    let guaranteed = encounter.is_guaranteed();
    let is_boss = encounter.is_boss();
    let wild = encounter.wild().ok_or(GameError::NoCreatureEncounter)?;
    if is_boss && !wild.defeated_in_battle {
        return Err(GameError::CaptureLocked);
    }
    if state.capture_devices == 0 {
        return Err(GameError::NoCaptureDevices);
    }

    let chance = catch_chance(&wild.creature, guaranteed, &state.roster);
    let defeated = wild.defeated_in_battle;
    let species = wild.creature.name();
    state.capture_devices -= 1;

    let roll = rng.gen::<f64>() * 100.0;
    debug!(species, chance, roll, "catch roll");

    if roll < chance as f64 {
        let caught = match state.encounter.take().as_ref().and_then(|e| e.wild()) {
            Some(wild) => wild.creature.clone(),
            None => return Err(GameError::NoCreatureEncounter),
        };
        let reward = catch_reward(&caught, defeated);
        state.currency += reward;
        state.capture_history.insert(caught.name().to_string());
        let placement = place_caught(state, &caught, captured_at);
        info!(species, level = caught.level, reward, "caught creature");
        return Ok(CatchOutcome::Caught {
            species,
            level: caught.level,
            chance,
            reward,
            placement,
        });
    }

    let failed = match state.encounter.as_mut().and_then(|e| e.wild_mut()) {
        Some(wild) => {
            wild.failed_catches += 1;
            wild.failed_catches
        }
        None => 0,
    };
    let fled = is_boss || rng.gen::<f64>() < flee_chance(failed);
    if fled {
        state.encounter = None;
        info!(species, failed, "creature fled after missed catch");
    }
    Ok(CatchOutcome::Missed {
        species,
        chance,
        fled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::creatures::{instantiate_wild, lookup, Stage};
    use crate::floors::{Encounter, WildEncounter};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn wild(name: &str, level: u32) -> Creature {
        instantiate_wild(lookup(name).unwrap(), level)
    }

    fn owned(name: &str, level: u32) -> Creature {
        instantiate_owned(&wild(name, level), 0)
    }

    fn state_facing(encounter: Encounter) -> RunState {
        let mut state = RunState::new(&GameConfig::default());
        state.encounter = Some(encounter);
        state
    }

    #[test]
    fn test_guaranteed_chance_is_exactly_100() {
        let mut roster = Roster::new();
        roster.push(owned("Emberling", 2));
        roster.push(owned("Emberling", 2));
        let target = wild("Emberling", 1);
        assert_eq!(catch_chance(&target, true, &roster), 100);
    }

    #[test]
    fn test_chance_bounds_and_duplicate_penalty() {
        let mut roster = Roster::new();
        let target = wild("Dropling", 1);
        let mut last = catch_chance(&target, false, &roster);
        assert_eq!(last, 75);
        for _ in 0..12 {
            roster.push(owned("Tidalwave", 12));
            let next = catch_chance(&target, false, &roster);
            assert!(next <= last);
            assert!((10..=95).contains(&next));
            last = next;
        }
        assert_eq!(last, 10);

        let mut easy = wild("Dropling", 1);
        easy.catch_rate = 99;
        assert_eq!(catch_chance(&easy, false, &Roster::new()), 95);
    }

    #[test]
    fn test_merge_exp_penalized_for_weaker_catch() {
        // existing L10 absorbing caught L5 worth 30 exp: 30 * 5 * 0.1
        assert_eq!(merge_exp(30, 5, 10), 15);
        assert_eq!(merge_exp(30, 5, 6), 105);
        assert_eq!(merge_exp(30, 5, 3), 150);
    }

    #[test]
    fn test_flee_chance_curve() {
        assert!((flee_chance(1) - 0.4).abs() < 1e-9);
        assert!((flee_chance(2) - 0.6).abs() < 1e-9);
        assert!((flee_chance(3) - 0.8).abs() < 1e-9);
        assert!((flee_chance(4) - 0.9).abs() < 1e-9);
        assert!((flee_chance(10) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_guaranteed_catch_succeeds() {
        let mut state = state_facing(Encounter::GuaranteedCatch(WildEncounter::new({
            let mut c = wild("Sproutling", 1);
            c.catch_rate = 100;
            c
        })));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = attempt_catch(&mut state, 42, &mut rng).unwrap();
        assert!(outcome.is_caught());
        assert_eq!(state.roster.len(), 1);
        assert_eq!(state.capture_devices, 2);
        assert_eq!(state.currency, 100 + 15);
        assert!(state.encounter.is_none());
        assert!(state.capture_history.contains("Sproutling"));
        assert_eq!(state.roster.get(0).unwrap().captured_at, Some(42));
    }

    #[test]
    fn test_catch_merges_into_same_line() {
        let mut state = state_facing(Encounter::Wild(WildEncounter::new(wild("Emberling", 5))));
        state.roster.push(owned("Emberling", 10));
        let mut rng = StepRng::new(0, 0);
        let outcome = attempt_catch(&mut state, 0, &mut rng).unwrap();
        match outcome {
            CatchOutcome::Caught {
                placement: Placement::Merged { index, exp, .. },
                ..
            } => {
                assert_eq!(index, 0);
                // exp value of a level 5 Emberling is 30 + floor(4 * 6) = 54
                assert_eq!(exp, merge_exp(54, 5, 10));
            }
            other => panic!("expected merge, got {:?}", other),
        }
        assert_eq!(state.roster.len(), 1);
    }

    #[test]
    fn test_defeated_catch_pays_nothing() {
        let mut encounter = WildEncounter::new(wild("Dropling", 2));
        encounter.defeated_in_battle = true;
        let mut state = state_facing(Encounter::Wild(encounter));
        let mut rng = StepRng::new(0, 0);
        match attempt_catch(&mut state, 0, &mut rng).unwrap() {
            CatchOutcome::Caught { reward, .. } => assert_eq!(reward, 0),
            other => panic!("expected catch, got {:?}", other),
        }
        assert_eq!(state.currency, 100);
    }

    #[test]
    fn test_high_level_catch_evolves_on_arrival() {
        let mut state = state_facing(Encounter::Wild(WildEncounter::new(wild("Emberling", 11))));
        let mut rng = StepRng::new(0, 0);
        match attempt_catch(&mut state, 0, &mut rng).unwrap() {
            CatchOutcome::Caught {
                placement: Placement::Added { evolution, .. },
                ..
            } => assert!(evolution.is_some()),
            other => panic!("expected new member, got {:?}", other),
        }
        assert_eq!(state.roster.get(0).unwrap().stage(), Stage::Evolved);
        assert!(state.capture_history.contains("Emberling"));
        assert!(state.capture_history.contains("Infernal"));
    }

    #[test]
    fn test_undefeated_boss_is_locked() {
        let mut state = state_facing(Encounter::Boss {
            encounter: WildEncounter::new(wild("Pebblit", 5)),
            mandatory: true,
        });
        let mut rng = StepRng::new(0, 0);
        assert_eq!(
            attempt_catch(&mut state, 0, &mut rng),
            Err(GameError::CaptureLocked)
        );
        assert_eq!(state.capture_devices, 3);
    }

    #[test]
    fn test_no_devices() {
        let mut state = state_facing(Encounter::Wild(WildEncounter::new(wild("Dropling", 2))));
        state.capture_devices = 0;
        let mut rng = StepRng::new(0, 0);
        assert_eq!(
            attempt_catch(&mut state, 0, &mut rng),
            Err(GameError::NoCaptureDevices)
        );
        assert!(state.encounter.is_some());
    }

    #[test]
    fn test_no_creature() {
        let mut state = RunState::new(&GameConfig::default());
        let mut rng = StepRng::new(0, 0);
        assert_eq!(
            attempt_catch(&mut state, 0, &mut rng),
            Err(GameError::NoCreatureEncounter)
        );
    }

    #[test]
    fn test_missed_boss_always_flees() {
        let mut encounter = WildEncounter::new(wild("Wispette", 8));
        encounter.defeated_in_battle = true;
        encounter.creature.catch_rate = 0;
        let mut state = state_facing(Encounter::Boss {
            encounter,
            mandatory: true,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        // catch_rate 0 clamps to a 10% chance; retry until a miss lands
        loop {
            match attempt_catch(&mut state, 0, &mut rng) {
                Ok(CatchOutcome::Missed { fled, .. }) => {
                    assert!(fled);
                    break;
                }
                Ok(CatchOutcome::Caught { .. }) => {
                    return;
                }
                Err(e) => panic!("unexpected error {:?}", e),
            }
        }
        assert!(state.encounter.is_none());
    }
}
