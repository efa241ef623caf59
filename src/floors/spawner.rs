//! Produces the encounter for the current floor.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error};

use super::policy::{block_of, classify, monster_chance, spawn_params};
use super::types::{Encounter, FloorEvent, FloorKind, WildEncounter};
use crate::core::config::GameConfig;
use crate::core::constants::*;
use crate::core::error::GameError;
use crate::core::game_state::RunState;
use crate::creatures::{candidates, instantiate_wild, Creature, Rarity, SpeciesTemplate, Stage};
use crate::shop::offer_for_floor;

const NARRATIVES: [&str; 5] = [
    "You find old scratch marks on the wall. Something big passed through here.",
    "A cool breeze drifts down the stairwell. Nothing else stirs.",
    "Faded murals depict trainers climbing the tower long ago.",
    "You hear distant footsteps above, then silence.",
    "A quiet floor. Your team takes a short breather.",
];

/// Picks a species for the rolled rarity and stage.
///
/// Stage 2 falls back to stage 1 when the rarity has no evolved species.
/// An empty stage-1 set means the catalog itself is broken.
pub fn choose_template(
    rarity: Rarity,
    stage: Stage,
    rng: &mut impl Rng,
) -> Result<&'static SpeciesTemplate, GameError> {
    let mut pool = candidates(rarity, stage);
    if pool.is_empty() && stage == Stage::Evolved {
        pool = candidates(rarity, Stage::Base);
    }
    match pool.choose(rng) {
        Some(template) => Ok(*template),
        None => {
            error!(?rarity, ?stage, "no species available for spawn");
            Err(GameError::EmptyCandidateSet { rarity, stage })
        }
    }
}

/// Rolls a wild creature using the floor's level, rarity and stage odds.
pub fn spawn_wild_creature(
    floor: u32,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Result<Creature, GameError> {
    let params = spawn_params(floor, config, rng);
    let template = choose_template(params.rarity, params.stage, rng)?;
    debug!(
        floor,
        species = template.name,
        level = params.level,
        rarity = ?params.rarity,
        "rolled wild creature"
    );
    Ok(instantiate_wild(template, params.level))
}

/// A weak common creature with a forced 100% catch rate.
pub fn spawn_guaranteed_catch(rng: &mut impl Rng) -> Result<Creature, GameError> {
    let template = choose_template(Rarity::Common, Stage::Base, rng)?;
    let level = rng.gen_range(1..=GUARANTEED_CATCH_MAX_LEVEL);
    let mut creature = instantiate_wild(template, level);
    creature.catch_rate = GUARANTEED_CATCH_RATE;
    Ok(creature)
}

pub fn roll_event(floor: u32, rng: &mut impl Rng) -> FloorEvent {
    let roll = rng.gen::<f64>();
    if roll < EVENT_HEAL_WEIGHT {
        FloorEvent::Healing
    } else if roll < EVENT_HEAL_WEIGHT + EVENT_CURRENCY_WEIGHT {
        FloorEvent::Currency(EVENT_CURRENCY_BASE + EVENT_CURRENCY_PER_BLOCK * block_of(floor))
    } else if roll < EVENT_HEAL_WEIGHT + EVENT_CURRENCY_WEIGHT + EVENT_DEVICE_WEIGHT {
        FloorEvent::CaptureDevices(EVENT_DEVICE_GAIN)
    } else {
        let text = NARRATIVES.choose(rng).copied().unwrap_or(NARRATIVES[0]);
        FloorEvent::Narrative(text.to_string())
    }
}

/// Spawns the encounter for the state's current floor.
///
/// Creature spawns count toward the block's battle counter. The caller stores
/// the encounter; this only reads the state and bumps the counter.
pub fn spawn(
    state: &mut RunState,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Result<Encounter, GameError> {
    if state.encounter.is_some() {
        return Err(GameError::EncounterPending);
    }
    let floor = state.floor;

    let encounter = match classify(floor) {
        FloorKind::GuaranteedCatch => {
            Encounter::GuaranteedCatch(WildEncounter::new(spawn_guaranteed_catch(rng)?))
        }
        FloorKind::Boss => Encounter::Boss {
            encounter: WildEncounter::new(spawn_wild_creature(floor, config, rng)?),
            mandatory: true,
        },
        FloorKind::Shop => Encounter::Shop(offer_for_floor(floor)),
        FloorKind::Exploration => {
            if rng.gen::<f64>() < monster_chance(floor) {
                Encounter::Wild(WildEncounter::new(spawn_wild_creature(floor, config, rng)?))
            } else {
                Encounter::Event(roll_event(floor, rng))
            }
        }
    };

    if encounter.wild().is_some() {
        state.battles_this_block += 1;
    }
    Ok(encounter)
}
