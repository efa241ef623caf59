//! Turn-based battle resolution.
//!
//! The player always opens. Each side hits once per turn; the enemy reply is
//! driven by the controller so it can be paced. Roster HP is written back
//! from the player snapshot after every enemy hit.

use rand::Rng;
use tracing::{debug, info};

use super::types::{BattleState, Combatant, EnemyTurnOutcome, Strike, Turn, VictoryReport};
use crate::core::constants::*;
use crate::core::error::GameError;
use crate::core::game_state::RunState;
use crate::creatures::Roster;

/// Level advantage multiplier, clamped to `min..=1.5`.
pub fn level_modifier(level_diff: i64, min: f64) -> f64 {
    (1.0 + level_diff as f64 * LEVEL_MODIFIER_PER_LEVEL).clamp(min, LEVEL_MODIFIER_MAX)
}

/// Damage of one hit.
///
/// Defense gives diminishing returns: `eff = def / (def + atk)`. The level
/// modifier and random factor are applied on top, each floored.
pub fn damage_for(attack: u32, defense: u32, level_diff: i64, min_modifier: f64, factor: f64) -> u32 {
    let atk = attack as f64;
    let def = defense as f64;
    let effectiveness = if atk + def > 0.0 { def / (def + atk) } else { 0.0 };
    let base = ((atk * (1.0 - effectiveness)).floor() as u32).max(1);
    let base = (base as f64 * level_modifier(level_diff, min_modifier)).floor();
    ((base * factor).floor() as u32).max(1)
}

/// Uniform in [0.8, 1.2).
pub fn roll_damage_factor(rng: &mut impl Rng) -> f64 {
    DAMAGE_FACTOR_MIN + rng.gen::<f64>() * DAMAGE_FACTOR_SPREAD
}

fn level_diff(attacker: &Combatant, defender: &Combatant) -> i64 {
    attacker.level as i64 - defender.level as i64
}

/// Opens a battle against the current creature encounter.
pub fn start_battle(state: &RunState, roster_index: usize) -> Result<BattleState, GameError> {
    let encounter = state.encounter.as_ref().ok_or(GameError::NoCreatureEncounter)?;
    let wild = encounter.wild().ok_or(GameError::NoCreatureEncounter)?;
    if wild.defeated_in_battle {
        return Err(GameError::AlreadyDefeated);
    }
    if !state.roster.has_available() {
        return Err(GameError::NoFighters);
    }
    let fighter = state
        .roster
        .get(roster_index)
        .ok_or(GameError::InvalidRosterIndex(roster_index))?;
    if fighter.is_knocked_out() {
        return Err(GameError::CreatureKnockedOut(fighter.name().to_string()));
    }

    info!(
        player = fighter.name(),
        enemy = wild.creature.name(),
        boss = encounter.is_boss(),
        "battle started"
    );
    Ok(BattleState {
        player: Combatant::from_creature(fighter),
        enemy: Combatant::from_creature(&wild.creature),
        turn: Turn::Player,
        roster_index,
        awaiting_switch: false,
        is_boss: encounter.is_boss(),
    })
}

/// Copies the player snapshot's HP back to its roster slot.
pub fn sync_player_hp(battle: &BattleState, roster: &mut Roster) {
    if let Some(creature) = roster.get_mut(battle.roster_index) {
        creature.set_hp(battle.player.hp);
    }
}

/// The player's attack. Passes the turn to the enemy unless the enemy fell.
pub fn player_strike(battle: &mut BattleState, rng: &mut impl Rng) -> Result<Strike, GameError> {
    if battle.awaiting_switch {
        return Err(GameError::AwaitingSwitch);
    }
    if battle.turn != Turn::Player {
        return Err(GameError::NotPlayerTurn);
    }
    let factor = roll_damage_factor(rng);
    let damage = damage_for(
        battle.player.attack,
        battle.enemy.defense,
        level_diff(&battle.player, &battle.enemy),
        PLAYER_LEVEL_MODIFIER_MIN,
        factor,
    );
    battle.enemy.take_damage(damage);
    let knocked_out = battle.enemy.is_knocked_out();
    if !knocked_out {
        battle.turn = Turn::Enemy;
    }
    debug!(damage, factor, enemy_hp = battle.enemy.hp, "player strike");
    Ok(Strike {
        damage,
        remaining_hp: battle.enemy.hp,
        knocked_out,
    })
}

/// The enemy's reply. Writes the player creature's HP back to the roster.
pub fn enemy_strike(
    battle: &mut BattleState,
    roster: &mut Roster,
    rng: &mut impl Rng,
) -> (Strike, EnemyTurnOutcome) {
    let factor = roll_damage_factor(rng);
    let damage = damage_for(
        battle.enemy.attack,
        battle.player.defense,
        level_diff(&battle.enemy, &battle.player),
        ENEMY_LEVEL_MODIFIER_MIN,
        factor,
    );
    battle.player.take_damage(damage);
    sync_player_hp(battle, roster);
    debug!(damage, factor, player_hp = battle.player.hp, "enemy strike");

    let strike = Strike {
        damage,
        remaining_hp: battle.player.hp,
        knocked_out: battle.player.is_knocked_out(),
    };
    let outcome = if !strike.knocked_out {
        battle.turn = Turn::Player;
        EnemyTurnOutcome::Continue
    } else if roster.has_available() {
        battle.awaiting_switch = true;
        EnemyTurnOutcome::NeedsReplacement
    } else {
        EnemyTurnOutcome::AllKnockedOut
    };
    (strike, outcome)
}

/// Sends a different healthy creature in. Allowed on the player's turn or
/// while a replacement is awaited; the player moves next either way.
pub fn switch_fighter(
    battle: &mut BattleState,
    roster: &mut Roster,
    roster_index: usize,
) -> Result<(), GameError> {
    if battle.turn != Turn::Player && !battle.awaiting_switch {
        return Err(GameError::NotPlayerTurn);
    }
    let target = roster
        .get(roster_index)
        .ok_or(GameError::InvalidRosterIndex(roster_index))?;
    if roster_index == battle.roster_index {
        return Err(GameError::AlreadyFighting(target.name().to_string()));
    }
    if target.is_knocked_out() {
        return Err(GameError::CreatureKnockedOut(target.name().to_string()));
    }
    let incoming = Combatant::from_creature(target);

    sync_player_hp(battle, roster);
    debug!(from = battle.player.name, to = incoming.name, "switched fighter");
    battle.player = incoming;
    battle.roster_index = roster_index;
    battle.turn = Turn::Player;
    battle.awaiting_switch = false;
    Ok(())
}

/// Pays out a won battle and weakens the beaten creature for capture.
pub fn resolve_victory(battle: &BattleState, state: &mut RunState) -> Result<VictoryReport, GameError> {
    sync_player_hp(battle, &mut state.roster);

    let wild = state
        .encounter
        .as_mut()
        .and_then(|e| e.wild_mut())
        .ok_or(GameError::NoCreatureEncounter)?;
    let exp = wild.creature.exp_value;
    let currency = (exp as f64 * VICTORY_CURRENCY_MULTIPLIER).floor() as u32;
    let enemy_name = wild.creature.name();

    wild.creature.catch_rate =
        (wild.creature.catch_rate + DEFEATED_CATCH_RATE_BONUS).min(DEFEATED_CATCH_RATE_CAP);
    wild.creature.heal_full();
    wild.defeated_in_battle = true;
    let new_catch_rate = wild.creature.catch_rate;

    state.currency += currency;
    let level_ups = state.roster.grant_experience_all(exp);
    if battle.is_boss {
        state.roster.heal_all();
    }
    for (_, report) in &level_ups {
        if let Some(evolution) = &report.evolution {
            state.capture_history.insert(evolution.to.name.to_string());
        }
    }

    info!(enemy = enemy_name, currency, exp, boss = battle.is_boss, "battle won");
    Ok(VictoryReport {
        enemy_name,
        currency,
        exp,
        level_ups,
        boss_healed: battle.is_boss,
        new_catch_rate,
    })
}

/// Leaves a battle. Bosses cannot be escaped.
pub fn flee_battle(battle: &BattleState, roster: &mut Roster) -> Result<(), GameError> {
    if battle.is_boss {
        return Err(GameError::BossIsMandatory);
    }
    sync_player_hp(battle, roster);
    Ok(())
}
