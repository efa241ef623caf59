//! Creature scaling, leveling and evolution.

use tracing::debug;
use uuid::Uuid;

use super::catalog::{evolution_target, SpeciesTemplate};
use super::types::Creature;
use crate::core::constants::*;

/// Derived stats for a species at a given level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatLine {
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
}

/// Outcome of an evolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evolution {
    pub from: &'static SpeciesTemplate,
    pub to: &'static SpeciesTemplate,
    pub level: u32,
}

/// What happened while experience was granted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceReport {
    pub levels_gained: u32,
    pub new_level: u32,
    pub evolution: Option<Evolution>,
}

impl ExperienceReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// `base + floor((level-1) * base * growth)`
fn grow(base: u32, level: u32, growth: f64) -> u32 {
    let bonus = level.saturating_sub(1) as f64 * (base as f64 * growth);
    base + bonus.floor() as u32
}

pub fn stats_for_level(template: &SpeciesTemplate, level: u32) -> StatLine {
    StatLine {
        max_hp: grow(template.base_hp, level, HP_GROWTH_PER_LEVEL),
        attack: grow(template.base_attack, level, ATTACK_GROWTH_PER_LEVEL),
        defense: grow(template.base_defense, level, DEFENSE_GROWTH_PER_LEVEL),
    }
}

pub fn exp_value_for_level(template: &SpeciesTemplate, level: u32) -> u32 {
    grow(template.exp_value, level, EXP_VALUE_GROWTH_PER_LEVEL)
}

pub fn catch_rate_for_level(template: &SpeciesTemplate, level: u32) -> u32 {
    let drop = CATCH_RATE_DROP_PER_LEVEL * level.saturating_sub(1);
    template
        .catch_rate
        .saturating_sub(drop)
        .max(MIN_WILD_CATCH_RATE)
}

/// Closed-form experience requirement for a freshly owned creature.
pub fn exp_to_next_for_level(level: u32) -> u32 {
    let exponent = level.saturating_sub(1) as i32;
    (EXP_CURVE_BASE * EXP_CURVE_GROWTH.powi(exponent)).floor() as u32
}

fn apply_stats(creature: &mut Creature) {
    let stats = stats_for_level(creature.species, creature.level);
    creature.max_hp = stats.max_hp;
    creature.attack = stats.attack;
    creature.defense = stats.defense;
}

/// Builds a wild creature at full HP.
pub fn instantiate_wild(template: &'static SpeciesTemplate, level: u32) -> Creature {
    let level = level.max(1);
    let stats = stats_for_level(template, level);
    Creature {
        id: Uuid::new_v4(),
        species: template,
        level,
        exp: 0,
        exp_to_next: exp_to_next_for_level(level),
        hp: stats.max_hp,
        max_hp: stats.max_hp,
        attack: stats.attack,
        defense: stats.defense,
        catch_rate: catch_rate_for_level(template, level),
        exp_value: exp_value_for_level(template, level),
        captured_at: None,
    }
}

/// Converts a caught wild creature into a roster member.
///
/// Level, stats and current HP carry over; experience restarts at zero.
pub fn instantiate_owned(caught: &Creature, captured_at: i64) -> Creature {
    Creature {
        id: Uuid::new_v4(),
        exp: 0,
        exp_to_next: exp_to_next_for_level(caught.level),
        captured_at: Some(captured_at),
        ..caught.clone()
    }
}

pub fn can_evolve(creature: &Creature) -> bool {
    match (creature.species.evolution_level, evolution_target(creature.species)) {
        (Some(threshold), Some(_)) => creature.level >= threshold,
        _ => false,
    }
}

/// Evolves the creature into its target species if eligible.
///
/// Level is unchanged. Catch rate and experience value become the target's
/// base values. A full-HP creature stays full; a damaged one keeps the same
/// fraction of its maximum.
pub fn evolve(creature: &mut Creature) -> Option<Evolution> {
    if !can_evolve(creature) {
        return None;
    }
    let from = creature.species;
    let to = evolution_target(from)?;

    let old_hp = creature.hp;
    let old_max = creature.max_hp;
    let was_full = old_hp >= old_max;

    creature.species = to;
    creature.catch_rate = to.catch_rate;
    creature.exp_value = to.exp_value;
    apply_stats(creature);
    creature.hp = if was_full || old_max == 0 {
        creature.max_hp
    } else {
        (creature.max_hp as f64 * (old_hp as f64 / old_max as f64)).floor() as u32
    };
    creature.set_hp(creature.hp);

    debug!(from = from.name, to = to.name, level = creature.level, "creature evolved");
    Some(Evolution {
        from,
        to,
        level: creature.level,
    })
}

/// Adds experience, levels up as often as it covers, then evolves at most once.
pub fn grant_experience(creature: &mut Creature, amount: u32) -> ExperienceReport {
    let mut report = ExperienceReport {
        new_level: creature.level,
        ..Default::default()
    };
    creature.exp = creature.exp.saturating_add(amount);

    while creature.exp_to_next > 0 && creature.exp >= creature.exp_to_next {
        creature.exp -= creature.exp_to_next;
        creature.level += 1;
        creature.exp_to_next = (creature.exp_to_next as f64 * EXP_CURVE_GROWTH).floor() as u32;

        let was_full = creature.is_full_hp();
        apply_stats(creature);
        if was_full {
            creature.hp = creature.max_hp;
        }
        report.levels_gained += 1;
    }
    report.new_level = creature.level;

    if report.leveled_up() {
        report.evolution = evolve(creature);
    }
    report
}

/// Restores the creature invariants on a record that may have been edited by
/// hand or built by an older ruleset. Returns true if anything changed.
pub fn repair(creature: &mut Creature) -> bool {
    let mut fixed = false;

    if creature.level == 0 {
        creature.level = 1;
        fixed = true;
    }

    let expected = stats_for_level(creature.species, creature.level);
    if creature.max_hp != expected.max_hp
        || creature.attack != expected.attack
        || creature.defense != expected.defense
    {
        let was_full = creature.is_full_hp();
        apply_stats(creature);
        if was_full {
            creature.hp = creature.max_hp;
        }
        fixed = true;
    }

    if creature.exp_to_next == 0 {
        creature.exp_to_next = exp_to_next_for_level(creature.level);
        fixed = true;
    }

    if creature.exp_value == 0 {
        creature.exp_value = exp_value_for_level(creature.species, creature.level);
        fixed = true;
    }

    if !(MIN_WILD_CATCH_RATE..=GUARANTEED_CATCH_RATE).contains(&creature.catch_rate) {
        creature.catch_rate = catch_rate_for_level(creature.species, creature.level);
        fixed = true;
    }

    if creature.hp > creature.max_hp {
        creature.hp = creature.max_hp;
        fixed = true;
    }

    fixed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creatures::catalog::lookup;
    use crate::creatures::types::Stage;

    fn owned(name: &str, level: u32) -> Creature {
        let wild = instantiate_wild(lookup(name).unwrap(), level);
        instantiate_owned(&wild, 0)
    }

    #[test]
    fn test_level_one_uses_base_stats() {
        let c = instantiate_wild(lookup("Emberling").unwrap(), 1);
        assert_eq!((c.max_hp, c.attack, c.defense), (45, 35, 25));
        assert_eq!(c.hp, c.max_hp);
        assert_eq!(c.catch_rate, 75);
        assert_eq!(c.exp_value, 30);
    }

    #[test]
    fn test_stat_growth_at_level_ten() {
        // 45 + floor(9 * 4.5), 35 + floor(9 * 5.25), 25 + floor(9 * 2.5)
        let c = instantiate_wild(lookup("Emberling").unwrap(), 10);
        assert_eq!(c.max_hp, 85);
        assert_eq!(c.attack, 82);
        assert_eq!(c.defense, 47);
        assert_eq!(c.exp_value, 30 + 54);
        assert_eq!(c.catch_rate, 75 - 18);
    }

    #[test]
    fn test_catch_rate_floor() {
        let c = instantiate_wild(lookup("Phantasm").unwrap(), 10);
        assert_eq!(c.catch_rate, MIN_WILD_CATCH_RATE);
    }

    #[test]
    fn test_exp_curve_closed_form() {
        assert_eq!(exp_to_next_for_level(1), 50);
        assert_eq!(exp_to_next_for_level(2), 60);
        assert_eq!(exp_to_next_for_level(3), 72);
    }

    #[test]
    fn test_owned_keeps_level_and_resets_exp() {
        let mut wild = instantiate_wild(lookup("Pebblit").unwrap(), 4);
        wild.exp = 17;
        wild.take_damage(10);
        let mine = instantiate_owned(&wild, 1_700_000_000);
        assert_eq!(mine.level, 4);
        assert_eq!(mine.exp, 0);
        assert_eq!(mine.hp, wild.hp);
        assert_eq!(mine.captured_at, Some(1_700_000_000));
        assert_ne!(mine.id, wild.id);
    }

    #[test]
    fn test_grant_experience_levels_up() {
        let mut c = owned("Dropling", 1);
        let report = grant_experience(&mut c, 55);
        assert_eq!(report.levels_gained, 1);
        assert_eq!(c.level, 2);
        assert_eq!(c.exp, 5);
        assert_eq!(c.exp_to_next, 60);
        assert_eq!(c.hp, c.max_hp);
    }

    #[test]
    fn test_grant_experience_multiple_levels() {
        let mut c = owned("Dropling", 1);
        // 50 + 60 + 72 = 182
        let report = grant_experience(&mut c, 182);
        assert_eq!(report.levels_gained, 3);
        assert_eq!(c.level, 4);
        assert_eq!(c.exp, 0);
    }

    #[test]
    fn test_damaged_creature_keeps_current_hp_on_level_up() {
        let mut c = owned("Dropling", 1);
        c.take_damage(20);
        grant_experience(&mut c, 50);
        assert_eq!(c.hp, 30);
        assert!(c.max_hp > 50);
    }

    #[test]
    fn test_exp_to_next_strictly_increases() {
        let mut c = owned("Sproutling", 1);
        let mut last = c.exp_to_next;
        for _ in 0..30 {
            grant_experience(&mut c, last);
            assert!(c.exp_to_next > last);
            last = c.exp_to_next;
        }
    }

    #[test]
    fn test_grant_experience_monotonic() {
        let mut c = owned("Sparkit", 3);
        let mut prev = (c.level, c.exp);
        for amount in [0, 1, 10, 45, 200, 3] {
            grant_experience(&mut c, amount);
            assert!((c.level, c.exp) >= prev);
            prev = (c.level, c.exp);
        }
    }

    #[test]
    fn test_evolution_at_threshold() {
        let mut c = owned("Emberling", 9);
        let need = c.exp_to_next;
        let report = grant_experience(&mut c, need);
        assert_eq!(c.level, 10);
        let evo = report.evolution.expect("should evolve at level 10");
        assert_eq!(evo.from.name, "Emberling");
        assert_eq!(evo.to.name, "Infernal");
        assert_eq!(c.stage(), Stage::Evolved);
        let expected = stats_for_level(lookup("Infernal").unwrap(), 10);
        assert_eq!(c.max_hp, expected.max_hp);
        assert_eq!(c.hp, c.max_hp);
    }

    #[test]
    fn test_evolution_adopts_target_catch_rate_and_exp_value() {
        let mut c = owned("Emberling", 10);
        assert_eq!(c.catch_rate, 57);
        assert_eq!(c.exp_value, 84);

        evolve(&mut c).unwrap();
        let infernal = lookup("Infernal").unwrap();
        assert_eq!(c.catch_rate, infernal.catch_rate);
        assert_eq!(c.exp_value, infernal.exp_value);
    }

    #[test]
    fn test_level_up_evolution_adopts_target_values() {
        let mut c = owned("Sparkit", 14);
        let need = c.exp_to_next;
        grant_experience(&mut c, need);
        assert_eq!(c.name(), "Stormcaller");
        assert_eq!(c.catch_rate, 25);
        assert_eq!(c.exp_value, 150);
    }

    #[test]
    fn test_evolution_does_not_cascade() {
        let mut c = owned("Wispette", 20);
        assert!(evolve(&mut c).is_some());
        assert!(!can_evolve(&c));
        assert!(evolve(&mut c).is_none());
        assert_eq!(c.level, 20);
    }

    #[test]
    fn test_evolution_keeps_hp_fraction() {
        let mut c = owned("Emberling", 10);
        let half = c.max_hp / 2;
        c.set_hp(half);
        let old_max = c.max_hp;
        evolve(&mut c).unwrap();
        let expected = (c.max_hp as f64 * (half as f64 / old_max as f64)).floor() as u32;
        assert_eq!(c.hp, expected);
        assert!(c.hp < c.max_hp);
    }

    #[test]
    fn test_no_evolution_without_target() {
        let c = owned("Star Dragon", 50);
        assert!(!can_evolve(&c));
        let below = owned("Pebblit", 14);
        assert!(!can_evolve(&below));
    }

    #[test]
    fn test_repair_recomputes_stats() {
        let mut c = owned("Frostling", 5);
        c.max_hp = 1;
        c.attack = 0;
        c.exp_to_next = 0;
        assert!(repair(&mut c));
        let expected = stats_for_level(c.species, 5);
        assert_eq!(c.max_hp, expected.max_hp);
        assert_eq!(c.attack, expected.attack);
        assert_eq!(c.exp_to_next, exp_to_next_for_level(5));
        assert!(c.hp <= c.max_hp);
    }

    #[test]
    fn test_repair_clamps_hp() {
        let mut c = owned("Frostling", 2);
        c.hp = c.max_hp + 40;
        assert!(repair(&mut c));
        assert_eq!(c.hp, c.max_hp);
    }

    #[test]
    fn test_repair_restores_catch_rate_and_exp_value() {
        let mut c = owned("Frostling", 4);
        c.catch_rate = 0;
        c.exp_value = 0;
        assert!(repair(&mut c));
        assert_eq!(c.catch_rate, catch_rate_for_level(c.species, 4));
        assert_eq!(c.exp_value, exp_value_for_level(c.species, 4));

        c.catch_rate = 250;
        assert!(repair(&mut c));
        assert_eq!(c.catch_rate, 49);
    }

    #[test]
    fn test_repair_keeps_evolved_values() {
        let mut c = owned("Emberling", 10);
        evolve(&mut c).unwrap();
        assert!(!repair(&mut c));
        assert_eq!(c.catch_rate, 45);
    }

    #[test]
    fn test_repair_leaves_healthy_record_alone() {
        let mut c = owned("Frostling", 7);
        let before = c.clone();
        assert!(!repair(&mut c));
        assert_eq!(c, before);
    }
}
