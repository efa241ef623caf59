//! Static species table and lookup helpers.
//!
//! Each evolution line has one stage-1 species and at most one stage-2
//! species. Lookups return `'static` references so creatures can point at
//! their template without copying it.

use serde::Serialize;

use super::types::{Rarity, Stage};

/// Immutable species definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesTemplate {
    pub name: &'static str,
    pub glyph: &'static str,
    pub rarity: Rarity,
    /// Base catch rate in percent (0-100)
    pub catch_rate: u32,
    /// Base experience value, also the basis for coin rewards
    pub exp_value: u32,
    pub base_hp: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub stage: Stage,
    /// Groups species that merge into and evolve into each other
    pub line: &'static str,
    pub evolution_level: Option<u32>,
    pub evolves_into: Option<&'static str>,
    pub evolves_from: Option<&'static str>,
}

const fn base_form(
    name: &'static str,
    glyph: &'static str,
    rarity: Rarity,
    catch_rate: u32,
    exp_value: u32,
    stats: (u32, u32, u32),
    line: &'static str,
    evolution: Option<(u32, &'static str)>,
) -> SpeciesTemplate {
    let (evolution_level, evolves_into) = match evolution {
        Some((level, target)) => (Some(level), Some(target)),
        None => (None, None),
    };
    SpeciesTemplate {
        name,
        glyph,
        rarity,
        catch_rate,
        exp_value,
        base_hp: stats.0,
        base_attack: stats.1,
        base_defense: stats.2,
        stage: Stage::Base,
        line,
        evolution_level,
        evolves_into,
        evolves_from: None,
    }
}

const fn evolved_form(
    name: &'static str,
    glyph: &'static str,
    rarity: Rarity,
    catch_rate: u32,
    exp_value: u32,
    stats: (u32, u32, u32),
    line: &'static str,
    evolves_from: &'static str,
) -> SpeciesTemplate {
    SpeciesTemplate {
        name,
        glyph,
        rarity,
        catch_rate,
        exp_value,
        base_hp: stats.0,
        base_attack: stats.1,
        base_defense: stats.2,
        stage: Stage::Evolved,
        line,
        evolution_level: None,
        evolves_into: None,
        evolves_from: Some(evolves_from),
    }
}

pub static SPECIES: [SpeciesTemplate; 15] = [
    // Stage 1
    base_form("Emberling", "🔥", Rarity::Common, 75, 30, (45, 35, 25), "fire", Some((10, "Infernal"))),
    base_form("Dropling", "💧", Rarity::Common, 75, 30, (50, 30, 30), "water", Some((10, "Tidalwave"))),
    base_form("Sproutling", "🌿", Rarity::Common, 75, 30, (55, 25, 35), "grass", Some((10, "Grovekeeper"))),
    base_form("Pebblit", "🗿", Rarity::Uncommon, 55, 60, (60, 40, 45), "rock", Some((15, "Monolith"))),
    base_form("Sparkit", "⚡", Rarity::Uncommon, 55, 60, (55, 50, 30), "electric", Some((15, "Stormcaller"))),
    base_form("Frostling", "❄️", Rarity::Uncommon, 55, 60, (60, 45, 40), "ice", Some((15, "Blizzardon"))),
    base_form("Wispette", "👻", Rarity::Rare, 35, 120, (70, 60, 35), "ghost", Some((20, "Phantasm"))),
    // Stage 2
    evolved_form("Infernal", "🌋", Rarity::Uncommon, 45, 80, (65, 55, 35), "fire", "Emberling"),
    evolved_form("Tidalwave", "🌊", Rarity::Uncommon, 45, 80, (75, 50, 45), "water", "Dropling"),
    evolved_form("Grovekeeper", "🌳", Rarity::Uncommon, 45, 80, (80, 40, 55), "grass", "Sproutling"),
    evolved_form("Monolith", "🏔️", Rarity::Rare, 25, 150, (95, 65, 75), "rock", "Pebblit"),
    evolved_form("Stormcaller", "🌩️", Rarity::Rare, 25, 150, (85, 80, 50), "electric", "Sparkit"),
    evolved_form("Blizzardon", "🌨️", Rarity::Rare, 25, 150, (90, 70, 65), "ice", "Frostling"),
    evolved_form("Phantasm", "🌙", Rarity::Legendary, 10, 300, (110, 95, 60), "ghost", "Wispette"),
    // No evolution
    base_form("Star Dragon", "🐉", Rarity::Legendary, 15, 250, (105, 85, 70), "dragon", None),
];

pub fn all_species() -> &'static [SpeciesTemplate] {
    &SPECIES
}

pub fn total_species() -> usize {
    SPECIES.len()
}

pub fn lookup(name: &str) -> Option<&'static SpeciesTemplate> {
    SPECIES.iter().find(|s| s.name == name)
}

pub fn templates_of_rarity(rarity: Rarity) -> Vec<&'static SpeciesTemplate> {
    SPECIES.iter().filter(|s| s.rarity == rarity).collect()
}

pub fn templates_of_stage(stage: Stage) -> Vec<&'static SpeciesTemplate> {
    SPECIES.iter().filter(|s| s.stage == stage).collect()
}

/// Species matching both a rarity and a stage. May be empty.
pub fn candidates(rarity: Rarity, stage: Stage) -> Vec<&'static SpeciesTemplate> {
    SPECIES
        .iter()
        .filter(|s| s.rarity == rarity && s.stage == stage)
        .collect()
}

/// All species of an evolution line, ordered by stage.
pub fn evolution_line(line: &str) -> Vec<&'static SpeciesTemplate> {
    let mut members: Vec<_> = SPECIES.iter().filter(|s| s.line == line).collect();
    members.sort_by_key(|s| s.stage);
    members
}

pub fn evolution_target(template: &SpeciesTemplate) -> Option<&'static SpeciesTemplate> {
    template.evolves_into.and_then(lookup)
}

pub fn pre_evolution(template: &SpeciesTemplate) -> Option<&'static SpeciesTemplate> {
    template.evolves_from.and_then(lookup)
}
