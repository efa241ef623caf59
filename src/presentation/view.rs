//! Typed view models handed to the presenter.

use serde::Serialize;

use crate::battle::{Combatant, Turn};
use crate::creatures::{can_evolve, Creature, Rarity, RosterSummary, Stage};
use crate::shop::ShopOffer;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatureView {
    pub name: &'static str,
    pub glyph: &'static str,
    pub rarity: Rarity,
    pub stage: Stage,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub hp_percent: f64,
    pub attack: u32,
    pub defense: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub exp_value: u32,
    pub ready_to_evolve: bool,
    /// False for wild and boss creatures
    pub owned: bool,
}

impl CreatureView {
    pub fn of(creature: &Creature) -> Self {
        Self {
            name: creature.name(),
            glyph: creature.glyph(),
            rarity: creature.rarity(),
            stage: creature.stage(),
            level: creature.level,
            hp: creature.hp,
            max_hp: creature.max_hp,
            hp_percent: creature.hp_percent(),
            attack: creature.attack,
            defense: creature.defense,
            exp: creature.exp,
            exp_to_next: creature.exp_to_next,
            exp_value: creature.exp_value,
            ready_to_evolve: can_evolve(creature),
            owned: creature.is_owned(),
        }
    }
}

/// One row of the creature picker, in selection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionEntry {
    pub roster_index: usize,
    pub creature: CreatureView,
    pub selectable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ViewModel {
    Welcome {
        floor: u32,
    },
    Encounter {
        floor: u32,
        creature: CreatureView,
        catch_chance: u32,
        boss: bool,
        guaranteed: bool,
        defeated: bool,
        can_fight: bool,
        can_run: bool,
    },
    CreatureSelection {
        floor: u32,
        switching: bool,
        options: Vec<SelectionEntry>,
    },
    Battle {
        floor: u32,
        player: Combatant,
        enemy: Combatant,
        turn: Turn,
        awaiting_switch: bool,
        boss: bool,
    },
    Victory {
        floor: u32,
        enemy: &'static str,
        currency: u32,
        exp: u32,
        boss_healed: bool,
        catch_chance: u32,
    },
    CatchResult {
        floor: u32,
        species: &'static str,
        caught: bool,
        chance: u32,
        reward: u32,
        merged_into: Option<&'static str>,
        fled: bool,
    },
    Shop {
        floor: u32,
        offer: ShopOffer,
        currency: u32,
        capture_devices: u32,
        roster_needs_healing: bool,
    },
    Event {
        floor: u32,
        description: String,
    },
    Retreat {
        floor: u32,
    },
    Transition {
        floor: u32,
    },
    GameOver {
        floor: u32,
        roster_size: usize,
        currency: u32,
        species_obtained: usize,
        total_species: usize,
        completion_percent: f64,
    },
}

impl ViewModel {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn screen_name(&self) -> &'static str {
        match self {
            ViewModel::Welcome { .. } => "welcome",
            ViewModel::Encounter { .. } => "encounter",
            ViewModel::CreatureSelection { .. } => "creature_selection",
            ViewModel::Battle { .. } => "battle",
            ViewModel::Victory { .. } => "victory",
            ViewModel::CatchResult { .. } => "catch_result",
            ViewModel::Shop { .. } => "shop",
            ViewModel::Event { .. } => "event",
            ViewModel::Retreat { .. } => "retreat",
            ViewModel::Transition { .. } => "transition",
            ViewModel::GameOver { .. } => "game_over",
        }
    }
}

/// Numbers for the always-visible stats panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub floor: u32,
    pub block: u32,
    pub currency: u32,
    pub capture_devices: u32,
    pub battles_this_block: u32,
    pub roster: RosterSummary,
    pub species_obtained: usize,
    pub total_species: usize,
}

/// Pop-up worthy moments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    Evolution {
        from: &'static str,
        to: &'static str,
        level: u32,
    },
    GameOver {
        floor: u32,
        roster_size: usize,
        species_obtained: usize,
        total_species: usize,
    },
}
