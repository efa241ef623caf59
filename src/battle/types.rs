use serde::Serialize;

use crate::creatures::{Creature, ExperienceReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Turn {
    Player,
    Enemy,
}

/// Battle-time snapshot of one side. Roster HP is synced from the player
/// snapshot after every enemy hit and when the battle ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combatant {
    pub name: &'static str,
    pub glyph: &'static str,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl Combatant {
    pub fn from_creature(creature: &Creature) -> Self {
        Self {
            name: creature.name(),
            glyph: creature.glyph(),
            level: creature.level,
            hp: creature.hp.min(creature.max_hp),
            max_hp: creature.max_hp,
            attack: creature.attack,
            defense: creature.defense,
        }
    }

    pub fn is_knocked_out(&self) -> bool {
        self.hp == 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleState {
    pub player: Combatant,
    pub enemy: Combatant,
    pub turn: Turn,
    /// Roster slot the player snapshot belongs to
    pub roster_index: usize,
    /// Player creature is down and a replacement must be sent in
    pub awaiting_switch: bool,
    pub is_boss: bool,
}

impl BattleState {
    pub fn accepts_player_move(&self) -> bool {
        self.turn == Turn::Player && !self.awaiting_switch
    }
}

/// Result of a single hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub damage: u32,
    pub remaining_hp: u32,
    pub knocked_out: bool,
}

/// What an enemy hit meant for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyTurnOutcome {
    /// Player creature still standing; turn passes back
    Continue,
    /// Player creature down, others can still fight
    NeedsReplacement,
    /// Nobody left standing
    AllKnockedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictoryReport {
    pub enemy_name: &'static str,
    pub currency: u32,
    pub exp: u32,
    pub level_ups: Vec<(usize, ExperienceReport)>,
    pub boss_healed: bool,
    pub new_catch_rate: u32,
}
