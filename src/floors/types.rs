use serde::{Deserialize, Serialize};

use crate::creatures::{Creature, Rarity, Stage};
use crate::shop::ShopOffer;

/// What a floor number holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FloorKind {
    /// Floor 1: a weak creature that is always caught
    GuaranteedCatch,
    /// Every tenth floor
    Boss,
    /// Fifth floor of each block
    Shop,
    /// Everything else: a wild creature or a flavor event
    Exploration,
}

/// Level, rarity tier and stage chosen for one spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnParams {
    pub level: u32,
    pub rarity: Rarity,
    pub stage: Stage,
}

/// A creature the player can catch, fight or (unless boss) run from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WildEncounter {
    pub creature: Creature,
    /// Beaten in battle this encounter; catching it no longer pays coins
    pub defeated_in_battle: bool,
    pub failed_catches: u32,
}

impl WildEncounter {
    pub fn new(creature: Creature) -> Self {
        Self {
            creature,
            defeated_in_battle: false,
            failed_catches: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorEvent {
    /// Heals the whole roster
    Healing,
    Currency(u32),
    CaptureDevices(u32),
    /// Flavor text only
    Narrative(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Encounter {
    Wild(WildEncounter),
    Boss {
        encounter: WildEncounter,
        mandatory: bool,
    },
    GuaranteedCatch(WildEncounter),
    Shop(ShopOffer),
    Event(FloorEvent),
}

impl Encounter {
    /// The creature part of the encounter, if any.
    pub fn wild(&self) -> Option<&WildEncounter> {
        match self {
            Encounter::Wild(w) | Encounter::GuaranteedCatch(w) => Some(w),
            Encounter::Boss { encounter, .. } => Some(encounter),
            Encounter::Shop(_) | Encounter::Event(_) => None,
        }
    }

    pub fn wild_mut(&mut self) -> Option<&mut WildEncounter> {
        match self {
            Encounter::Wild(w) | Encounter::GuaranteedCatch(w) => Some(w),
            Encounter::Boss { encounter, .. } => Some(encounter),
            Encounter::Shop(_) | Encounter::Event(_) => None,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, Encounter::Boss { .. })
    }

    pub fn is_mandatory_boss(&self) -> bool {
        matches!(self, Encounter::Boss { mandatory: true, .. })
    }

    pub fn is_guaranteed(&self) -> bool {
        matches!(self, Encounter::GuaranteedCatch(_))
    }

    /// An undefeated creature keeps the player on this floor.
    pub fn blocks_advance(&self) -> bool {
        self.wild().is_some_and(|w| !w.defeated_in_battle)
    }
}
