use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::SpeciesTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        }
    }

    pub fn all() -> [Rarity; 4] {
        [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Legendary,
        ]
    }
}

/// Evolution stage. Stage 1 species may evolve into a stage 2 species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
    Base,
    Evolved,
}

impl Stage {
    pub fn number(&self) -> u8 {
        match self {
            Stage::Base => 1,
            Stage::Evolved => 2,
        }
    }
}

/// A concrete creature, wild or owned.
///
/// Derived stats (`max_hp`, `attack`, `defense`) always follow from the
/// species base stats and `level`; they are recomputed on level-up and
/// evolution and never edited on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: Uuid,
    /// Stored as the species name and resolved against the catalog on load
    #[serde(with = "species_by_name")]
    pub species: &'static SpeciesTemplate,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub catch_rate: u32,
    pub exp_value: u32,
    /// Unix seconds; `None` while the creature is wild
    pub captured_at: Option<i64>,
}

impl Creature {
    pub fn name(&self) -> &'static str {
        self.species.name
    }

    pub fn glyph(&self) -> &'static str {
        self.species.glyph
    }

    pub fn rarity(&self) -> Rarity {
        self.species.rarity
    }

    pub fn stage(&self) -> Stage {
        self.species.stage
    }

    pub fn line(&self) -> &'static str {
        self.species.line
    }

    pub fn is_knocked_out(&self) -> bool {
        self.hp == 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.hp >= self.max_hp
    }

    pub fn is_owned(&self) -> bool {
        self.captured_at.is_some()
    }

    /// Sets HP, clamped into `0..=max_hp`.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Applies damage, flooring HP at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores full HP. Returns true if the creature was hurt.
    pub fn heal_full(&mut self) -> bool {
        let was_hurt = self.hp < self.max_hp;
        self.hp = self.max_hp;
        was_hurt
    }

    pub fn hp_percent(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64 * 100.0
    }
}

mod species_by_name {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::creatures::catalog::{lookup, SpeciesTemplate};

    pub fn serialize<S: Serializer>(
        species: &&'static SpeciesTemplate,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(species.name)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<&'static SpeciesTemplate, D::Error> {
        let name = String::deserialize(deserializer)?;
        lookup(&name).ok_or_else(|| D::Error::custom(format!("unknown species: {}", name)))
    }
}
