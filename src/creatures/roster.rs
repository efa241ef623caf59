//! The player's owned creatures, in capture order.

use serde::{Deserialize, Serialize};

use super::logic::{can_evolve, grant_experience, ExperienceReport};
use super::types::Creature;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    creatures: Vec<Creature>,
}

/// Aggregate numbers for the stats panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterSummary {
    pub size: usize,
    pub available: usize,
    pub knocked_out: usize,
    pub average_level: f64,
    pub team_hp_percent: f64,
    pub ready_to_evolve: usize,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_creatures(creatures: Vec<Creature>) -> Self {
        Self { creatures }
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Creature> {
        self.creatures.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Creature> {
        self.creatures.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Creature> {
        self.creatures.iter_mut()
    }

    /// Appends a creature and returns its index.
    pub fn push(&mut self, creature: Creature) -> usize {
        self.creatures.push(creature);
        self.creatures.len() - 1
    }

    /// Index of the first member of an evolution line, in capture order.
    pub fn first_in_line(&self, line: &str) -> Option<usize> {
        self.creatures.iter().position(|c| c.line() == line)
    }

    pub fn count_in_line(&self, line: &str) -> usize {
        self.creatures.iter().filter(|c| c.line() == line).count()
    }

    pub fn available_count(&self) -> usize {
        self.creatures.iter().filter(|c| !c.is_knocked_out()).count()
    }

    pub fn has_available(&self) -> bool {
        self.creatures.iter().any(|c| !c.is_knocked_out())
    }

    /// Indexes of creatures able to fight, other than `except`.
    pub fn available_indices(&self, except: Option<usize>) -> Vec<usize> {
        self.creatures
            .iter()
            .enumerate()
            .filter(|(i, c)| !c.is_knocked_out() && Some(*i) != except)
            .map(|(i, _)| i)
            .collect()
    }

    /// Heals everyone to full. Returns how many creatures were hurt.
    pub fn heal_all(&mut self) -> usize {
        self.creatures
            .iter_mut()
            .map(|c| c.heal_full())
            .filter(|healed| *healed)
            .count()
    }

    pub fn needs_healing(&self) -> bool {
        self.creatures.iter().any(|c| !c.is_full_hp())
    }

    /// Grants the same amount to every member; returns reports for members
    /// that leveled up.
    pub fn grant_experience_all(&mut self, amount: u32) -> Vec<(usize, ExperienceReport)> {
        self.creatures
            .iter_mut()
            .enumerate()
            .map(|(i, c)| (i, grant_experience(c, amount)))
            .filter(|(_, report)| report.leveled_up())
            .collect()
    }

    /// Display order for creature selection: level, then rarity (both
    /// descending), then name.
    pub fn selection_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.creatures.len()).collect();
        order.sort_by(|&a, &b| {
            let (ca, cb) = (&self.creatures[a], &self.creatures[b]);
            cb.level
                .cmp(&ca.level)
                .then_with(|| cb.rarity().cmp(&ca.rarity()))
                .then_with(|| ca.name().cmp(cb.name()))
        });
        order
    }

    pub fn summary(&self) -> RosterSummary {
        if self.creatures.is_empty() {
            return RosterSummary::default();
        }
        let size = self.creatures.len();
        let available = self.available_count();
        let total_level: u32 = self.creatures.iter().map(|c| c.level).sum();
        let total_hp: u32 = self.creatures.iter().map(|c| c.hp).sum();
        let total_max: u32 = self.creatures.iter().map(|c| c.max_hp).sum();

        RosterSummary {
            size,
            available,
            knocked_out: size - available,
            average_level: total_level as f64 / size as f64,
            team_hp_percent: if total_max == 0 {
                0.0
            } else {
                total_hp as f64 / total_max as f64 * 100.0
            },
            ready_to_evolve: self.creatures.iter().filter(|c| can_evolve(c)).count(),
        }
    }
}
