use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use crate::creatures::{lookup, pre_evolution, repair, total_species, Roster};
use crate::floors::{block_of, starts_new_block, Encounter, FloorEvent};

/// Everything that survives between actions within one run.
///
/// Serializes to JSON with creatures referring to their species by name.
/// A loaded state should go through `Game::from_state`, which repairs
/// creature records that no longer match their species and level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub floor: u32,
    pub currency: u32,
    pub capture_devices: u32,
    pub roster: Roster,
    /// At most one outstanding encounter
    pub encounter: Option<Encounter>,
    pub floor_explored: bool,
    /// Creature encounters spawned in the current block of ten floors
    pub battles_this_block: u32,
    pub game_over: bool,
    /// Species ever obtained, including merged-away and evolved-from ones
    pub capture_history: BTreeSet<String>,
    pub started_at: i64,
}

/// Result of applying a flavor event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventEffect {
    Healed(usize),
    Currency(u32),
    CaptureDevices(u32),
    Nothing,
}

impl RunState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            floor: 1,
            currency: config.starting_currency,
            capture_devices: config.starting_capture_devices,
            roster: Roster::new(),
            encounter: None,
            floor_explored: false,
            battles_this_block: 0,
            game_over: false,
            capture_history: BTreeSet::new(),
            started_at: Utc::now().timestamp(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn block(&self) -> u32 {
        block_of(self.floor)
    }

    /// Moves one floor up. Returns true when a new block of ten begins.
    pub fn climb(&mut self) -> bool {
        self.floor += 1;
        self.encounter = None;
        self.floor_explored = false;
        let new_block = starts_new_block(self.floor);
        if new_block {
            self.battles_this_block = 0;
        }
        new_block
    }

    pub fn apply_event(&mut self, event: &FloorEvent) -> EventEffect {
        match event {
            FloorEvent::Healing => EventEffect::Healed(self.roster.heal_all()),
            FloorEvent::Currency(amount) => {
                self.currency += amount;
                EventEffect::Currency(*amount)
            }
            FloorEvent::CaptureDevices(amount) => {
                self.capture_devices += amount;
                EventEffect::CaptureDevices(*amount)
            }
            FloorEvent::Narrative(_) => EventEffect::Nothing,
        }
    }

    /// Species counted as obtained: capture history, current roster, and the
    /// pre-evolution of anything evolved.
    pub fn species_obtained(&self) -> BTreeSet<&'static str> {
        let mut obtained = BTreeSet::new();
        let names = self
            .capture_history
            .iter()
            .map(String::as_str)
            .chain(self.roster.iter().map(|c| c.name()));
        for name in names {
            if let Some(template) = lookup(name) {
                obtained.insert(template.name);
                if let Some(previous) = pre_evolution(template) {
                    obtained.insert(previous.name);
                }
            }
        }
        obtained
    }

    pub fn completion(&self) -> (usize, usize) {
        (self.species_obtained().len(), total_species())
    }

    pub fn completion_percent(&self) -> f64 {
        let (obtained, total) = self.completion();
        obtained as f64 / total as f64 * 100.0
    }

    /// Repairs every roster creature. Returns how many needed fixing.
    pub fn repair_creatures(&mut self) -> usize {
        self.roster.iter_mut().map(repair).filter(|fixed| *fixed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creatures::{instantiate_owned, instantiate_wild};

    fn owned(name: &str, level: u32) -> crate::creatures::Creature {
        instantiate_owned(&instantiate_wild(lookup(name).unwrap(), level), 0)
    }

    #[test]
    fn test_new_run_uses_config() {
        let state = RunState::new(&GameConfig::generous());
        assert_eq!(state.floor, 1);
        assert_eq!(state.currency, 100);
        assert_eq!(state.capture_devices, 5);
        assert!(state.roster.is_empty());
        assert!(!state.game_over);
    }

    #[test]
    fn test_climb_resets_block_counter() {
        let mut state = RunState::new(&GameConfig::default());
        state.floor = 9;
        state.battles_this_block = 6;
        assert!(!state.climb());
        assert_eq!(state.battles_this_block, 6);
        assert!(state.climb());
        assert_eq!(state.floor, 11);
        assert_eq!(state.battles_this_block, 0);
        assert!(!state.floor_explored);
    }

    #[test]
    fn test_apply_events() {
        let mut state = RunState::new(&GameConfig::default());
        state.roster.push(owned("Dropling", 2));
        state.roster.get_mut(0).unwrap().hp = 1;
        assert_eq!(state.apply_event(&FloorEvent::Healing), EventEffect::Healed(1));
        assert_eq!(
            state.apply_event(&FloorEvent::Currency(25)),
            EventEffect::Currency(25)
        );
        assert_eq!(state.currency, 125);
        state.apply_event(&FloorEvent::CaptureDevices(1));
        assert_eq!(state.capture_devices, 4);
        assert_eq!(
            state.apply_event(&FloorEvent::Narrative("quiet".to_string())),
            EventEffect::Nothing
        );
    }

    #[test]
    fn test_completion_counts_pre_evolutions() {
        let mut state = RunState::new(&GameConfig::default());
        state.capture_history.insert("Phantasm".to_string());
        state.roster.push(owned("Infernal", 10));
        let obtained = state.species_obtained();
        assert!(obtained.contains("Wispette"));
        assert!(obtained.contains("Emberling"));
        assert_eq!(state.completion(), (4, 15));
    }

    #[test]
    fn test_json_round_trip_keeps_species_and_encounter() {
        let mut state = RunState::new(&GameConfig::default());
        state.floor = 14;
        state.roster.push(owned("Infernal", 12));
        state.capture_history.insert("Emberling".to_string());
        state.encounter = Some(Encounter::Event(FloorEvent::Narrative(
            "Wind howls through the stairwell.".to_string(),
        )));

        let json = state.to_json().unwrap();
        assert!(json.contains(r#""species":"Infernal""#));
        let loaded = RunState::from_json(&json).unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.roster.get(0).unwrap().name(), "Infernal");
    }

    #[test]
    fn test_from_json_rejects_unknown_species() {
        let mut state = RunState::new(&GameConfig::default());
        state.roster.push(owned("Dropling", 2));
        let json = state
            .to_json()
            .unwrap()
            .replace(r#""species":"Dropling""#, r#""species":"Missingno""#);
        let err = RunState::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("unknown species: Missingno"));
    }

    #[test]
    fn test_repair_creatures_counts_fixes() {
        let mut state = RunState::new(&GameConfig::default());
        state.roster.push(owned("Dropling", 2));
        state.roster.push(owned("Sparkit", 4));
        state.roster.get_mut(1).unwrap().max_hp = 1;
        assert_eq!(state.repair_creatures(), 1);
        assert_eq!(state.repair_creatures(), 0);
    }
}
