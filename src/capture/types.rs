use crate::creatures::{Evolution, ExperienceReport};

/// Where a successful catch ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// New roster member at `index`, evolved on arrival if its level allowed
    Added {
        index: usize,
        evolution: Option<Evolution>,
    },
    /// Folded into the existing member of the same line as experience
    Merged {
        index: usize,
        exp: u32,
        report: ExperienceReport,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatchOutcome {
    Caught {
        species: &'static str,
        level: u32,
        chance: u32,
        reward: u32,
        placement: Placement,
    },
    Missed {
        species: &'static str,
        chance: u32,
        /// The creature ran off and the encounter is over
        fled: bool,
    },
}

impl CatchOutcome {
    pub fn is_caught(&self) -> bool {
        matches!(self, CatchOutcome::Caught { .. })
    }
}
