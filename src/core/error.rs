//! Error types for rejected actions and bad configuration.
//!
//! Every `GameError` is recoverable: the controller logs its `Display` text
//! once and leaves the run untouched. `EmptyCandidateSet` is the only one that
//! points at broken catalog data rather than a player mistake.

use thiserror::Error;

use crate::creatures::{Rarity, Stage};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("You must deal with the current encounter first!")]
    EncounterPending,

    #[error("This floor has already been explored. Advance to the next one!")]
    FloorAlreadyExplored,

    #[error("There is nothing here to interact with.")]
    NoEncounter,

    #[error("There is no creature to catch or fight here.")]
    NoCreatureEncounter,

    #[error("No capture devices left! Visit the next shop.")]
    NoCaptureDevices,

    #[error("The boss must be defeated in battle before it can be captured!")]
    CaptureLocked,

    #[error("Bosses cannot be escaped. Fight to progress!")]
    BossIsMandatory,

    #[error("A battle is already in progress.")]
    BattleActive,

    #[error("There is no battle in progress.")]
    NoBattle,

    #[error("Wait for your turn!")]
    NotPlayerTurn,

    #[error("Your creature is knocked out. Send in a replacement!")]
    AwaitingSwitch,

    #[error("This creature was already defeated.")]
    AlreadyDefeated,

    #[error("You have no creature able to fight!")]
    NoFighters,

    #[error("No creature at roster slot {0}.")]
    InvalidRosterIndex(usize),

    #[error("{0} is knocked out and cannot fight!")]
    CreatureKnockedOut(String),

    #[error("{0} is already in battle!")]
    AlreadyFighting(String),

    #[error("Resolve this floor's encounter before moving on!")]
    EncounterUnresolved,

    #[error("Not enough coins: have {have}, need {need}.")]
    InsufficientFunds { have: u32, need: u32 },

    #[error("You have no creatures to heal!")]
    EmptyRoster,

    #[error("There is no shop on this floor.")]
    NotInShop,

    #[error("Hold on, the last action is still resolving.")]
    ActionPending,

    #[error("The run is over. Start a new adventure!")]
    GameOver,

    #[error("No {rarity:?} species at stage {stage:?} in the catalog")]
    EmptyCandidateSet { rarity: Rarity, stage: Stage },
}

impl GameError {
    /// Fatal errors indicate broken catalog data, not a player mistake.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::EmptyCandidateSet { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
