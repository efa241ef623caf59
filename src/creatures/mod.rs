//! Species catalog, creature instances and the player's roster.

pub mod catalog;
pub mod logic;
pub mod roster;
pub mod types;

pub use catalog::*;
pub use logic::*;
pub use roster::*;
pub use types::*;
