//! Battle engine: damage law, turn order, switching and victory payouts.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
