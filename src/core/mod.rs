//! Run state, rules configuration and the controller that drives a run.

pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod game_state;
pub mod pacing;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use game::*;
pub use game_state::*;
pub use pacing::*;
