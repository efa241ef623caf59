//! Monster Tower - creature-collecting tower climber engine.
//!
//! Climb floor by floor, catch and battle creatures, evolve them and complete
//! the species catalog. The crate holds the rules and a progression
//! controller; front ends implement `presentation::Presenter`.

pub mod battle;
pub mod capture;
pub mod core;
pub mod creatures;
pub mod floors;
pub mod logging;
pub mod presentation;
pub mod shop;
pub mod simulator;
