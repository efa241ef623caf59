//! Capture devices, catch odds and merging of duplicate catches.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
