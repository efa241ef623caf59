//! Shop floors: capture devices and roster healing at block-scaled prices.

pub mod logic;

pub use logic::*;
