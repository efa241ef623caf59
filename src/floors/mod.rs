//! Floor layout: which floors hold bosses, shops and wild creatures, and the
//! spawner that fills a floor with its encounter.

pub mod policy;
pub mod spawner;
pub mod types;

pub use policy::*;
pub use spawner::*;
pub use types::*;
