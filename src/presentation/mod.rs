//! Boundary between the engine and whatever draws it.

pub mod log;
pub mod presenter;
pub mod view;

pub use log::GameLog;
pub use presenter::{Presenter, RecordingPresenter};
pub use view::*;
