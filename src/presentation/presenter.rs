use super::log::GameLog;
use super::view::{Notification, StatsView, ViewModel};

/// The narrow surface the game talks to. Front ends implement this; the
/// game never reaches into rendering details.
pub trait Presenter {
    fn render(&mut self, view: &ViewModel);

    fn append_log(&mut self, message: &str);

    fn refresh_stats(&mut self, stats: &StatsView);

    fn notify(&mut self, _notification: &Notification) {}
}

/// Keeps what it is shown in memory. Used by tests and the simulator.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub log: GameLog,
    pub last_view: Option<ViewModel>,
    pub renders: usize,
    pub stats: Option<StatsView>,
    pub stats_refreshes: usize,
    pub notifications: Vec<Notification>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_capacity(capacity: usize) -> Self {
        Self {
            log: GameLog::with_capacity(capacity),
            ..Default::default()
        }
    }

    pub fn screen(&self) -> Option<&'static str> {
        self.last_view.as_ref().map(ViewModel::screen_name)
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, view: &ViewModel) {
        self.last_view = Some(view.clone());
        self.renders += 1;
    }

    fn append_log(&mut self, message: &str) {
        self.log.push(message);
    }

    fn refresh_stats(&mut self, stats: &StatsView) {
        self.stats = Some(stats.clone());
        self.stats_refreshes += 1;
    }

    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}
