use std::time::{Duration, Instant};

use scanner_core::camera::MediaDevice;
use scanner_core::permission::PermissionGate;
use scanner_core::routing::Navigator;

const NOTICE_DURATION: Duration = Duration::from_secs(2);

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub gate: PermissionGate,
    pub nav: Navigator,

    /// Permission probe in flight on the worker.
    pub probing: bool,

    pub devices: Vec<MediaDevice>,

    /// Log messages.
    pub log_messages: Vec<String>,

    /// Short-lived toast (e.g. after a copy).
    pub notice: Option<(String, Instant)>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn show_notice(&mut self, msg: impl Into<String>) {
        self.notice = Some((msg.into(), Instant::now() + NOTICE_DURATION));
    }

    /// Current notice, clearing it once expired.
    pub fn active_notice(&mut self, now: Instant) -> Option<&str> {
        if matches!(&self.notice, Some((_, until)) if now >= *until) {
            self.notice = None;
        }
        self.notice.as_ref().map(|(msg, _)| msg.as_str())
    }
}
