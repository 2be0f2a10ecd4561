//! Message banner that hides itself after a fixed time.

use std::time::{Duration, Instant};

/// Transient message shown for a fixed duration.
#[derive(Debug, Clone)]
pub struct TimedBanner {
    duration: Duration,
    message: Option<(String, Instant)>,
}

impl TimedBanner {
    /// Create a banner that keeps each message visible for `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            message: None,
        }
    }

    /// Show a message starting now, replacing any current one.
    pub fn show(&mut self, message: impl Into<String>) {
        self.show_at(message, Instant::now());
    }

    /// Show a message starting at `shown_at`.
    pub fn show_at(&mut self, message: impl Into<String>, shown_at: Instant) {
        self.message = Some((message.into(), shown_at));
    }

    /// The message still visible at `now`, dropping it once expired.
    pub fn visible_at(&mut self, now: Instant) -> Option<&str> {
        let expired = match &self.message {
            Some((_, shown_at)) => now.saturating_duration_since(*shown_at) >= self.duration,
            None => return None,
        };

        if expired {
            self.message = None;
            return None;
        }

        self.message.as_ref().map(|(text, _)| text.as_str())
    }

    /// The message visible right now.
    pub fn visible(&mut self) -> Option<&str> {
        self.visible_at(Instant::now())
    }
}
