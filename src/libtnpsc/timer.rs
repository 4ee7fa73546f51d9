use std::time::{Duration, Instant};

/// A payload that becomes available once `due` has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Scheduled<T> {
    due: Instant,
    payload: T,
}

impl<T> Scheduled<T> {
    pub fn new(payload: T, delay: Duration, now: Instant) -> Self {
        Self {
            due: now + delay,
            payload,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Transient notification shown for a fixed duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    shown_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(message: &str, duration: Duration, now: Instant) -> Self {
        Self {
            message: message.to_string(),
            shown_at: now,
            duration,
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.duration
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.shown_at))
    }
}
