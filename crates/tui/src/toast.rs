use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub level: ToastLevel,
    pub message: String,
    shown_at: Instant,
}

/// Single-slot notification area: a new toast replaces the current one and
/// every toast disappears after `ttl`.
#[derive(Debug)]
pub struct Notifier {
    slot: Option<ToastState>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self { slot: None, ttl }
    }

    pub fn show(&mut self, level: ToastLevel, message: impl Into<String>, now: Instant) {
        self.slot = Some(ToastState {
            level,
            message: message.into(),
            shown_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.show(ToastLevel::Success, message, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.show(ToastLevel::Error, message, now);
    }

    pub fn current(&self) -> Option<&ToastState> {
        self.slot.as_ref()
    }

    /// Clears the slot once the toast has been visible for `ttl`.
    pub fn expire(&mut self, now: Instant) {
        if self
            .slot
            .as_ref()
            .is_some_and(|toast| now.saturating_duration_since(toast.shown_at) >= self.ttl)
        {
            self.slot = None;
        }
    }
}
