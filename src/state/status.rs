// Transient status messages
// Feedback shown above the active view, cleared after a fixed window

use std::time::{Duration, Instant};

/// How long a status message stays on screen
pub const STATUS_DISPLAY_WINDOW: Duration = Duration::from_secs(3);

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// A user-facing feedback message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
    /// When the message was posted
    pub posted_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, severity: Severity, posted_at: Instant) -> Self {
        Self {
            text: text.into(),
            severity,
            posted_at,
        }
    }

    /// When the message should disappear
    pub fn expires_at(&self) -> Instant {
        self.posted_at + STATUS_DISPLAY_WINDOW
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_window() {
        let posted = Instant::now();
        let message = StatusMessage::new("saved", Severity::Success, posted);

        assert!(!message.is_expired(posted));
        assert!(!message.is_expired(posted + Duration::from_millis(2999)));
        assert!(message.is_expired(posted + STATUS_DISPLAY_WINDOW));
    }
}
