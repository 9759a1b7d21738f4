use std::time::Duration;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(1800);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub expires_at: Duration,
}

/// Single-slot "latest message wins" notification area.
///
/// Times are offsets from session start, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    /// Replaces whatever is shown and restarts the delay.
    pub fn notify(&mut self, message: impl Into<String>, now: Duration) {
        self.current = Some(Notification {
            message: message.into(),
            expires_at: now + NOTIFICATION_TTL,
        });
    }

    pub fn visible(&self, now: Duration) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|notification| now < notification.expires_at)
            .map(|notification| notification.message.as_str())
    }

    /// Drops an expired notification. Returns true if one was hidden.
    pub fn expire(&mut self, now: Duration) -> bool {
        match &self.current {
            Some(notification) if now >= notification.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
