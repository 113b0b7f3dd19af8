use crate::constants::NOTIFICATION_TTL;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient banner shown after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    shown_at: Instant,
    ttl: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success, Instant::now())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error, Instant::now())
    }

    pub fn new(message: impl Into<String>, kind: NotificationKind, shown_at: Instant) -> Self {
        Notification {
            message: message.into(),
            kind,
            shown_at,
            ttl: NOTIFICATION_TTL,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.ttl
    }
}

/// Holds at most one banner; a new one replaces the old
#[derive(Debug, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
}

impl NotificationCenter {
    pub fn push(&mut self, notification: Notification) {
        debug!(
            "{:?} notification shown for {}",
            notification.kind,
            humantime::format_duration(notification.ttl)
        );
        self.current = Some(notification);
    }

    /// The banner still visible at `now`, dismissing an expired one
    pub fn visible(&mut self, now: Instant) -> Option<&Notification> {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_dismisses_after_four_seconds() {
        let start = Instant::now();
        let mut center = NotificationCenter::default();
        center.push(Notification::new("saved", NotificationKind::Success, start));

        assert!(center.visible(start + Duration::from_millis(3999)).is_some());
        assert!(center.visible(start + Duration::from_secs(4)).is_none());
        assert!(center.last().is_none());
    }

    #[test]
    fn newer_banner_replaces_older() {
        let mut center = NotificationCenter::default();
        center.push(Notification::success("one"));
        center.push(Notification::error("two"));
        let shown = center.last().unwrap();
        assert_eq!(shown.message, "two");
        assert_eq!(shown.kind, NotificationKind::Error);
    }
}
