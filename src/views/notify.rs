//! Transient notifications (toasts).

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// How long a notification stays visible.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Toast flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// One transient message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    expires_at: Instant,
}

impl Notification {
    /// Whether the notification has outlived its TTL.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Shared queue of transient notifications.
///
/// Clones share the same queue, so a detail view and its parent list can
/// surface toasts in one place.
#[derive(Debug, Clone)]
pub struct Notifications {
    entries: Arc<Mutex<Vec<Notification>>>,
    next_id: Arc<AtomicU64>,
    ttl: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_NOTIFICATION_TTL)
    }
}

impl Notifications {
    /// Empty queue with the default TTL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty queue whose entries expire after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            ttl,
        }
    }

    /// Queue a notification and return its id.
    pub fn push(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().push(Notification {
            id,
            kind,
            message: message.into(),
            expires_at: Instant::now() + self.ttl,
        });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Info, message)
    }

    /// Notifications still visible, oldest first. Expired ones are pruned.
    pub fn active(&self) -> Vec<Notification> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        entries.retain(|n| !n.is_expired(now));
        entries.clone()
    }

    /// Take every queued notification, expired or not.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notifications_expire() {
        let notifications = Notifications::with_ttl(Duration::from_secs(2));
        notifications.success("saved");
        tokio::time::advance(Duration::from_secs(1)).await;
        notifications.error("failed");

        assert_eq!(notifications.active().len(), 2);

        tokio::time::advance(Duration::from_millis(1500)).await;
        let active = notifications.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].kind, NotificationKind::Error);
    }

    #[test]
    fn test_drain_empties_shared_queue() {
        let notifications = Notifications::new();
        let shared = notifications.clone();
        let first = notifications.info("one");
        let second = shared.error("two");
        assert!(second > first);

        let drained = notifications.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].message, "two");
        assert!(shared.drain().is_empty());
    }
}
