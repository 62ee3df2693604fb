//! Transient toast notifications

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// When the toast was raised
    pub created_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}

/// Toasts in the order they were raised, dropped once their time is up
#[derive(Debug)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    ttl: Duration,
}

impl NotificationQueue {
    /// How long a toast stays visible when nothing else is configured
    pub const DEFAULT_TTL: Duration = Duration::from_secs(4);
    /// Oldest toasts are dropped beyond this many
    const MAX_VISIBLE: usize = 5;

    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.items.push_back(Notification {
            kind,
            message: message.into(),
            created_at: Instant::now(),
        });
        while self.items.len() > Self::MAX_VISIBLE {
            self.items.pop_front();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Info, message);
    }

    /// Drop every toast older than the configured lifetime
    pub fn prune_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items.retain(|n| !n.is_expired(ttl, now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}
