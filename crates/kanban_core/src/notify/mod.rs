//! Transient notifications raised by task mutations.
//!
//! Entries expire `DISPLAY_DURATION` after they were pushed. Expiry is
//! evaluated against a caller-supplied instant, so nothing here owns a timer;
//! dismissing an entry early is just removing it.

use crate::model::{Notification, NotificationKind};
use time::{Duration, OffsetDateTime};

pub const DISPLAY_DURATION: Duration = Duration::seconds(4);
pub const TOAST_LIMIT: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    last_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<M: Into<String>>(
        &mut self,
        message: M,
        kind: NotificationKind,
        now: OffsetDateTime,
    ) -> u64 {
        self.last_id += 1;
        self.entries.push(Notification {
            id: self.last_id,
            message: message.into(),
            kind,
            timestamp: now,
        });
        self.last_id
    }

    pub fn remove(&mut self, id: u64) -> Option<Notification> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops every entry whose display time has run out by `now`.
    pub fn expire(&mut self, now: OffsetDateTime) -> Vec<Notification> {
        let (expired, live): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|entry| entry.timestamp + DISPLAY_DURATION <= now);
        self.entries = live;
        expired
    }

    /// The entries currently shown as toasts, oldest first.
    pub fn toasts(&self) -> &[Notification] {
        let start = self.entries.len().saturating_sub(TOAST_LIMIT);
        &self.entries[start..]
    }

    pub fn since(&self, id: u64) -> impl Iterator<Item = &Notification> {
        self.entries.iter().filter(move |entry| entry.id > id)
    }

    pub fn last_id(&self) -> u64 {
        self.last_id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
