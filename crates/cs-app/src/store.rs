//! Ordered, capacity-bounded entry history.
//!
//! Newest entry first. Insertion always happens at the head and eviction
//! always from the tail, so after every mutation `len() <= capacity()` and
//! no two entries share an id.

use chrono::{DateTime, Utc};
use cs_core::{ClipboardEntry, EntryId};

/// Result of inserting a captured entry.
#[derive(Debug, Default)]
pub struct InsertOutcome {
    /// Previous occurrence of the same content, removed before insertion.
    pub replaced: Option<ClipboardEntry>,
    /// Entries dropped from the tail to restore capacity.
    pub evicted: Vec<ClipboardEntry>,
}

#[derive(Debug)]
pub struct EntryStore {
    entries: Vec<ClipboardEntry>,
    capacity: usize,
}

impl EntryStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn entries(&self) -> &[ClipboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, id: &EntryId) -> Option<&ClipboardEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.get(id).is_some()
    }

    /// Insert `entry` at the head.
    ///
    /// A previous occurrence with the same dedup key is removed first and its
    /// star is carried over to the new entry.
    pub fn insert(&mut self, entry: ClipboardEntry) -> InsertOutcome {
        let duplicate = {
            let key = entry.dedup_key();
            self.entries
                .iter()
                .position(|existing| existing.dedup_key() == key)
        };

        let replaced = duplicate.map(|index| self.entries.remove(index));
        let entry = match &replaced {
            Some(previous) if previous.is_starred() => entry.with_starred(true),
            _ => entry,
        };

        self.entries.insert(0, entry);
        let evicted = if self.entries.len() > self.capacity {
            self.entries.split_off(self.capacity)
        } else {
            Vec::new()
        };

        InsertOutcome { replaced, evicted }
    }

    /// Move the entry with `id` to the head. Returns `false` when absent.
    pub fn move_to_front(&mut self, id: &EntryId) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.id() == id) else {
            return false;
        };
        self.entries[..=index].rotate_right(1);
        true
    }

    pub fn remove(&mut self, id: &EntryId) -> Option<ClipboardEntry> {
        let index = self.entries.iter().position(|entry| entry.id() == id)?;
        Some(self.entries.remove(index))
    }

    /// Replace the entry with `id` by `update(entry)`, keeping its position.
    ///
    /// Returns `false` when no such entry exists.
    pub fn update(
        &mut self,
        id: &EntryId,
        update: impl FnOnce(ClipboardEntry) -> ClipboardEntry,
    ) -> bool {
        let Some(slot) = self.entries.iter_mut().find(|entry| entry.id() == id) else {
            return false;
        };
        let updated = update(slot.clone());
        debug_assert_eq!(updated.id(), id);
        *slot = updated;
        true
    }

    /// Remove every entry expired at `now`. Returns how many were removed.
    pub fn remove_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    /// Remove every unstarred entry. Returns how many were removed.
    pub fn clear_unstarred(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(ClipboardEntry::is_starred);
        before - self.entries.len()
    }
}
