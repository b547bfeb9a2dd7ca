//! Capped roll history kept by the host.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MechResult;
use crate::roll::RollResult;

/// Number of results kept when no capacity is given.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// A resolved roll as recorded in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique id, usable when broadcasting the roll to other participants.
    pub id: Uuid,
    /// What was rolled (attribute label or roll name).
    pub label: String,
    /// The result itself.
    pub result: RollResult,
}

/// Most recent roll results, oldest first. The oldest entries are dropped
/// once the capacity is exceeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollHistory {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for RollHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl RollHistory {
    /// Create a history holding at most `capacity` entries (0 = unlimited).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Record a result, returning the id assigned to it.
    pub fn push(&mut self, label: impl Into<String>, result: RollResult) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(HistoryEntry {
            id,
            label: label.into(),
            result,
        });
        if self.capacity > 0 && self.entries.len() > self.capacity {
            let drain_count = self.entries.len() - self.capacity;
            self.entries.drain(..drain_count);
            tracing::debug!(evicted = drain_count, "roll history full, dropped oldest");
        }
        id
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Find an entry by id.
    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries whose result was critical.
    pub fn criticals(&self) -> Vec<&HistoryEntry> {
        self.entries
            .iter()
            .filter(|e| e.result.is_critical())
            .collect()
    }

    /// Maximum number of entries kept (0 = unlimited).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serialize one entry for broadcasting.
    pub fn entry_json(entry: &HistoryEntry) -> MechResult<String> {
        Ok(serde_json::to_string(entry)?)
    }
}
