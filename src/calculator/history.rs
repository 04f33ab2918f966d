//! Calculation history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engine::Record;

/// One resolved calculation or memory operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique within the session, increasing in creation order.
    pub id: u64,
    /// Human readable operands and operator, e.g. `3 + 4` or `M+ 5`.
    pub expression: String,
    /// Formatted result or the error marker.
    pub result: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of history entries.
///
/// Entries are stored oldest first and read newest first. Ids keep
/// increasing across [`History::clear`] so an id is never reused within a
/// session.
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl Default for History {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record stamped with the current time.
    pub fn push(&mut self, record: Record) -> &HistoryEntry {
        self.push_at(record, Utc::now())
    }

    /// Append a record with an explicit timestamp.
    pub fn push_at(&mut self, record: Record, timestamp: DateTime<Utc>) -> &HistoryEntry {
        let id = self.next_id;
        self.next_id += 1;

        let index = self.entries.len();
        self.entries.push(HistoryEntry {
            id,
            expression: record.expression,
            result: record.result,
            timestamp,
        });
        &self.entries[index]
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
