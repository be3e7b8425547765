//! Per-entity change tracking
//!
//! A [`MutationTracker`] records which columns were added, changed or removed
//! since the last clean checkpoint. Repeated changes to one column coalesce
//! into a single entry:
//!
//! | previous | new     | result   |
//! |----------|---------|----------|
//! | Added    | Changed | Added    |
//! | Added    | Removed | (none)   |
//! | Changed  | Removed | Removed  |
//! | Removed  | Added   | Changed  |

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Kind of change recorded for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationType {
    Added,
    Changed,
    Removed,
}

/// One pending change, keyed by encoded column name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mutation {
    pub column: Vec<u8>,
    pub kind: MutationType,
    pub recorded_at: DateTime<Utc>,
}

/// Changes since the last [`MutationTracker::clear`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationTracker {
    mutations: Vec<Mutation>,
    slots: HashMap<Vec<u8>, usize>,
}

impl MutationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change to `column`, coalescing with any earlier entry
    pub fn record(&mut self, column: Vec<u8>, kind: MutationType) {
        self.record_at(column, kind, Utc::now());
    }

    /// Record the same change for many columns under one timestamp
    pub fn record_all(&mut self, columns: impl IntoIterator<Item = Vec<u8>>, kind: MutationType) {
        let now = Utc::now();
        let columns = columns.into_iter();
        let (lower, _) = columns.size_hint();
        self.mutations.reserve(lower);
        self.slots.reserve(lower);

        for column in columns {
            self.record_at(column, kind, now);
        }
    }

    fn record_at(&mut self, column: Vec<u8>, kind: MutationType, now: DateTime<Utc>) {
        let Some(&index) = self.slots.get(&column) else {
            self.slots.insert(column.clone(), self.mutations.len());
            self.mutations.push(Mutation {
                column,
                kind,
                recorded_at: now,
            });
            return;
        };

        let merged = match (self.mutations[index].kind, kind) {
            (MutationType::Added, MutationType::Removed) => None,
            (MutationType::Added, _) => Some(MutationType::Added),
            (MutationType::Removed, MutationType::Added) => Some(MutationType::Changed),
            (_, kind) => Some(kind),
        };

        match merged {
            Some(kind) => {
                let entry = &mut self.mutations[index];
                entry.kind = kind;
                entry.recorded_at = now;
            }
            None => {
                self.mutations.remove(index);
                self.slots.remove(&column);
                for slot in self.slots.values_mut() {
                    if *slot > index {
                        *slot -= 1;
                    }
                }
            }
        }
    }

    /// Pending changes in first-touch order
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn get(&self, column: &[u8]) -> Option<&Mutation> {
        self.slots.get(column).map(|&index| &self.mutations[index])
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Mark the current state as clean
    pub fn clear(&mut self) {
        self.mutations.clear();
        self.slots.clear();
    }
}
