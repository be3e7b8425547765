use chrono::Utc;

use super::{Column, EntityIdentity, MutationTracker, MutationType, TrackedEntity};
use crate::types::ColumnType;

/// One row's slice, optionally scoped to a sub-partition
///
/// `C` types the sub-partition name and `S` types the column names inside
/// it. Columns keep the order the server returned them in. Local edits go
/// through [`set`](Self::set) and [`remove`](Self::remove) so the
/// [`MutationTracker`] sees them.
#[derive(Debug, Clone)]
pub struct SuperColumn<C, S> {
    column_family: String,
    key: Vec<u8>,
    name: Option<C>,
    columns: Vec<Column<S>>,
    tracker: MutationTracker,
}

impl<C: ColumnType, S: ColumnType> SuperColumn<C, S> {
    /// An empty entity
    pub fn new(column_family: impl Into<String>, key: impl Into<Vec<u8>>, name: Option<C>) -> Self {
        Self {
            column_family: column_family.into(),
            key: key.into(),
            name,
            columns: Vec::new(),
            tracker: MutationTracker::new(),
        }
    }

    /// An entity holding `columns`, each recorded as added
    pub fn with_columns(
        column_family: impl Into<String>,
        key: impl Into<Vec<u8>>,
        name: Option<C>,
        columns: impl IntoIterator<Item = Column<S>>,
    ) -> Self {
        let mut entity = Self::new(column_family, key, name);
        entity.columns = columns.into_iter().collect();
        entity
            .tracker
            .record_all(entity.columns.iter().map(|column| column.name.encode()), MutationType::Added);
        entity
    }

    pub fn column_family(&self) -> &str {
        &self.column_family
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn name(&self) -> Option<&C> {
        self.name.as_ref()
    }

    pub fn columns(&self) -> &[Column<S>] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, name: &S) -> Option<&Column<S>> {
        self.columns.iter().find(|c| &c.name == name)
    }

    /// Insert or overwrite a column, stamped with the current time
    pub fn set(&mut self, name: S, value: impl Into<Vec<u8>>) {
        let timestamp = Utc::now().timestamp_micros();
        let value = value.into();
        let encoded = name.encode();

        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => {
                column.value = value;
                column.timestamp = timestamp;
                column.ttl = None;
                self.tracker.record(encoded, MutationType::Changed);
            }
            None => {
                self.columns.push(Column::new(name, value, timestamp));
                self.tracker.record(encoded, MutationType::Added);
            }
        }
    }

    pub fn remove(&mut self, name: &S) -> Option<Column<S>> {
        let index = self.columns.iter().position(|c| &c.name == name)?;
        let removed = self.columns.remove(index);
        self.tracker.record(name.encode(), MutationType::Removed);
        Some(removed)
    }
}

impl<C: ColumnType, S: ColumnType> TrackedEntity for SuperColumn<C, S> {
    fn identity(&self) -> EntityIdentity {
        EntityIdentity {
            column_family: self.column_family.clone(),
            key: self.key.clone(),
            super_column: self.name.as_ref().map(ColumnType::encode),
        }
    }

    fn mutation_tracker(&self) -> &MutationTracker {
        &self.tracker
    }

    fn mutation_tracker_mut(&mut self) -> &mut MutationTracker {
        &mut self.tracker
    }
}
