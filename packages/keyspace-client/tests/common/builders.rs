//! Wire row builders

use keyspace_client::types::ColumnType;
use keyspace_client::wire::{ColumnOrSuperColumn, KeySlice, RawColumn, RawSuperColumn};

/// Builder for one [`KeySlice`]
#[derive(Debug)]
pub struct RowBuilder {
    key: Vec<u8>,
    columns: Vec<ColumnOrSuperColumn>,
}

impl RowBuilder {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            columns: Vec::new(),
        }
    }

    /// Add a top-level column
    pub fn column(mut self, name: impl ColumnType, value: &str) -> Self {
        self.columns
            .push(ColumnOrSuperColumn::Column(RawColumn::new(name.encode(), value, 1)));
        self
    }

    /// Add a top-level column with a raw (possibly malformed) name
    pub fn raw_column(mut self, name: Vec<u8>, value: &str) -> Self {
        self.columns
            .push(ColumnOrSuperColumn::Column(RawColumn::new(name, value, 1)));
        self
    }

    /// Add a sub-partition holding `columns`
    pub fn super_column<C: ColumnType, S: ColumnType>(
        mut self,
        name: C,
        columns: impl IntoIterator<Item = (S, &'static str)>,
    ) -> Self {
        let columns = columns
            .into_iter()
            .map(|(name, value)| RawColumn::new(name.encode(), value, 1))
            .collect();
        self.columns.push(ColumnOrSuperColumn::SuperColumn(RawSuperColumn {
            name: name.encode(),
            columns,
        }));
        self
    }

    pub fn build(self) -> KeySlice {
        KeySlice::new(self.key, self.columns)
    }
}
