//! In-memory range-slice client
//!
//! Serves rows from process memory for tests and local use. Rows are
//! returned in insertion order. Key bounds and slice ranges compare names
//! byte-wise, which matches the ordering of the bytes, ASCII and UTF-8
//! comparators and of non-negative longs. Token ranges are rejected.

use std::collections::{HashMap, VecDeque};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::error::RemoteQueryError;
use crate::wire::{
    ColumnOrSuperColumn, KeyRangeRequest, KeySlice, PredicateRequest, RangeSliceClient, RangeSliceRequest,
    SliceRangeRequest,
};

type FamilyKey = (String, String);

#[derive(Debug, Default)]
pub struct InMemoryClient {
    rows: RwLock<HashMap<FamilyKey, Vec<KeySlice>>>,
    requests: Mutex<Vec<RangeSliceRequest>>,
    failures: Mutex<VecDeque<RemoteQueryError>>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a row; a row with the same key is replaced in place
    pub fn insert_row(&self, keyspace: impl Into<String>, column_family: impl Into<String>, row: KeySlice) {
        let mut rows = self.rows.write();
        let family = rows.entry((keyspace.into(), column_family.into())).or_default();

        match family.iter_mut().find(|existing| existing.key == row.key) {
            Some(existing) => *existing = row,
            None => family.push(row),
        }
    }

    /// Fail the next request with `error`. Queued failures are used in order.
    pub fn fail_next(&self, error: RemoteQueryError) {
        self.failures.lock().push_back(error);
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<RangeSliceRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl RangeSliceClient for InMemoryClient {
    fn get_range_slices(&self, request: &RangeSliceRequest) -> Result<Vec<KeySlice>, RemoteQueryError> {
        self.requests.lock().push(request.clone());

        if let Some(error) = self.failures.lock().pop_front() {
            debug!(%error, "returning scripted failure");
            return Err(error);
        }

        let (start, end) = key_bounds(&request.range)?;
        let limit = non_negative(request.range.count, "key range count")?;

        let rows = self.rows.read();
        let family_key = (request.keyspace.clone(), request.parent.column_family.clone());
        let Some(family) = rows.get(&family_key) else {
            return Ok(Vec::new());
        };

        let mut selected = Vec::new();
        for row in family.iter().filter(|row| in_bounds(&row.key, start, end)).take(limit) {
            let entries = match &request.parent.super_column {
                Some(name) => scoped_entries(row, name),
                None => row.columns.clone(),
            };
            let columns = apply_predicate(entries, &request.predicate)?;
            selected.push(KeySlice::new(row.key.clone(), columns));
        }

        debug!(
            column_family = %request.parent.column_family,
            rows = selected.len(),
            "served range slice"
        );
        Ok(selected)
    }
}

fn key_bounds(range: &KeyRangeRequest) -> Result<(&[u8], &[u8]), RemoteQueryError> {
    if range.start_token.is_some() || range.end_token.is_some() {
        return Err(RemoteQueryError::invalid_request(
            "token ranges are not supported by the in-memory client",
        ));
    }
    Ok((
        range.start_key.as_deref().unwrap_or_default(),
        range.end_key.as_deref().unwrap_or_default(),
    ))
}

fn non_negative(count: i32, what: &str) -> Result<usize, RemoteQueryError> {
    usize::try_from(count)
        .map_err(|_| RemoteQueryError::invalid_request(format!("{} must be non-negative, got {}", what, count)))
}

/// Empty bounds are open
fn in_bounds(name: &[u8], low: &[u8], high: &[u8]) -> bool {
    (low.is_empty() || name >= low) && (high.is_empty() || name <= high)
}

fn scoped_entries(row: &KeySlice, super_column: &[u8]) -> Vec<ColumnOrSuperColumn> {
    row.columns
        .iter()
        .find_map(|item| match item {
            ColumnOrSuperColumn::SuperColumn(sc) if sc.name == super_column => Some(
                sc.columns
                    .iter()
                    .cloned()
                    .map(ColumnOrSuperColumn::Column)
                    .collect(),
            ),
            _ => None,
        })
        .unwrap_or_default()
}

fn entry_name(item: &ColumnOrSuperColumn) -> &[u8] {
    match item {
        ColumnOrSuperColumn::Column(column) => &column.name,
        ColumnOrSuperColumn::SuperColumn(sc) => &sc.name,
    }
}

fn apply_predicate(
    entries: Vec<ColumnOrSuperColumn>,
    predicate: &PredicateRequest,
) -> Result<Vec<ColumnOrSuperColumn>, RemoteQueryError> {
    match predicate {
        PredicateRequest::ColumnNames(names) => Ok(entries
            .into_iter()
            .filter(|item| names.iter().any(|n| n.as_slice() == entry_name(item)))
            .collect()),
        PredicateRequest::SliceRange(range) => slice(entries, range),
    }
}

fn slice(
    entries: Vec<ColumnOrSuperColumn>,
    range: &SliceRangeRequest,
) -> Result<Vec<ColumnOrSuperColumn>, RemoteQueryError> {
    let limit = non_negative(range.count, "slice count")?;
    // reversed ranges run from start down to finish
    let (low, high) = if range.reversed {
        (&range.finish, &range.start)
    } else {
        (&range.start, &range.finish)
    };

    let mut selected: Vec<_> = entries
        .into_iter()
        .filter(|item| in_bounds(entry_name(item), low, high))
        .collect();
    if range.reversed {
        selected.reverse();
    }
    selected.truncate(limit);
    Ok(selected)
}
