use std::iter::FusedIterator;
use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use super::ColumnFamily;
use crate::config::ConsistencyLevel;
use crate::context::{Attached, Context};
use crate::entity::{Column, SuperColumn, TrackedEntity};
use crate::error::{DecodingError, QueryError, Result};
use crate::query::{KeyRange, SlicePredicate};
use crate::types::ColumnType;
use crate::wire::{ColumnOrSuperColumn, ColumnParent, KeySlice, RangeSliceClient, RangeSliceRequest};

/// Fetch a slice of one sub-partition across a range of rows
///
/// `C` types the sub-partition name, `S` the column names inside it. With
/// `super_column` set, the request is scoped to that sub-partition in every
/// row; without it, rows are read unscoped and each entity has no name.
///
/// # Examples
///
/// ```rust,ignore
/// let op = GetSuperColumnRangeSlice::<Utf8Type, LongType>::new(
///     KeyRange::all().count(10),
///     Some(Utf8Type::from("2024-06")),
///     SlicePredicate::all(),
/// );
/// for entity in op.execute(&mut events)? {
///     let entity = entity?;
///     println!("{:?}", entity.read().key());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GetSuperColumnRangeSlice<C, S> {
    key_range: KeyRange,
    super_column: Option<C>,
    predicate: SlicePredicate,
    consistency: Option<ConsistencyLevel>,
    _columns: PhantomData<fn() -> S>,
}

impl<C: ColumnType, S: ColumnType> GetSuperColumnRangeSlice<C, S> {
    pub fn new(key_range: KeyRange, super_column: Option<C>, predicate: SlicePredicate) -> Self {
        Self {
            key_range,
            super_column,
            predicate,
            consistency: None,
            _columns: PhantomData,
        }
    }

    /// Override the keyspace's read consistency for this operation
    pub fn with_consistency(mut self, level: ConsistencyLevel) -> Self {
        self.consistency = Some(level);
        self
    }

    pub fn key_range(&self) -> &KeyRange {
        &self.key_range
    }

    pub fn super_column(&self) -> Option<&C> {
        self.super_column.as_ref()
    }

    pub fn predicate(&self) -> &SlicePredicate {
        &self.predicate
    }

    pub fn consistency(&self) -> Option<ConsistencyLevel> {
        self.consistency
    }

    /// The wire request this operation sends
    pub fn request(
        &self,
        keyspace: &str,
        column_family: &str,
        default_consistency: ConsistencyLevel,
    ) -> RangeSliceRequest {
        let mut parent = ColumnParent::new(column_family);
        if let Some(name) = &self.super_column {
            parent = parent.with_super_column(name.encode());
        }

        RangeSliceRequest {
            keyspace: keyspace.to_string(),
            parent,
            predicate: self.predicate.to_wire(),
            range: self.key_range.to_wire(),
            consistency: self.consistency.unwrap_or(default_consistency),
        }
    }

    /// Send the request and return the rows as a lazy sequence
    ///
    /// The remote call happens here, so transport failures surface from this
    /// method. Decoding and attachment happen one row at a time as the
    /// returned [`RangeSlice`] is advanced.
    pub fn execute<'f, W, X>(&self, family: &'f mut ColumnFamily<'_, W, X>) -> Result<RangeSlice<'f, C, S, X>>
    where
        W: RangeSliceClient,
        X: Context,
    {
        let (keyspace, column_family, context) = family.parts();
        let request = self.request(keyspace.name(), column_family, keyspace.config().read_consistency());

        debug!(
            keyspace = %request.keyspace,
            column_family = %column_family,
            scoped = request.parent.super_column.is_some(),
            consistency = %request.consistency,
            count = request.range.count,
            "get_range_slices"
        );

        let rows = keyspace.client().get_range_slices(&request).map_err(|error| {
            warn!(column_family = %column_family, %error, "range slice request failed");
            QueryError::from(error)
        })?;

        debug!(column_family = %column_family, rows = rows.len(), "range slice returned");

        Ok(RangeSlice {
            rows: rows.into_iter(),
            column_family: column_family.to_string(),
            super_column: self.super_column.clone(),
            context,
            failed: false,
            _columns: PhantomData,
        })
    }
}

impl<W: RangeSliceClient, X: Context> ColumnFamily<'_, W, X> {
    /// Shorthand for building and executing a [`GetSuperColumnRangeSlice`]
    pub fn get_super_column_range_slice<C: ColumnType, S: ColumnType>(
        &mut self,
        key_range: KeyRange,
        super_column: Option<C>,
        predicate: SlicePredicate,
    ) -> Result<RangeSlice<'_, C, S, X>> {
        GetSuperColumnRangeSlice::new(key_range, super_column, predicate).execute(self)
    }
}

/// Rows of a range slice, materialized on demand
///
/// Each item is an entity attached to the family's context with a clean
/// mutation tracker. Rows come out in server order. The first decoding
/// error is yielded once and ends the sequence; entities yielded before it
/// stay attached.
pub struct RangeSlice<'f, C, S, X> {
    rows: std::vec::IntoIter<KeySlice>,
    column_family: String,
    super_column: Option<C>,
    context: &'f mut X,
    failed: bool,
    _columns: PhantomData<fn() -> S>,
}

impl<'f, C: ColumnType, S: ColumnType, X: Context> RangeSlice<'f, C, S, X> {
    /// Rows received but not yet materialized
    pub fn remaining_rows(&self) -> usize {
        if self.failed {
            0
        } else {
            self.rows.len()
        }
    }
}

impl<'f, C: ColumnType, S: ColumnType, X: Context> Iterator for RangeSlice<'f, C, S, X> {
    type Item = Result<Attached<SuperColumn<C, S>>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let row = self.rows.next()?;

        match decode_row::<C, S>(&self.column_family, self.super_column.as_ref(), row) {
            Ok(entity) => {
                let attached = self.context.attach(entity);
                attached.write().mutation_tracker_mut().clear();
                trace!(entity = %attached.read().identity(), "materialized row");
                Some(Ok(attached))
            }
            Err(error) => {
                self.failed = true;
                warn!(
                    column_family = %self.column_family,
                    skipped = self.rows.len(),
                    %error,
                    "range slice aborted"
                );
                Some(Err(error))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining_rows()))
    }
}

impl<'f, C: ColumnType, S: ColumnType, X: Context> FusedIterator for RangeSlice<'f, C, S, X> {}

fn decode_row<C: ColumnType, S: ColumnType>(
    column_family: &str,
    super_column: Option<&C>,
    row: KeySlice,
) -> Result<SuperColumn<C, S>> {
    let KeySlice { key, columns } = row;

    let mut decoded = Vec::with_capacity(columns.len());
    for item in columns {
        let raw = match item {
            ColumnOrSuperColumn::Column(raw) => raw,
            ColumnOrSuperColumn::SuperColumn(_) => {
                return Err(QueryError::decoding(key, DecodingError::UnexpectedSuperColumn));
            }
        };
        match Column::<S>::from_raw(raw) {
            Ok(column) => decoded.push(column),
            Err(source) => return Err(QueryError::decoding(key, source)),
        }
    }

    Ok(SuperColumn::with_columns(
        column_family,
        key,
        super_column.cloned(),
        decoded,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LongType, Utf8Type};
    use crate::wire::{PredicateRequest, RawColumn, RawSuperColumn};

    #[test]
    fn test_request_scoped_to_super_column() {
        let op = GetSuperColumnRangeSlice::<Utf8Type, LongType>::new(
            KeyRange::keys("a", "z").count(7),
            Some(Utf8Type::from("meta")),
            SlicePredicate::names([LongType(1)]),
        );
        let request = op.request("ks", "Events", ConsistencyLevel::One);

        assert_eq!(request.keyspace, "ks");
        assert_eq!(request.parent.column_family, "Events");
        assert_eq!(request.parent.super_column, Some(b"meta".to_vec()));
        assert_eq!(request.range.count, 7);
        assert_eq!(request.consistency, ConsistencyLevel::One);
        assert_eq!(
            request.predicate,
            PredicateRequest::ColumnNames(vec![1i64.to_be_bytes().to_vec()])
        );
    }

    #[test]
    fn test_request_consistency_override() {
        let op = GetSuperColumnRangeSlice::<Utf8Type, LongType>::new(KeyRange::all(), None, SlicePredicate::all())
            .with_consistency(ConsistencyLevel::All);
        let request = op.request("ks", "Events", ConsistencyLevel::One);

        assert_eq!(request.parent.super_column, None);
        assert_eq!(request.consistency, ConsistencyLevel::All);
    }

    #[test]
    fn test_decode_row() {
        let row = KeySlice::new(
            "k1",
            vec![
                ColumnOrSuperColumn::Column(RawColumn::new(LongType(2).encode(), "b", 5)),
                ColumnOrSuperColumn::Column(RawColumn::new(LongType(1).encode(), "a", 6)),
            ],
        );
        let name = Utf8Type::from("meta");
        let entity = decode_row::<Utf8Type, LongType>("Events", Some(&name), row).unwrap();

        assert_eq!(entity.key(), b"k1");
        assert_eq!(entity.name(), Some(&name));
        let names: Vec<_> = entity.columns().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec![LongType(2), LongType(1)]);
    }

    #[test]
    fn test_decode_row_rejects_super_column_item() {
        let row = KeySlice::new(
            "k1",
            vec![ColumnOrSuperColumn::SuperColumn(RawSuperColumn {
                name: b"meta".to_vec(),
                columns: Vec::new(),
            })],
        );
        let error = decode_row::<Utf8Type, LongType>("Events", None, row).unwrap_err();

        match error {
            QueryError::Decoding { key, source } => {
                assert_eq!(key, b"k1");
                assert_eq!(source, DecodingError::UnexpectedSuperColumn);
            }
            other => panic!("expected decoding error, got {:?}", other),
        }
    }
}
