//! Wire boundary
//!
//! Request and response shapes of the store's range-slice call, and the
//! [`RangeSliceClient`] port a transport implements. Nothing in this crate
//! speaks the protocol itself; operations shape a [`RangeSliceRequest`] and
//! decode the [`KeySlice`]s that come back.
//!
//! ```text
//! list<KeySlice> get_range_slices(keyspace, column_parent, predicate, range, consistency_level)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConsistencyLevel;
use crate::error::RemoteQueryError;

// ═══════════════════════════════════════════════════════════════════════════
// Request Shapes
// ═══════════════════════════════════════════════════════════════════════════

/// Column family addressed by a request, optionally narrowed to one super column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnParent {
    pub column_family: String,
    #[serde(default)]
    pub super_column: Option<Vec<u8>>,
}

impl ColumnParent {
    pub fn new(column_family: impl Into<String>) -> Self {
        Self {
            column_family: column_family.into(),
            super_column: None,
        }
    }

    pub fn with_super_column(mut self, name: Vec<u8>) -> Self {
        self.super_column = Some(name);
        self
    }
}

/// Contiguous run of column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceRangeRequest {
    /// Empty = from the first column
    pub start: Vec<u8>,
    /// Empty = to the last column
    pub finish: Vec<u8>,
    pub reversed: bool,
    pub count: i32,
}

/// Which columns of each row to return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredicateRequest {
    ColumnNames(Vec<Vec<u8>>),
    SliceRange(SliceRangeRequest),
}

/// Which rows to return, by key or by token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRangeRequest {
    pub start_key: Option<Vec<u8>>,
    pub end_key: Option<Vec<u8>>,
    pub start_token: Option<String>,
    pub end_token: Option<String>,
    pub count: i32,
}

/// A complete `get_range_slices` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSliceRequest {
    pub keyspace: String,
    pub parent: ColumnParent,
    pub predicate: PredicateRequest,
    pub range: KeyRangeRequest,
    pub consistency: ConsistencyLevel,
}

// ═══════════════════════════════════════════════════════════════════════════
// Response Shapes
// ═══════════════════════════════════════════════════════════════════════════

/// A column exactly as it came off the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawColumn {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
    /// Microseconds since the epoch, client-assigned
    pub timestamp: i64,
    #[serde(default)]
    pub ttl: Option<i32>,
}

impl RawColumn {
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>, timestamp: i64) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            timestamp,
            ttl: None,
        }
    }
}

/// A super column and its sub-columns, as returned on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSuperColumn {
    pub name: Vec<u8>,
    pub columns: Vec<RawColumn>,
}

/// One entry of a returned row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnOrSuperColumn {
    Column(RawColumn),
    SuperColumn(RawSuperColumn),
}

/// One returned row: its partition key and the selected columns, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySlice {
    pub key: Vec<u8>,
    pub columns: Vec<ColumnOrSuperColumn>,
}

impl KeySlice {
    pub fn new(key: impl Into<Vec<u8>>, columns: Vec<ColumnOrSuperColumn>) -> Self {
        Self {
            key: key.into(),
            columns,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Port Trait: RangeSliceClient
// ═══════════════════════════════════════════════════════════════════════════

/// Transport port for range-slice reads.
///
/// Implementations block until the store answers. Retries, pooling and
/// failover belong to the implementation, not to callers.
///
/// # Implementations
///
/// - `InMemoryClient`: scripted rows for tests and local use
pub trait RangeSliceClient: Send + Sync {
    /// Fetch the rows selected by `request`, in the order the store returns them.
    ///
    /// # Errors
    ///
    /// Any transport or protocol failure, unchanged.
    fn get_range_slices(&self, request: &RangeSliceRequest) -> Result<Vec<KeySlice>, RemoteQueryError>;
}

impl<T: RangeSliceClient + ?Sized> RangeSliceClient for std::sync::Arc<T> {
    fn get_range_slices(&self, request: &RangeSliceRequest) -> Result<Vec<KeySlice>, RemoteQueryError> {
        (**self).get_range_slices(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_parent_scoping() {
        let parent = ColumnParent::new("Posts");
        assert_eq!(parent.super_column, None);

        let parent = parent.with_super_column(b"2024".to_vec());
        assert_eq!(parent.column_family, "Posts");
        assert_eq!(parent.super_column.as_deref(), Some(&b"2024"[..]));
    }

    #[test]
    fn test_request_serde() {
        let request = RangeSliceRequest {
            keyspace: "Blog".to_string(),
            parent: ColumnParent::new("Posts"),
            predicate: PredicateRequest::ColumnNames(vec![b"title".to_vec()]),
            range: KeyRangeRequest {
                start_key: Some(Vec::new()),
                end_key: Some(Vec::new()),
                start_token: None,
                end_token: None,
                count: 10,
            },
            consistency: ConsistencyLevel::One,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"ONE\""));

        let deserialized: RangeSliceRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, request);
    }

    #[test]
    fn test_raw_column_new() {
        let column = RawColumn::new("title", "Hello", 1_700_000_000_000_000);
        assert_eq!(column.name, b"title");
        assert_eq!(column.value, b"Hello");
        assert_eq!(column.ttl, None);
    }
}
