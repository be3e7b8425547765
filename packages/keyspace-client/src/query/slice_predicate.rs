use super::DEFAULT_COUNT;
use crate::types::ColumnType;
use crate::wire::{PredicateRequest, SliceRangeRequest};

/// Columns to select from each row, either by name or by range.
///
/// Names are typed with the comparator of the level being sliced and stored
/// encoded, so one predicate value can be reused across queries.
///
/// # Examples
///
/// ```rust
/// use keyspace_client::query::SlicePredicate;
/// use keyspace_client::types::LongType;
///
/// let newest_ten = SlicePredicate::range(None::<LongType>, None).reversed().count(10);
/// let picked = SlicePredicate::names([LongType(1), LongType(2)]);
/// # let _ = (newest_ten.to_wire(), picked.to_wire());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlicePredicate {
    Names(Vec<Vec<u8>>),
    Range {
        start: Vec<u8>,
        finish: Vec<u8>,
        reversed: bool,
        count: i32,
    },
}

impl SlicePredicate {
    /// Exactly these columns
    pub fn names<C: ColumnType>(names: impl IntoIterator<Item = C>) -> Self {
        Self::Names(names.into_iter().map(|name| name.encode()).collect())
    }

    /// Columns between `start` and `finish` inclusive; `None` leaves that end open
    pub fn range<C: ColumnType>(start: Option<C>, finish: Option<C>) -> Self {
        Self::Range {
            start: start.map(|c| c.encode()).unwrap_or_default(),
            finish: finish.map(|c| c.encode()).unwrap_or_default(),
            reversed: false,
            count: DEFAULT_COUNT,
        }
    }

    /// The first [`DEFAULT_COUNT`] columns of each row
    pub fn all() -> Self {
        Self::Range {
            start: Vec::new(),
            finish: Vec::new(),
            reversed: false,
            count: DEFAULT_COUNT,
        }
    }

    /// Walk the range from `finish` back to `start`. No effect on name lists.
    pub fn reversed(self) -> Self {
        match self {
            Self::Range {
                start,
                finish,
                count,
                ..
            } => Self::Range {
                start,
                finish,
                reversed: true,
                count,
            },
            names => names,
        }
    }

    /// Column limit per row. No effect on name lists.
    pub fn count(self, count: i32) -> Self {
        match self {
            Self::Range {
                start,
                finish,
                reversed,
                ..
            } => Self::Range {
                start,
                finish,
                reversed,
                count,
            },
            names => names,
        }
    }

    pub fn to_wire(&self) -> PredicateRequest {
        match self {
            Self::Names(names) => PredicateRequest::ColumnNames(names.clone()),
            Self::Range {
                start,
                finish,
                reversed,
                count,
            } => PredicateRequest::SliceRange(SliceRangeRequest {
                start: start.clone(),
                finish: finish.clone(),
                reversed: *reversed,
                count: *count,
            }),
        }
    }
}
