use super::DEFAULT_COUNT;
use crate::wire::KeyRangeRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Bounds {
    Keys { start: Vec<u8>, end: Vec<u8> },
    Tokens { start: String, end: String },
}

/// A range of partition keys
///
/// # Examples
///
/// ```rust
/// use keyspace_client::query::KeyRange;
///
/// let range = KeyRange::keys("user:100", "user:199").count(50);
/// let request = range.to_wire();
/// assert_eq!(request.start_key.as_deref(), Some(&b"user:100"[..]));
/// assert_eq!(request.count, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    bounds: Bounds,
    count: i32,
}

impl KeyRange {
    /// Rows from `start` to `end` inclusive; empty bounds are open
    pub fn keys(start: impl Into<Vec<u8>>, end: impl Into<Vec<u8>>) -> Self {
        Self {
            bounds: Bounds::Keys {
                start: start.into(),
                end: end.into(),
            },
            count: DEFAULT_COUNT,
        }
    }

    /// Rows whose token falls in `(start, end]`
    pub fn tokens(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            bounds: Bounds::Tokens {
                start: start.into(),
                end: end.into(),
            },
            count: DEFAULT_COUNT,
        }
    }

    /// Every row, up to the count
    pub fn all() -> Self {
        Self::keys(Vec::<u8>::new(), Vec::<u8>::new())
    }

    /// Maximum number of rows
    pub fn count(self, count: i32) -> Self {
        Self { count, ..self }
    }

    pub fn limit(&self) -> i32 {
        self.count
    }

    pub fn to_wire(&self) -> KeyRangeRequest {
        match &self.bounds {
            Bounds::Keys { start, end } => KeyRangeRequest {
                start_key: Some(start.clone()),
                end_key: Some(end.clone()),
                start_token: None,
                end_token: None,
                count: self.count,
            },
            Bounds::Tokens { start, end } => KeyRangeRequest {
                start_key: None,
                end_key: None,
                start_token: Some(start.clone()),
                end_token: Some(end.clone()),
                count: self.count,
            },
        }
    }
}
