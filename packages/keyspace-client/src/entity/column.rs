use crate::error::DecodingError;
use crate::types::ColumnType;
use crate::wire::RawColumn;

/// A decoded column: typed name, raw value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<S> {
    pub name: S,
    pub value: Vec<u8>,
    /// Microseconds since the epoch
    pub timestamp: i64,
    pub ttl: Option<i32>,
}

impl<S: ColumnType> Column<S> {
    pub fn new(name: S, value: impl Into<Vec<u8>>, timestamp: i64) -> Self {
        Self {
            name,
            value: value.into(),
            timestamp,
            ttl: None,
        }
    }

    /// Decode the name of a wire column; the value stays as bytes
    pub fn from_raw(raw: RawColumn) -> Result<Self, DecodingError> {
        Ok(Self {
            name: S::decode(&raw.name)?,
            value: raw.value,
            timestamp: raw.timestamp,
            ttl: raw.ttl,
        })
    }

    /// Interpret the value with another comparator type
    pub fn value_as<V: ColumnType>(&self) -> Result<V, DecodingError> {
        V::decode(&self.value)
    }
}
