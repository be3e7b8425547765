//! Column comparison types
//!
//! A column family declares how its column names (and super column names)
//! compare. On the Rust side a comparator is a type implementing
//! [`ColumnType`]: it is totally ordered and can be decoded from, and encoded
//! to, the raw bytes carried on the wire.
//!
//! Entities are generic over these types, e.g. `SuperColumn<Utf8Type, LongType>`.

mod builtin;

pub use builtin::{AsciiType, BytesType, IntegerType, LexicalUuidType, LongType, Utf8Type};

use crate::error::DecodingError;
use std::fmt::Debug;

/// An ordered, wire-decodable comparator type
pub trait ColumnType: Ord + Clone + Debug + Send + Sync + 'static {
    /// Comparator name as declared in the column family schema
    const NAME: &'static str;

    /// Decode wire bytes
    ///
    /// # Errors
    ///
    /// Returns [`DecodingError`] when the bytes do not form a valid value.
    fn decode(bytes: &[u8]) -> Result<Self, DecodingError>;

    /// Encode to wire bytes; `decode(encode(x)) == x`
    fn encode(&self) -> Vec<u8>;
}
