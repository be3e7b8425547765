//! Operations against a column family
//!
//! An operation turns query descriptors into a wire request, sends it
//! through the keyspace's [`RangeSliceClient`](crate::wire::RangeSliceClient)
//! and materializes the response into attached entities.

mod keyspace;
mod range_slice;

pub use keyspace::{ColumnFamily, Keyspace};
pub use range_slice::{GetSuperColumnRangeSlice, RangeSlice};
