//! Query shape descriptors
//!
//! - [`KeyRange`]: which rows
//! - [`SlicePredicate`]: which columns of each row
//!
//! Both are immutable values that render themselves into the wire request
//! shape with `to_wire()`.

mod key_range;
mod slice_predicate;

pub use key_range::KeyRange;
pub use slice_predicate::SlicePredicate;

/// Row/column limit applied when a query does not set one
pub const DEFAULT_COUNT: i32 = 100;
