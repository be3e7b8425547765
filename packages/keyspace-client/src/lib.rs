//! keyspace-client: typed access to a wide-column store
//!
//! ## Layers
//!
//! 1. **config**: connection settings resolved from a builder or a
//!    `Key=Value;` connection string
//! 2. **types / query**: comparator types and the row/column selectors
//! 3. **wire**: request/response shapes and the [`RangeSliceClient`] port
//! 4. **entity / context**: materialized rows, change tracking and the
//!    identity map they attach to
//! 5. **operations**: [`GetSuperColumnRangeSlice`] and friends
//! 6. **infrastructure**: [`InMemoryClient`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use keyspace_client::*;
//!
//! let config = ConnectionConfig::parse("Keyspace=Blog;Server=10.0.0.5:9160;Read=ONE")?;
//! let keyspace = Keyspace::new(Arc::new(config), client);
//!
//! let mut uow = UnitOfWork::new();
//! let mut posts = keyspace.column_family("Posts", &mut uow);
//!
//! let op = GetSuperColumnRangeSlice::<Utf8Type, LongType>::new(
//!     KeyRange::all().count(20),
//!     Some(Utf8Type::from("comments")),
//!     SlicePredicate::all().reversed().count(5),
//! );
//! for post in op.execute(&mut posts)? {
//!     let post = post?;
//!     println!("{} columns", post.read().len());
//! }
//! ```

pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod infrastructure;
pub mod operations;
pub mod query;
pub mod types;
pub mod wire;

pub use config::{ConfigError, ConnectionConfig, ConsistencyLevel, Server};
pub use context::{Attached, Context, UnitOfWork};
pub use entity::{Column, EntityIdentity, MutationTracker, SuperColumn, TrackedEntity};
pub use error::{DecodingError, QueryError, RemoteQueryError, Result};
pub use infrastructure::InMemoryClient;
pub use operations::{ColumnFamily, GetSuperColumnRangeSlice, Keyspace, RangeSlice};
pub use query::{KeyRange, SlicePredicate};
pub use types::{AsciiType, BytesType, ColumnType, IntegerType, LexicalUuidType, LongType, Utf8Type};
pub use wire::RangeSliceClient;
