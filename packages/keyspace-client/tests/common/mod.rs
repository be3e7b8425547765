//! Shared test utilities for keyspace-client
//!
//! Fixtures set up a keyspace over an [`InMemoryClient`]; builders assemble
//! wire rows.

#![allow(dead_code)]

mod builders;
mod fixtures;

pub use builders::*;
pub use fixtures::*;
