//! Client-side entities materialized from query results
//!
//! Every entity knows its identity and carries a [`MutationTracker`]. The
//! [`crate::context`] module keys attached entities by that identity.

mod column;
mod mutation;
mod super_column;

use std::fmt;

use serde::Serialize;

pub use column::Column;
pub use mutation::{Mutation, MutationTracker, MutationType};
pub use super_column::SuperColumn;

use crate::error::display_key;

/// Where an entity lives: family, partition key and optional sub-partition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntityIdentity {
    pub column_family: String,
    pub key: Vec<u8>,
    pub super_column: Option<Vec<u8>>,
}

impl fmt::Display for EntityIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.column_family, display_key(&self.key))?;
        if let Some(name) = &self.super_column {
            write!(f, "[{}]", display_key(name))?;
        }
        Ok(())
    }
}

/// An entity a context can attach and track
pub trait TrackedEntity: Send + Sync + 'static {
    fn identity(&self) -> EntityIdentity;

    fn mutation_tracker(&self) -> &MutationTracker;

    fn mutation_tracker_mut(&mut self) -> &mut MutationTracker;

    fn has_pending_mutations(&self) -> bool {
        !self.mutation_tracker().is_empty()
    }
}
