//! Entity attachment
//!
//! A [`Context`] is the identity map and change-tracking scope that
//! materialized entities are registered with. Operations hand every entity
//! they build to the context before returning it, so callers always receive
//! the shared, attached instance.
//!
//! [`UnitOfWork`] is the in-process implementation: a map from
//! [`EntityIdentity`] to the attached entity. Attaching a second entity
//! with the same identity replaces the first: the newest materialization
//! wins and older handles keep working but are no longer tracked. Replacing
//! an entity that still has unsaved mutations logs a warning, since those
//! mutations drop out of [`UnitOfWork::pending`].

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

pub use crate::entity::EntityIdentity;
use crate::entity::TrackedEntity;

/// Shared handle to an attached entity
pub type Attached<E> = Arc<RwLock<E>>;

/// Registration target for materialized entities
pub trait Context {
    /// Register `entity` and return the attached instance
    fn attach<E: TrackedEntity>(&mut self, entity: E) -> Attached<E>;
}

struct Entry {
    entity: Arc<dyn Any + Send + Sync>,
    pending: fn(&(dyn Any + Send + Sync)) -> bool,
}

// A write-locked entity counts as pending.
fn has_pending<E: TrackedEntity>(entity: &(dyn Any + Send + Sync)) -> bool {
    entity
        .downcast_ref::<RwLock<E>>()
        .is_some_and(|e| e.try_read().map_or(true, |e| e.has_pending_mutations()))
}

/// Identity map of attached entities
#[derive(Default)]
pub struct UnitOfWork {
    entries: HashMap<EntityIdentity, Entry>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// The attached entity with this identity, if it has type `E`
    pub fn get<E: TrackedEntity>(&self, identity: &EntityIdentity) -> Option<Attached<E>> {
        let entry = self.entries.get(identity)?;
        Arc::clone(&entry.entity).downcast::<RwLock<E>>().ok()
    }

    pub fn contains(&self, identity: &EntityIdentity) -> bool {
        self.entries.contains_key(identity)
    }

    /// Forget an entity; existing handles stay valid
    pub fn detach(&mut self, identity: &EntityIdentity) -> bool {
        self.entries.remove(identity).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identities of attached entities, sorted
    pub fn identities(&self) -> Vec<EntityIdentity> {
        let mut identities: Vec<_> = self.entries.keys().cloned().collect();
        identities.sort();
        identities
    }

    /// Identities of entities with unsaved mutations, sorted
    pub fn pending(&self) -> Vec<EntityIdentity> {
        let mut identities: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, entry)| (entry.pending)(entry.entity.as_ref()))
            .map(|(identity, _)| identity.clone())
            .collect();
        identities.sort();
        identities
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Context for UnitOfWork {
    /// Index `entity` under its identity, replacing any earlier entry
    fn attach<E: TrackedEntity>(&mut self, entity: E) -> Attached<E> {
        let identity = entity.identity();
        let attached = Arc::new(RwLock::new(entity));

        let entry = Entry {
            entity: Arc::clone(&attached) as Arc<dyn Any + Send + Sync>,
            pending: has_pending::<E>,
        };
        if let Some(replaced) = self.entries.insert(identity.clone(), entry) {
            if (replaced.pending)(replaced.entity.as_ref()) {
                warn!(entity = %identity, "replaced attached entity with unsaved mutations");
            } else {
                debug!(entity = %identity, "replaced attached entity");
            }
        }

        attached
    }
}

impl fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitOfWork")
            .field("entities", &self.identities())
            .finish()
    }
}
