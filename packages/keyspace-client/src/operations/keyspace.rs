use std::sync::Arc;

use crate::config::ConnectionConfig;
use crate::context::Context;
use crate::wire::RangeSliceClient;

/// A configured keyspace bound to a transport
///
/// # Examples
///
/// ```rust,ignore
/// let keyspace = Keyspace::new(Arc::new(config), client);
/// let mut uow = UnitOfWork::new();
/// let mut events = keyspace.column_family("Events", &mut uow);
/// ```
#[derive(Debug, Clone)]
pub struct Keyspace<W> {
    config: Arc<ConnectionConfig>,
    client: W,
}

impl<W: RangeSliceClient> Keyspace<W> {
    pub fn new(config: Arc<ConnectionConfig>, client: W) -> Self {
        Self { config, client }
    }

    pub fn name(&self) -> &str {
        self.config.keyspace()
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn client(&self) -> &W {
        &self.client
    }

    /// Open a column family whose results attach to `context`
    pub fn column_family<'a, X: Context>(
        &'a self,
        name: impl Into<String>,
        context: &'a mut X,
    ) -> ColumnFamily<'a, W, X> {
        ColumnFamily {
            keyspace: self,
            name: name.into(),
            context,
        }
    }
}

/// Target of an operation: keyspace, family name and attachment context
pub struct ColumnFamily<'a, W, X> {
    keyspace: &'a Keyspace<W>,
    name: String,
    context: &'a mut X,
}

impl<W: RangeSliceClient, X: Context> ColumnFamily<'_, W, X> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keyspace(&self) -> &Keyspace<W> {
        self.keyspace
    }

    pub fn context(&self) -> &X {
        &*self.context
    }

    pub fn context_mut(&mut self) -> &mut X {
        &mut *self.context
    }

    /// Split into the pieces an executing operation needs
    pub(crate) fn parts(&mut self) -> (&Keyspace<W>, &str, &mut X) {
        (self.keyspace, &self.name, &mut *self.context)
    }
}
