//! Keyspace fixtures

use std::sync::Arc;

use keyspace_client::config::{ConnectionConfig, ConsistencyLevel};
use keyspace_client::infrastructure::InMemoryClient;
use keyspace_client::operations::Keyspace;
use keyspace_client::wire::KeySlice;

pub const KEYSPACE: &str = "Blog";
pub const FAMILY: &str = "Events";

/// Configuration with `Read=ONE`
pub fn config() -> Arc<ConnectionConfig> {
    Arc::new(
        ConnectionConfig::builder(KEYSPACE, "127.0.0.1")
            .read_consistency(ConsistencyLevel::One)
            .build(),
    )
}

/// A keyspace whose `Events` family holds `rows` in the given order
pub fn keyspace_with(rows: impl IntoIterator<Item = KeySlice>) -> Keyspace<Arc<InMemoryClient>> {
    let client = Arc::new(InMemoryClient::new());
    for row in rows {
        client.insert_row(KEYSPACE, FAMILY, row);
    }
    Keyspace::new(config(), client)
}
