//! Infrastructure layer - transport adapters
//!
//! - [`InMemoryClient`]: rows held in process memory

mod memory_client;

pub use memory_client::InMemoryClient;
