//! Connection configuration
//!
//! Resolves a [`ConnectionConfig`] from explicit values or from a
//! `Key=Value;` connection string:
//!
//! ```text
//! Keyspace=<string>;Server=<host[:port]>[,<host[:port]>...];
//! Connection Timeout=<int>;Pooling=<bool>;Min Pool Size=<int>;
//! Max Pool Size=<int>;Connection Lifetime=<int>;
//! Read=<consistency>;Write=<consistency>;Username=<string>;Password=<string>
//! ```
//!
//! # Features
//!
//! - **Lenient by default**: malformed values fall back to documented defaults
//!   and are reported as [`DefaultedField`]s, never as errors
//! - **One strict field**: an unparsable `Connection Timeout` is a
//!   [`ConfigError::MalformedConfiguration`]
//! - **Canonical output**: rendering is deterministic and masks the password
//!
//! # Examples
//!
//! ```rust
//! use keyspace_client::config::ConnectionConfig;
//!
//! let config = ConnectionConfig::builder("Blog", "10.0.0.5")
//!     .port(9161)
//!     .pooling(true)
//!     .password("s3cret")
//!     .build();
//!
//! let reparsed = ConnectionConfig::parse(config.connection_string()).unwrap();
//! assert_eq!(reparsed.servers(), config.servers());
//! assert_eq!(reparsed.password().unwrap().expose(), "XXXXXX");
//! ```

pub mod connection;
pub mod consistency;
pub mod error;
pub mod fields;
pub mod server;

// Re-exports
pub use connection::{ConnectionConfig, ConnectionConfigBuilder, Password, PoolPolicy, MASK_CHAR};
pub use consistency::ConsistencyLevel;
pub use error::{ConfigError, ConfigResult};
pub use fields::{DefaultReason, DefaultedField, FieldSpec, Strictness};
pub use server::{Server, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT};
