//! Server descriptors
//!
//! A server is a `(host, port, timeout)` tuple. The connection string renders
//! each one as `host:port`, or `[host]:port` when the host itself contains a
//! colon (IPv6 literals); the timeout always follows `Connection Timeout`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Host used when a configuration names no server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port used when a server omits one or gives an unparsable one
pub const DEFAULT_PORT: u16 = 9160;

/// Connect timeout (seconds) of a bare server descriptor; 0 = no limit
pub const DEFAULT_TIMEOUT: u32 = 0;

/// A single server endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Server {
    host: String,
    port: u16,
    timeout: u32,
}

impl Server {
    /// Create a server with the default timeout
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyspace_client::config::Server;
    ///
    /// let server = Server::new("db1.local", 9161);
    /// assert_eq!(server.to_string(), "db1.local:9161");
    /// ```
    ///
    /// Surrounding whitespace is trimmed from `host`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        let host = match host.trim() {
            trimmed if trimmed.len() == host.len() => host,
            trimmed => trimmed.to_string(),
        };
        Self {
            host,
            port,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Whether the host survives a trip through a connection string
    pub fn has_renderable_host(&self) -> bool {
        !self.host.is_empty() && !self.host.contains([',', ';', '=', '[', ']'])
    }

    /// Same endpoint, different connect timeout
    pub fn with_timeout(self, timeout: u32) -> Self {
        Self { timeout, ..self }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Connect timeout in seconds
    pub fn timeout(&self) -> u32 {
        self.timeout
    }

    /// Connect timeout, `None` meaning "wait indefinitely"
    pub fn connect_timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(u64::from(self.timeout)))
    }

    /// Parse one `host[:port]` or `[host][:port]` descriptor.
    ///
    /// An unbracketed descriptor with more than one colon is a bare IPv6
    /// literal on the default port. Returns the server plus the rejected port
    /// text when the port was present but unusable; in that case the server
    /// carries [`DEFAULT_PORT`].
    pub(crate) fn parse_descriptor(descriptor: &str) -> (Self, Option<&str>) {
        let descriptor = descriptor.trim();

        let (host, port) = match descriptor.strip_prefix('[').and_then(|rest| rest.split_once(']')) {
            Some((host, rest)) => (host, rest.strip_prefix(':')),
            None if descriptor.matches(':').count() > 1 => (descriptor, None),
            None => match descriptor.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (descriptor, None),
            },
        };

        match port {
            None => (Self::new(host, DEFAULT_PORT), None),
            Some(text) => match text.trim().parse::<u16>() {
                Ok(port) => (Self::new(host, port), None),
                Err(_) => (Self::new(host, DEFAULT_PORT), Some(text)),
            },
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
