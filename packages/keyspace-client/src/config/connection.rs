//! Connection configuration
//!
//! A [`ConnectionConfig`] is built once, either from explicit values through
//! [`ConnectionConfigBuilder`] or from a `Key=Value;` connection string, and is
//! immutable afterwards. Its canonical string is regenerated from the resolved
//! fields every time, so parse → render → parse reaches a fixed point.
//!
//! # Examples
//!
//! ```rust
//! use keyspace_client::config::{ConnectionConfig, ConsistencyLevel};
//!
//! let config: ConnectionConfig = "Keyspace=Blog;Server=db1:9160,db2;Read=ONE;Password=hunter2"
//!     .parse()
//!     .unwrap();
//!
//! assert_eq!(config.servers().len(), 2);
//! assert_eq!(config.read_consistency(), ConsistencyLevel::One);
//! assert!(config.connection_string().ends_with("Password=XXXXXXX;"));
//! ```

use super::consistency::ConsistencyLevel;
use super::error::{ConfigError, ConfigResult};
use super::fields::{self, Credential, DefaultedField};
use super::server::{Server, DEFAULT_HOST, DEFAULT_PORT};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Character used to mask secrets in rendered output
pub const MASK_CHAR: char = 'X';

// ═══════════════════════════════════════════════════════════════════════════
// Password
// ═══════════════════════════════════════════════════════════════════════════

/// A secret that never shows up in `Debug`, `Display` or serialized output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The real secret, for handing to the transport
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Same-length run of [`MASK_CHAR`]
    pub fn masked(&self) -> String {
        std::iter::repeat(MASK_CHAR)
            .take(self.0.chars().count())
            .collect()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password({})", self.masked())
    }
}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.masked())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Pool Policy
// ═══════════════════════════════════════════════════════════════════════════

/// Pool limits a transport must honor when pooling is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolPolicy {
    pub min_size: u32,
    pub max_size: u32,
    /// Seconds; 0 means the implementation's maximum lifetime
    pub lifetime_seconds: u32,
}

impl PoolPolicy {
    /// Age after which a returned connection is replaced, `None` for the
    /// implementation maximum
    pub fn max_lifetime(&self) -> Option<Duration> {
        (self.lifetime_seconds > 0).then(|| Duration::from_secs(u64::from(self.lifetime_seconds)))
    }

    /// Whether a pooled connection of this age must be evicted
    pub fn should_evict(&self, age: Duration) -> bool {
        self.max_lifetime().is_some_and(|lifetime| age > lifetime)
    }

    /// Whether one more concurrent lease is allowed
    pub fn can_lease(&self, leased: u32) -> bool {
        leased < self.max_size
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Connection Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Resolved connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionConfig {
    keyspace: String,
    servers: Vec<Server>,
    connection_timeout: u32,
    pooling: bool,
    min_pool_size: u32,
    max_pool_size: u32,
    connection_lifetime: u32,
    read_consistency: ConsistencyLevel,
    write_consistency: ConsistencyLevel,
    username: Option<String>,
    password: Option<Password>,
    connection_string: String,
}

impl ConnectionConfig {
    /// Start an explicit configuration for `keyspace` on a single `host`
    pub fn builder(keyspace: impl Into<String>, host: impl Into<String>) -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::new(keyspace, host)
    }

    /// Parse a connection string.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MalformedConfiguration`] when `Connection Timeout` is
    /// present but not an integer. Every other malformed field falls back to
    /// its default.
    pub fn parse(connection_string: &str) -> ConfigResult<Self> {
        Self::parse_with_report(connection_string).map(|(config, _)| config)
    }

    /// Parse a connection string and also return every default that was
    /// substituted for a malformed or out-of-range value.
    pub fn parse_with_report(connection_string: &str) -> ConfigResult<(Self, Vec<DefaultedField>)> {
        let pairs = ConnectionPairs::parse(connection_string);
        let mut report = Vec::new();

        let keyspace = fields::KEYSPACE.resolve(pairs.get(fields::KEYSPACE_KEY), &mut report)?;
        let connection_timeout = fields::CONNECTION_TIMEOUT
            .resolve(pairs.get(fields::CONNECTION_TIMEOUT_KEY), &mut report)?;
        let servers = fields::resolve_servers(
            pairs.get(fields::SERVER_KEY),
            connection_timeout,
            &mut report,
        );
        let pooling = fields::POOLING.resolve(pairs.get(fields::POOLING_KEY), &mut report)?;
        let min_pool_size =
            fields::MIN_POOL_SIZE.resolve(pairs.get(fields::MIN_POOL_SIZE_KEY), &mut report)?;
        let max_pool_size =
            fields::MAX_POOL_SIZE.resolve(pairs.get(fields::MAX_POOL_SIZE_KEY), &mut report)?;
        let connection_lifetime = fields::CONNECTION_LIFETIME
            .resolve(pairs.get(fields::CONNECTION_LIFETIME_KEY), &mut report)?;
        let read_consistency = fields::READ.resolve(pairs.get(fields::READ_KEY), &mut report)?;
        let write_consistency = fields::WRITE.resolve(pairs.get(fields::WRITE_KEY), &mut report)?;
        let Credential(username) =
            fields::USERNAME.resolve(pairs.get(fields::USERNAME_KEY), &mut report)?;
        let Credential(password) =
            fields::PASSWORD.resolve(pairs.get(fields::PASSWORD_KEY), &mut report)?;

        for defaulted in &report {
            tracing::warn!(
                field = defaulted.key,
                raw = %defaulted.raw,
                substituted = %defaulted.substituted,
                reason = %defaulted.reason,
                "connection string field fell back to default"
            );
        }

        let config = Self {
            keyspace,
            servers,
            connection_timeout,
            pooling,
            min_pool_size,
            max_pool_size,
            connection_lifetime,
            read_consistency,
            write_consistency,
            username,
            password: password.map(Password),
            connection_string: String::new(),
        }
        .with_canonical_string();

        Ok((config, report))
    }

    fn with_canonical_string(mut self) -> Self {
        self.connection_string = self.render();
        self
    }

    /// Render the canonical connection string with the password masked.
    pub fn render(&self) -> String {
        let servers = self
            .servers
            .iter()
            .map(Server::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let pooling = if self.pooling { "True" } else { "False" };
        let password = self
            .password
            .as_ref()
            .map(Password::masked)
            .unwrap_or_default();

        let values: [String; 11] = [
            self.keyspace.clone(),
            servers,
            self.connection_timeout.to_string(),
            pooling.to_string(),
            self.min_pool_size.to_string(),
            self.max_pool_size.to_string(),
            self.connection_lifetime.to_string(),
            self.read_consistency.to_string(),
            self.write_consistency.to_string(),
            self.username.clone().unwrap_or_default(),
            password,
        ];

        fields::KNOWN_KEYS
            .iter()
            .zip(values)
            .map(|(key, value)| format!("{}={};", key, value))
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════

    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    /// Never empty
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// Connection timeout in seconds
    pub fn connection_timeout(&self) -> u32 {
        self.connection_timeout
    }

    /// Connection timeout, `None` when unlimited (0)
    pub fn connect_timeout(&self) -> Option<Duration> {
        (self.connection_timeout > 0)
            .then(|| Duration::from_secs(u64::from(self.connection_timeout)))
    }

    pub fn pooling(&self) -> bool {
        self.pooling
    }

    pub fn min_pool_size(&self) -> u32 {
        self.min_pool_size
    }

    pub fn max_pool_size(&self) -> u32 {
        self.max_pool_size
    }

    /// Pooled connection lifetime in seconds (0 = implementation maximum)
    pub fn connection_lifetime(&self) -> u32 {
        self.connection_lifetime
    }

    /// Pool limits, `None` when pooling is off
    pub fn pool_policy(&self) -> Option<PoolPolicy> {
        self.pooling.then_some(PoolPolicy {
            min_size: self.min_pool_size,
            max_size: self.max_pool_size,
            lifetime_seconds: self.connection_lifetime,
        })
    }

    pub fn read_consistency(&self) -> ConsistencyLevel {
        self.read_consistency
    }

    pub fn write_consistency(&self) -> ConsistencyLevel {
        self.write_consistency
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }

    /// Canonical rendering, computed at construction
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl FromStr for ConnectionConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.connection_string)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Explicit Builder
// ═══════════════════════════════════════════════════════════════════════════

/// Builder for explicit configurations.
///
/// Numeric setters take signed values and run them through the same
/// validators the parser uses, so `build()` never fails.
#[derive(Debug, Clone)]
pub struct ConnectionConfigBuilder {
    keyspace: String,
    host: String,
    port: u16,
    servers: Option<Vec<Server>>,
    connection_timeout: i32,
    pooling: bool,
    min_pool_size: i32,
    max_pool_size: i32,
    connection_lifetime: i32,
    read_consistency: ConsistencyLevel,
    write_consistency: ConsistencyLevel,
    username: Option<String>,
    password: Option<String>,
}

impl ConnectionConfigBuilder {
    pub fn new(keyspace: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            keyspace: keyspace.into(),
            host: host.into(),
            port: DEFAULT_PORT,
            servers: None,
            connection_timeout: 0,
            pooling: false,
            min_pool_size: fields::DEFAULT_MIN_POOL_SIZE as i32,
            max_pool_size: fields::DEFAULT_MAX_POOL_SIZE as i32,
            connection_lifetime: 0,
            read_consistency: ConsistencyLevel::Quorum,
            write_consistency: ConsistencyLevel::Quorum,
            username: None,
            password: None,
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Replace the single `host:port` server with an explicit list
    pub fn servers(mut self, servers: impl IntoIterator<Item = Server>) -> Self {
        self.servers = Some(servers.into_iter().collect());
        self
    }

    pub fn connection_timeout(mut self, seconds: i32) -> Self {
        self.connection_timeout = seconds;
        self
    }

    pub fn pooling(mut self, pooling: bool) -> Self {
        self.pooling = pooling;
        self
    }

    pub fn min_pool_size(mut self, size: i32) -> Self {
        self.min_pool_size = size;
        self
    }

    pub fn max_pool_size(mut self, size: i32) -> Self {
        self.max_pool_size = size;
        self
    }

    pub fn connection_lifetime(mut self, seconds: i32) -> Self {
        self.connection_lifetime = seconds;
        self
    }

    pub fn read_consistency(mut self, level: ConsistencyLevel) -> Self {
        self.read_consistency = level;
        self
    }

    pub fn write_consistency(mut self, level: ConsistencyLevel) -> Self {
        self.write_consistency = level;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn build(self) -> ConnectionConfig {
        let connection_timeout = fields::CONNECTION_TIMEOUT.admit(self.connection_timeout);

        let mut servers = self
            .servers
            .unwrap_or_else(|| vec![Server::new(self.host, self.port)]);
        if servers.is_empty() {
            servers.push(Server::default());
        }
        let servers = servers
            .into_iter()
            .map(|server| {
                let server = if server.has_renderable_host() {
                    server
                } else {
                    tracing::warn!(
                        host = server.host(),
                        substituted = DEFAULT_HOST,
                        "server host cannot be written to a connection string"
                    );
                    Server::new(DEFAULT_HOST, server.port())
                };
                server.with_timeout(connection_timeout)
            })
            .collect();

        let Credential(username) = fields::USERNAME.admit(self.username.unwrap_or_default());
        let Credential(password) = fields::PASSWORD.admit(self.password.unwrap_or_default());

        ConnectionConfig {
            keyspace: self.keyspace,
            servers,
            connection_timeout,
            pooling: self.pooling,
            min_pool_size: fields::MIN_POOL_SIZE.admit(self.min_pool_size),
            max_pool_size: fields::MAX_POOL_SIZE.admit(self.max_pool_size),
            connection_lifetime: fields::CONNECTION_LIFETIME.admit(self.connection_lifetime),
            read_consistency: self.read_consistency,
            write_consistency: self.write_consistency,
            username,
            password: password.map(Password),
            connection_string: String::new(),
        }
        .with_canonical_string()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Key/Value Splitting
// ═══════════════════════════════════════════════════════════════════════════

/// Case-insensitive `Key=Value` pairs, first occurrence wins.
struct ConnectionPairs {
    pairs: HashMap<String, String>,
}

impl ConnectionPairs {
    fn parse(connection_string: &str) -> Self {
        let mut pairs = HashMap::new();

        for segment in connection_string.split(';') {
            let Some((name, value)) = segment.split_once('=') else {
                continue;
            };
            let name = name.trim();

            if !fields::KNOWN_KEYS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(name))
            {
                tracing::debug!(key = name, "ignoring unknown connection string key");
                continue;
            }

            let normalized = name.to_ascii_lowercase();
            if pairs.contains_key(&normalized) {
                tracing::debug!(key = name, "ignoring duplicate connection string key");
                continue;
            }
            pairs.insert(normalized, value.to_string());
        }

        Self { pairs }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fields::DefaultReason;
    use pretty_assertions::assert_eq;

    const FULL: &str = "Keyspace=Blog;Server=a:9160,b:9161;Connection Timeout=10;Pooling=True;\
                        Min Pool Size=2;Max Pool Size=20;Connection Lifetime=300;Read=ONE;\
                        Write=ALL;Username=admin;Password=hunter2;";

    // ═══════════════════════════════════════════════════════════════════════
    // Parsing
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_parse_full_string() {
        let config = ConnectionConfig::parse(FULL).unwrap();

        assert_eq!(config.keyspace(), "Blog");
        assert_eq!(
            config.servers(),
            &[
                Server::new("a", 9160).with_timeout(10),
                Server::new("b", 9161).with_timeout(10),
            ]
        );
        assert_eq!(config.connection_timeout(), 10);
        assert!(config.pooling());
        assert_eq!(config.min_pool_size(), 2);
        assert_eq!(config.max_pool_size(), 20);
        assert_eq!(config.connection_lifetime(), 300);
        assert_eq!(config.read_consistency(), ConsistencyLevel::One);
        assert_eq!(config.write_consistency(), ConsistencyLevel::All);
        assert_eq!(config.username(), Some("admin"));
        assert_eq!(config.password().map(Password::expose), Some("hunter2"));
    }

    #[test]
    fn test_canonical_string_masks_password() {
        let config = ConnectionConfig::parse(FULL).unwrap();
        assert_eq!(config.connection_string(), FULL.replace("hunter2", "XXXXXXX"));
        assert!(!config.to_string().contains("hunter2"));
    }

    #[test]
    fn test_empty_string_resolves_to_defaults() {
        let config = ConnectionConfig::parse("").unwrap();

        assert_eq!(config.keyspace(), "");
        assert_eq!(config.servers(), &[Server::default()]);
        assert_eq!(config.connection_timeout(), 0);
        assert!(!config.pooling());
        assert_eq!(config.min_pool_size(), 0);
        assert_eq!(config.max_pool_size(), 100);
        assert_eq!(config.connection_lifetime(), 0);
        assert_eq!(config.read_consistency(), ConsistencyLevel::Quorum);
        assert_eq!(config.write_consistency(), ConsistencyLevel::Quorum);
        assert_eq!(config.username(), None);
        assert!(config.password().is_none());
        assert_eq!(
            config.connection_string(),
            "Keyspace=;Server=127.0.0.1:9160;Connection Timeout=0;Pooling=False;Min Pool Size=0;\
             Max Pool Size=100;Connection Lifetime=0;Read=QUORUM;Write=QUORUM;Username=;Password=;"
        );
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let config = ConnectionConfig::parse("keyspace=Blog;SERVER=x:1;max pool size=7").unwrap();
        assert_eq!(config.keyspace(), "Blog");
        assert_eq!(config.servers(), &[Server::new("x", 1)]);
        assert_eq!(config.max_pool_size(), 7);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let config = ConnectionConfig::parse("Keyspace=First;KEYSPACE=Second;Keyspace=Third").unwrap();
        assert_eq!(config.keyspace(), "First");
    }

    #[test]
    fn test_value_split_on_first_equals() {
        let config = ConnectionConfig::parse("Password=a=b=c").unwrap();
        assert_eq!(config.password().map(Password::expose), Some("a=b=c"));
        assert!(config.connection_string().ends_with("Password=XXXXX;"));
    }

    #[test]
    fn test_unknown_keys_and_bare_segments_ignored() {
        let config = ConnectionConfig::parse("Keyspace=Blog;Compression=Snappy;garbage;;").unwrap();
        assert_eq!(config.keyspace(), "Blog");
    }

    #[test]
    fn test_connection_timeout_abc_is_malformed() {
        let err = ConnectionConfig::parse("Connection Timeout=abc").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MalformedConfiguration { ref field, ref value }
                if field == "Connection Timeout" && value == "abc"
        ));
    }

    #[test]
    fn test_max_pool_size_negative_defaults() {
        let (config, report) = ConnectionConfig::parse_with_report("Max Pool Size=-5").unwrap();
        assert_eq!(config.max_pool_size(), 100);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].reason, DefaultReason::OutOfRange);
    }

    #[test]
    fn test_negative_timeout_and_lifetime_clamp_to_zero() {
        let (config, report) =
            ConnectionConfig::parse_with_report("Connection Timeout=-4;Connection Lifetime=-9")
                .unwrap();
        assert_eq!(config.connection_timeout(), 0);
        assert_eq!(config.connection_lifetime(), 0);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_bad_consistency_is_quorum() {
        let config = ConnectionConfig::parse("Read=SOME;Write=").unwrap();
        assert_eq!(config.read_consistency(), ConsistencyLevel::Quorum);
        assert_eq!(config.write_consistency(), ConsistencyLevel::Quorum);
    }

    #[test]
    fn test_server_timeout_follows_connection_timeout() {
        let config = ConnectionConfig::parse("Server=a:9160,c;Connection Timeout=30").unwrap();
        assert!(config.servers().iter().all(|s| s.timeout() == 30));
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_from_str() {
        let config: ConnectionConfig = "Keyspace=Blog".parse().unwrap();
        assert_eq!(config.keyspace(), "Blog");
        assert!("Connection Timeout=soon".parse::<ConnectionConfig>().is_err());
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Rendering
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_render_reaches_fixed_point() {
        let first = ConnectionConfig::parse("server=b:x, c ;Max Pool Size=-1;Pooling=yes").unwrap();
        let second = ConnectionConfig::parse(first.connection_string()).unwrap();
        let third = ConnectionConfig::parse(second.connection_string()).unwrap();

        assert_eq!(first.connection_string(), second.connection_string());
        assert_eq!(second, third);
    }

    #[test]
    fn test_render_is_stable() {
        let config = ConnectionConfig::parse(FULL).unwrap();
        assert_eq!(config.render(), config.render());
        assert_eq!(config.render(), config.connection_string());
    }

    #[test]
    fn test_debug_and_serde_mask_password() {
        let config = ConnectionConfig::parse(FULL).unwrap();

        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("Password(XXXXXXX)"));

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["password"], "XXXXXXX");
        assert_eq!(json["read_consistency"], "ONE");
        assert_eq!(json["servers"][1]["port"], 9161);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Builder
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_builder_defaults() {
        let config = ConnectionConfig::builder("Blog", "db1").build();

        assert_eq!(config.servers(), &[Server::new("db1", 9160)]);
        assert_eq!(config.max_pool_size(), 100);
        assert_eq!(config.read_consistency(), ConsistencyLevel::Quorum);
        assert_eq!(config.write_consistency(), ConsistencyLevel::Quorum);
        assert_eq!(
            config.connection_string(),
            "Keyspace=Blog;Server=db1:9160;Connection Timeout=0;Pooling=False;Min Pool Size=0;\
             Max Pool Size=100;Connection Lifetime=0;Read=QUORUM;Write=QUORUM;Username=;Password=;"
        );
    }

    #[test]
    fn test_builder_absorbs_invalid_numbers() {
        let config = ConnectionConfig::builder("Blog", "db1")
            .connection_timeout(-1)
            .min_pool_size(-2)
            .max_pool_size(-3)
            .connection_lifetime(-4)
            .build();

        assert_eq!(config.connection_timeout(), 0);
        assert_eq!(config.min_pool_size(), 0);
        assert_eq!(config.max_pool_size(), 100);
        assert_eq!(config.connection_lifetime(), 0);
    }

    #[test]
    fn test_builder_round_trips_through_parse() {
        let config = ConnectionConfig::builder("Blog", "db1")
            .port(9170)
            .connection_timeout(5)
            .pooling(true)
            .min_pool_size(1)
            .max_pool_size(8)
            .connection_lifetime(60)
            .read_consistency(ConsistencyLevel::LocalQuorum)
            .write_consistency(ConsistencyLevel::Any)
            .username("app")
            .build();

        let reparsed = ConnectionConfig::parse(config.connection_string()).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_builder_server_override() {
        let config = ConnectionConfig::builder("Blog", "ignored")
            .servers([Server::new("a", 1), Server::new("b", 2)])
            .connection_timeout(3)
            .build();
        assert_eq!(
            config.servers(),
            &[Server::new("a", 1).with_timeout(3), Server::new("b", 2).with_timeout(3)]
        );

        let empty = ConnectionConfig::builder("Blog", "ignored").servers([]).build();
        assert_eq!(empty.servers(), &[Server::default()]);
    }

    #[test]
    fn test_builder_hosts_survive_parse() {
        let config = ConnectionConfig::builder("Blog", "::1").port(9161).build();
        assert_eq!(config.connection_string(), "Keyspace=Blog;Server=[::1]:9161;Connection Timeout=0;\
            Pooling=False;Min Pool Size=0;Max Pool Size=100;Connection Lifetime=0;Read=QUORUM;\
            Write=QUORUM;Username=;Password=;");
        assert_eq!(ConnectionConfig::parse(config.connection_string()).unwrap(), config);

        let padded = ConnectionConfig::builder("Blog", " db1 ").build();
        assert_eq!(padded.servers()[0].host(), "db1");
        assert_eq!(ConnectionConfig::parse(padded.connection_string()).unwrap(), padded);
    }

    #[test]
    fn test_builder_replaces_unrenderable_host() {
        let config = ConnectionConfig::builder("Blog", "a,b;c=d").port(9170).build();
        assert_eq!(config.servers(), &[Server::new(DEFAULT_HOST, 9170)]);
        assert_eq!(ConnectionConfig::parse(config.connection_string()).unwrap(), config);
    }

    #[test]
    fn test_builder_empty_credentials_are_absent() {
        let config = ConnectionConfig::builder("Blog", "db1")
            .username("")
            .password("")
            .build();
        assert_eq!(config.username(), None);
        assert!(config.password().is_none());
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Pool Policy
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_pool_policy() {
        let config = ConnectionConfig::parse("Pooling=True;Max Pool Size=2;Connection Lifetime=60").unwrap();
        let policy = config.pool_policy().unwrap();

        assert!(policy.can_lease(1));
        assert!(!policy.can_lease(2));
        assert!(policy.should_evict(Duration::from_secs(61)));
        assert!(!policy.should_evict(Duration::from_secs(60)));

        assert!(ConnectionConfig::parse("").unwrap().pool_policy().is_none());
    }

    #[test]
    fn test_zero_lifetime_means_implementation_maximum() {
        let config = ConnectionConfig::parse("Pooling=True").unwrap();
        let policy = config.pool_policy().unwrap();

        assert_eq!(policy.max_lifetime(), None);
        assert!(!policy.should_evict(Duration::from_secs(86_400)));
    }

    #[test]
    fn test_password_mask_counts_chars() {
        let password = Password::new("pässwörd");
        assert_eq!(password.masked(), "XXXXXXXX");
        assert_eq!(format!("{:?}", password), "Password(XXXXXXXX)");
    }
}
