//! Connection string field table
//!
//! Every recognized key is described by a [`FieldSpec`]: how to parse the raw
//! text, how to validate the parsed value, what the default is and whether a
//! parse failure is fatal. The resolver evaluates every entry the same way.
//!
//! | key                 | strictness | default | on out-of-range        |
//! |---------------------|------------|---------|------------------------|
//! | Keyspace            | lenient    | ""      | -                      |
//! | Server              | lenient    | default | bad port → default port|
//! | Connection Timeout  | **strict** | 0       | negative → 0           |
//! | Pooling             | lenient    | false   | -                      |
//! | Min Pool Size       | lenient    | 0       | negative → default     |
//! | Max Pool Size       | lenient    | 100     | negative → default     |
//! | Connection Lifetime | lenient    | 0       | negative → 0           |
//! | Read / Write        | lenient    | QUORUM  | -                      |
//! | Username / Password | lenient    | none    | empty → none           |

use super::consistency::ConsistencyLevel;
use super::error::{ConfigError, ConfigResult};
use super::server::Server;
use serde::Serialize;
use std::fmt;

pub const KEYSPACE_KEY: &str = "Keyspace";
pub const SERVER_KEY: &str = "Server";
pub const CONNECTION_TIMEOUT_KEY: &str = "Connection Timeout";
pub const POOLING_KEY: &str = "Pooling";
pub const MIN_POOL_SIZE_KEY: &str = "Min Pool Size";
pub const MAX_POOL_SIZE_KEY: &str = "Max Pool Size";
pub const CONNECTION_LIFETIME_KEY: &str = "Connection Lifetime";
pub const READ_KEY: &str = "Read";
pub const WRITE_KEY: &str = "Write";
pub const USERNAME_KEY: &str = "Username";
pub const PASSWORD_KEY: &str = "Password";

/// Keys in canonical rendering order
pub const KNOWN_KEYS: [&str; 11] = [
    KEYSPACE_KEY,
    SERVER_KEY,
    CONNECTION_TIMEOUT_KEY,
    POOLING_KEY,
    MIN_POOL_SIZE_KEY,
    MAX_POOL_SIZE_KEY,
    CONNECTION_LIFETIME_KEY,
    READ_KEY,
    WRITE_KEY,
    USERNAME_KEY,
    PASSWORD_KEY,
];

pub const DEFAULT_MIN_POOL_SIZE: u32 = 0;
pub const DEFAULT_MAX_POOL_SIZE: u32 = 100;

/// Whether an unparsable value aborts resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Unparsable input is a [`ConfigError::MalformedConfiguration`]
    Strict,
    /// Unparsable input falls back to the default
    Lenient,
}

/// Why a field ended up with a substituted value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultReason {
    Unparsable,
    OutOfRange,
}

impl fmt::Display for DefaultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparsable => write!(f, "unparsable"),
            Self::OutOfRange => write!(f, "out of range"),
        }
    }
}

/// A lenient fallback applied while resolving a connection string.
///
/// Not an error: resolution continues with `substituted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultedField {
    pub key: &'static str,
    pub raw: String,
    pub substituted: String,
    pub reason: DefaultReason,
}

/// Declarative description of one connection string field.
///
/// `R` is the parsed representation, `T` the resolved one. `validate` returns
/// `Err(substitute)` when the parsed value is out of range.
pub struct FieldSpec<R, T> {
    pub key: &'static str,
    pub strictness: Strictness,
    pub parse: fn(&str) -> Option<R>,
    pub validate: fn(R) -> Result<T, T>,
    pub default: fn() -> T,
}

impl<R, T: fmt::Display> FieldSpec<R, T> {
    /// Resolve the raw value (if the key was present) into the field's value.
    pub fn resolve(&self, raw: Option<&str>, report: &mut Vec<DefaultedField>) -> ConfigResult<T> {
        let Some(raw) = raw else {
            return Ok((self.default)());
        };

        match (self.parse)(raw) {
            Some(parsed) => match (self.validate)(parsed) {
                Ok(value) => Ok(value),
                Err(substitute) => {
                    report.push(self.defaulted(raw, &substitute, DefaultReason::OutOfRange));
                    Ok(substitute)
                }
            },
            None => match self.strictness {
                Strictness::Strict => Err(ConfigError::malformed(self.key, raw)),
                Strictness::Lenient => {
                    let value = (self.default)();
                    report.push(self.defaulted(raw, &value, DefaultReason::Unparsable));
                    Ok(value)
                }
            },
        }
    }

    /// Validate an explicitly supplied value, taking the substitute when out of range.
    pub fn admit(&self, value: R) -> T {
        match (self.validate)(value) {
            Ok(value) | Err(value) => value,
        }
    }

    fn defaulted(&self, raw: &str, substituted: &T, reason: DefaultReason) -> DefaultedField {
        DefaultedField {
            key: self.key,
            raw: raw.to_string(),
            substituted: substituted.to_string(),
            reason,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Field Table
// ═══════════════════════════════════════════════════════════════════════════

pub const KEYSPACE: FieldSpec<String, String> = FieldSpec {
    key: KEYSPACE_KEY,
    strictness: Strictness::Lenient,
    parse: parse_text,
    validate: Ok,
    default: String::new,
};

pub const CONNECTION_TIMEOUT: FieldSpec<i32, u32> = FieldSpec {
    key: CONNECTION_TIMEOUT_KEY,
    strictness: Strictness::Strict,
    parse: parse_int,
    validate: clamp_to_zero,
    default: constant::<0>,
};

pub const POOLING: FieldSpec<bool, bool> = FieldSpec {
    key: POOLING_KEY,
    strictness: Strictness::Lenient,
    parse: parse_flag,
    validate: Ok,
    default: disabled,
};

pub const MIN_POOL_SIZE: FieldSpec<i32, u32> = FieldSpec {
    key: MIN_POOL_SIZE_KEY,
    strictness: Strictness::Lenient,
    parse: parse_int,
    validate: non_negative_or::<DEFAULT_MIN_POOL_SIZE>,
    default: constant::<DEFAULT_MIN_POOL_SIZE>,
};

pub const MAX_POOL_SIZE: FieldSpec<i32, u32> = FieldSpec {
    key: MAX_POOL_SIZE_KEY,
    strictness: Strictness::Lenient,
    parse: parse_int,
    validate: non_negative_or::<DEFAULT_MAX_POOL_SIZE>,
    default: constant::<DEFAULT_MAX_POOL_SIZE>,
};

pub const CONNECTION_LIFETIME: FieldSpec<i32, u32> = FieldSpec {
    key: CONNECTION_LIFETIME_KEY,
    strictness: Strictness::Lenient,
    parse: parse_int,
    validate: clamp_to_zero,
    default: constant::<0>,
};

pub const READ: FieldSpec<ConsistencyLevel, ConsistencyLevel> = FieldSpec {
    key: READ_KEY,
    strictness: Strictness::Lenient,
    parse: parse_consistency,
    validate: Ok,
    default: ConsistencyLevel::default,
};

pub const WRITE: FieldSpec<ConsistencyLevel, ConsistencyLevel> = FieldSpec {
    key: WRITE_KEY,
    strictness: Strictness::Lenient,
    parse: parse_consistency,
    validate: Ok,
    default: ConsistencyLevel::default,
};

pub const USERNAME: FieldSpec<String, Credential> = FieldSpec {
    key: USERNAME_KEY,
    strictness: Strictness::Lenient,
    parse: parse_text,
    validate: non_empty,
    default: Credential::absent,
};

pub const PASSWORD: FieldSpec<String, Credential> = FieldSpec {
    key: PASSWORD_KEY,
    strictness: Strictness::Lenient,
    parse: parse_text,
    validate: non_empty,
    default: Credential::absent,
};

/// Resolve the `Server` list.
///
/// Every descriptor inherits `timeout`. A descriptor with an unusable port
/// keeps its host on the default port; an empty list becomes the default server.
pub fn resolve_servers(raw: Option<&str>, timeout: u32, report: &mut Vec<DefaultedField>) -> Vec<Server> {
    let mut servers = Vec::new();

    for descriptor in raw.unwrap_or_default().split(',').map(str::trim) {
        if descriptor.is_empty() {
            continue;
        }

        let (server, rejected_port) = Server::parse_descriptor(descriptor);
        if let Some(port) = rejected_port {
            let digits = port.trim().trim_start_matches(['-', '+']);
            let reason = if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                DefaultReason::OutOfRange
            } else {
                DefaultReason::Unparsable
            };
            report.push(DefaultedField {
                key: SERVER_KEY,
                raw: descriptor.to_string(),
                substituted: server.to_string(),
                reason,
            });
        }
        servers.push(server.with_timeout(timeout));
    }

    if servers.is_empty() {
        servers.push(Server::default().with_timeout(timeout));
    }
    servers
}

// ═══════════════════════════════════════════════════════════════════════════
// Parsers & Validators
// ═══════════════════════════════════════════════════════════════════════════

/// Optional text value (username, password).
///
/// Empty text resolves to absent so that a rendered `Username=;` parses back
/// to the same configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credential(pub Option<String>);

impl Credential {
    fn absent() -> Self {
        Self(None)
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_deref().unwrap_or_default())
    }
}

fn parse_text(raw: &str) -> Option<String> {
    Some(raw.to_string())
}

fn parse_int(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}

fn parse_consistency(raw: &str) -> Option<ConsistencyLevel> {
    raw.parse().ok()
}

fn non_empty(value: String) -> Result<Credential, Credential> {
    Ok(Credential((!value.is_empty()).then_some(value)))
}

fn clamp_to_zero(value: i32) -> Result<u32, u32> {
    u32::try_from(value).map_err(|_| 0)
}

fn non_negative_or<const DEFAULT: u32>(value: i32) -> Result<u32, u32> {
    u32::try_from(value).map_err(|_| DEFAULT)
}

fn constant<const VALUE: u32>() -> u32 {
    VALUE
}

fn disabled() -> bool {
    false
}
