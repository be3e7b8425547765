//! Consistency levels
//!
//! The quorum policy the store applies to a single read or write.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Replica acknowledgement policy for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsistencyLevel {
    /// A single replica
    One,
    /// A majority of replicas
    #[default]
    Quorum,
    /// A majority of replicas in the coordinator's datacenter
    LocalQuorum,
    /// A majority of replicas in every datacenter
    EachQuorum,
    /// Every replica
    All,
    /// Any node, hinted handoff included (writes only)
    Any,
    Two,
    Three,
}

impl ConsistencyLevel {
    pub const ALL_LEVELS: [ConsistencyLevel; 8] = [
        Self::One,
        Self::Quorum,
        Self::LocalQuorum,
        Self::EachQuorum,
        Self::All,
        Self::Any,
        Self::Two,
        Self::Three,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "ONE",
            Self::Quorum => "QUORUM",
            Self::LocalQuorum => "LOCAL_QUORUM",
            Self::EachQuorum => "EACH_QUORUM",
            Self::All => "ALL",
            Self::Any => "ANY",
            Self::Two => "TWO",
            Self::Three => "THREE",
        }
    }

    /// Numeric code used on the wire
    pub fn code(&self) -> i32 {
        match self {
            Self::One => 1,
            Self::Quorum => 2,
            Self::LocalQuorum => 3,
            Self::EachQuorum => 4,
            Self::All => 5,
            Self::Any => 6,
            Self::Two => 7,
            Self::Three => 8,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL_LEVELS.into_iter().find(|level| level.code() == code)
    }
}

impl FromStr for ConsistencyLevel {
    type Err = ConfigError;

    /// Accepts the level name in any case, or its wire code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(code) = trimmed.parse::<i32>() {
            return Self::from_code(code)
                .ok_or_else(|| ConfigError::UnknownConsistencyLevel(s.to_string()));
        }

        Self::ALL_LEVELS
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownConsistencyLevel(s.to_string()))
    }
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_case_insensitive() {
        assert_eq!("ONE".parse::<ConsistencyLevel>().unwrap(), ConsistencyLevel::One);
        assert_eq!("quorum".parse::<ConsistencyLevel>().unwrap(), ConsistencyLevel::Quorum);
        assert_eq!(
            "Local_Quorum".parse::<ConsistencyLevel>().unwrap(),
            ConsistencyLevel::LocalQuorum
        );
        assert_eq!(" all ".parse::<ConsistencyLevel>().unwrap(), ConsistencyLevel::All);
    }

    #[test]
    fn test_parse_wire_codes() {
        assert_eq!("1".parse::<ConsistencyLevel>().unwrap(), ConsistencyLevel::One);
        assert_eq!("5".parse::<ConsistencyLevel>().unwrap(), ConsistencyLevel::All);
        assert!("0".parse::<ConsistencyLevel>().is_err());
        assert!("9".parse::<ConsistencyLevel>().is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let err = "MOST".parse::<ConsistencyLevel>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownConsistencyLevel("MOST".to_string()));
    }

    #[test]
    fn test_display_matches_parse() {
        for level in ConsistencyLevel::ALL_LEVELS {
            assert_eq!(level.to_string().parse::<ConsistencyLevel>().unwrap(), level);
            assert_eq!(ConsistencyLevel::from_code(level.code()), Some(level));
        }
    }

    #[test]
    fn test_default_is_quorum() {
        assert_eq!(ConsistencyLevel::default(), ConsistencyLevel::Quorum);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ConsistencyLevel::EachQuorum).unwrap();
        assert_eq!(json, "\"EACH_QUORUM\"");
    }
}
