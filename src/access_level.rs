//! Access levels
//!
//! Symbolic GitLab permission tiers and their numeric API codes. The table is
//! compiled in and never mutated; every lookup in both directions goes through
//! [`AccessLevel`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named GitLab permission tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Guest,
    Reporter,
    Developer,
    Maintainer,
    Owner,
}

/// All levels in ascending code order
pub const ACCESS_LEVELS: [AccessLevel; 5] = [
    AccessLevel::Guest,
    AccessLevel::Reporter,
    AccessLevel::Developer,
    AccessLevel::Maintainer,
    AccessLevel::Owner,
];

impl AccessLevel {
    /// Name used in configuration and state
    pub const fn name(self) -> &'static str {
        match self {
            AccessLevel::Guest => "guest",
            AccessLevel::Reporter => "reporter",
            AccessLevel::Developer => "developer",
            AccessLevel::Maintainer => "maintainer",
            AccessLevel::Owner => "owner",
        }
    }

    /// Numeric code understood by the API
    pub const fn code(self) -> i64 {
        match self {
            AccessLevel::Guest => 10,
            AccessLevel::Reporter => 20,
            AccessLevel::Developer => 30,
            AccessLevel::Maintainer => 40,
            AccessLevel::Owner => 50,
        }
    }

    /// Look up a level by its exact configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        ACCESS_LEVELS.iter().copied().find(|level| level.name() == name)
    }

    /// Interpret a raw integer returned by the API as an access level.
    ///
    /// The server reports `group_access_level` as a plain integer sharing the
    /// value domain of the request-side codes (10, 20, 30, 40, 50). Anything
    /// outside that domain is not a level this table knows and yields `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        ACCESS_LEVELS.iter().copied().find(|level| level.code() == code)
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown access level name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown access level: {0}")]
pub struct UnknownAccessLevelName(pub String);

impl FromStr for AccessLevel {
    type Err = UnknownAccessLevelName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownAccessLevelName(s.to_string()))
    }
}

/// Names a group may be granted on a project (everything but "owner")
pub fn shareable_access_levels() -> Vec<&'static str> {
    ACCESS_LEVELS
        .iter()
        .filter(|level| **level != AccessLevel::Owner)
        .map(|level| level.name())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn developer_is_thirty() {
        assert_eq!(AccessLevel::Developer.code(), 30);
        assert_eq!(AccessLevel::from_code(30), Some(AccessLevel::Developer));
    }

    #[test]
    fn every_level_round_trips_through_its_code() {
        for level in ACCESS_LEVELS {
            assert_eq!(AccessLevel::from_code(level.code()), Some(level));
            assert_eq!(AccessLevel::from_name(level.name()), Some(level));
        }
    }

    #[test]
    fn shareable_levels_exclude_owner() {
        let levels = shareable_access_levels();
        assert_eq!(levels, vec!["guest", "reporter", "developer", "maintainer"]);
    }

    #[test]
    fn unknown_codes_and_names_are_rejected() {
        assert_eq!(AccessLevel::from_code(0), None);
        assert_eq!(AccessLevel::from_code(35), None);
        assert_eq!(AccessLevel::from_name("Developer"), None);
        assert!("admin".parse::<AccessLevel>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&AccessLevel::Maintainer).unwrap();
        assert_eq!(json, "\"maintainer\"");
    }
}
