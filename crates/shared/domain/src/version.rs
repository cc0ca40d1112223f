use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version of the game the settings are loaded for, e.g. `1.16.5`.
///
/// Ordering is lexicographic over `(major, minor, patch)`, so `1.16 < 1.16.5 < 1.17`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl GameVersion {
    /// Oldest version any species is known from.
    pub const BASELINE: Self = Self::new(1, 13, 0);
    /// Version assumed when nothing is configured.
    pub const LATEST: Self = Self::new(1, 21, 0);

    #[must_use]
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self { major, minor, patch }
    }

    /// Shorthand for `1.<minor>`.
    #[must_use]
    pub const fn release(minor: u16) -> Self {
        Self::new(1, minor, 0)
    }
}

impl Default for GameVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}", self.major, self.minor)
        } else {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
        }
    }
}

/// Rejected version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVersionError(pub String);

impl fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid game version '{}', expected <major>.<minor>[.<patch>]", self.0)
    }
}

impl std::error::Error for ParseVersionError {}

impl FromStr for GameVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVersionError(s.to_owned());
        let mut parts = s.trim().split('.');

        let mut next = |required: bool| -> Result<u16, ParseVersionError> {
            match parts.next() {
                Some(part) => part.parse().map_err(|_| invalid()),
                None if required => Err(invalid()),
                None => Ok(0),
            }
        };

        let version = Self::new(next(true)?, next(true)?, next(false)?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl TryFrom<String> for GameVersion {
    type Error = ParseVersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GameVersion> for String {
    fn from(value: GameVersion) -> Self {
        value.to_string()
    }
}
