//! Log level definitions and the level gate

use super::error::LoggerError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer severity of a record.
///
/// Higher values are more verbose. A record is written when its level is at
/// or below the active threshold. Custom levels can be created with
/// [`Level::new`] and slot in between the predefined ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Level(i32);

impl Level {
    /// Logging disabled entirely
    pub const DISABLED: Level = Level(-1);
    /// Unrecoverable errors, the process exits after writing
    pub const FATAL: Level = Level(0);
    pub const ERROR: Level = Level(10);
    pub const WARNING: Level = Level(20);
    pub const INFO: Level = Level(30);
    /// Everything, including debug output
    pub const DEBUG: Level = Level(40);

    const NAMED: [(Level, &'static str); 6] = [
        (Level::DISABLED, "DISABLED"),
        (Level::FATAL, "FATAL"),
        (Level::ERROR, "ERROR"),
        (Level::WARNING, "WARN"),
        (Level::INFO, "INFO"),
        (Level::DEBUG, "DEBUG"),
    ];

    #[must_use]
    pub const fn new(value: i32) -> Self {
        Level(value)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Tag rendered into the `Level` template field.
    ///
    /// Custom levels and `DISABLED` have an empty tag.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Level::FATAL => "FATAL",
            Level::ERROR => "ERROR",
            Level::WARNING => "WARN",
            Level::INFO => "INFO",
            Level::DEBUG => "DEBUG",
            _ => "",
        }
    }

    /// Level gate: should a record at `self` pass `threshold`?
    #[inline]
    #[must_use]
    pub fn should_emit(self, threshold: Level) -> bool {
        threshold > Level::DISABLED && self <= threshold
    }

    #[inline]
    #[must_use]
    pub fn is_fatal(self) -> bool {
        self == Level::FATAL
    }

    /// The predefined levels, least verbose first
    pub fn named() -> impl Iterator<Item = Level> {
        Self::NAMED.iter().map(|(level, _)| *level)
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Level(value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Self::NAMED.iter().find(|(level, _)| level == self) {
            Some((_, name)) => f.write_str(name),
            None => write!(f, "LEVEL({})", self.0),
        }
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_uppercase();
        // Accept what Display produces for custom levels
        let trimmed = upper
            .strip_prefix("LEVEL(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);
        match upper.as_str() {
            "DISABLED" | "OFF" | "NONE" => Ok(Level::DISABLED),
            "FATAL" => Ok(Level::FATAL),
            "ERROR" | "ERR" => Ok(Level::ERROR),
            "WARN" | "WARNING" => Ok(Level::WARNING),
            "INFO" => Ok(Level::INFO),
            "DEBUG" => Ok(Level::DEBUG),
            _ => trimmed
                .parse::<i32>()
                .map(Level)
                .map_err(|_| LoggerError::level(s)),
        }
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i32),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(Level(value)),
            Repr::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}
