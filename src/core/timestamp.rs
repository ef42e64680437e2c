//! Timestamp formatting utilities
//!
//! A logger renders "now" through its [`TimestampFormat`] once per record.
//! Layouts are strftime strings interpreted by `chrono`; a layout that chrono
//! cannot interpret is rendered literally instead of failing.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt::{self, Write};
use std::str::FromStr;

/// Layout used when none is configured: `2025-01-08 10:30:45 +0000`
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use named_logger::TimestampFormat;
///
/// let format = TimestampFormat::from("%Y/%m/%d");
/// assert_eq!(format.layout(), Some("%Y/%m/%d"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampFormat {
    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// strftime layout such as `%d/%b/%Y:%H:%M:%S %z`
    Layout(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Layout(layout) => format_layout(datetime, layout),
        }
    }

    /// Format the current local time
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }

    /// The strftime layout, if this is a layout format
    #[must_use]
    pub fn layout(&self) -> Option<&str> {
        match self {
            TimestampFormat::Layout(layout) => Some(layout),
            _ => None,
        }
    }
}

fn format_layout<Tz>(datetime: &DateTime<Tz>, layout: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(layout).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return layout.to_string();
    }

    let mut out = String::with_capacity(layout.len() + 16);
    if write!(out, "{}", datetime.format_with_items(items.iter())).is_err() {
        return layout.to_string();
    }
    out
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat::Layout(DEFAULT_TIME_FORMAT.to_string())
    }
}

/// Parses a preset name (`rfc3339`, `unix`, `unix_millis`) or, failing that,
/// takes the string as a strftime layout
impl FromStr for TimestampFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "rfc3339" => TimestampFormat::Rfc3339,
            "unix" => TimestampFormat::Unix,
            "unix_millis" => TimestampFormat::UnixMillis,
            layout => TimestampFormat::Layout(layout.to_string()),
        })
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampFormat::Rfc3339 => f.write_str("rfc3339"),
            TimestampFormat::Unix => f.write_str("unix"),
            TimestampFormat::UnixMillis => f.write_str("unix_millis"),
            TimestampFormat::Layout(layout) => f.write_str(layout),
        }
    }
}

impl Serialize for TimestampFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimestampFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(value.parse().unwrap_or_else(|never: Infallible| match never {}))
    }
}

impl From<&str> for TimestampFormat {
    fn from(layout: &str) -> Self {
        TimestampFormat::Layout(layout.to_string())
    }
}

impl From<String> for TimestampFormat {
    fn from(layout: String) -> Self {
        TimestampFormat::Layout(layout)
    }
}
