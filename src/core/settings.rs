//! Serializable registry configuration
//!
//! Lets a host application keep its logging setup in a config file instead of
//! wiring level, format, time format and output by hand.
//!
//! ```
//! use named_logger::{Level, Settings};
//!
//! let settings = Settings::from_json(r#"{ "level": "debug", "output": "stdout" }"#).unwrap();
//! assert_eq!(settings.level, Level::DEBUG);
//! ```

use super::error::{LoggerError, Result};
use super::level::Level;
use super::registry::{DEFAULT_LEVEL, DEFAULT_NAMESPACE};
use super::sink::SharedSink;
use super::template::{Template, DEFAULT_FORMAT};
use super::timestamp::TimestampFormat;
use crate::sinks::{ConsoleSink, FileSink};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub namespace: String,
    pub level: Level,
    pub format: String,
    pub time_format: TimestampFormat,
    pub output: OutputTarget,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the namespace and compile the format once
    pub fn validate(&self) -> Result<()> {
        if self.namespace.trim().is_empty() {
            return Err(LoggerError::config(
                "Settings",
                "namespace must not be empty",
            ));
        }
        Template::compile(&self.format)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            level: DEFAULT_LEVEL,
            format: DEFAULT_FORMAT.to_string(),
            time_format: TimestampFormat::default(),
            output: OutputTarget::Stderr,
        }
    }
}

/// Where the default logger writes.
///
/// Serialized as `"stdout"`, `"stderr"`, or a file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputTarget {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl OutputTarget {
    /// Open the target as a sink; files are opened for append
    pub fn open(&self) -> Result<SharedSink> {
        Ok(match self {
            OutputTarget::Stdout => SharedSink::new(ConsoleSink::stdout()),
            OutputTarget::Stderr => SharedSink::new(ConsoleSink::stderr()),
            OutputTarget::File(path) => SharedSink::new(FileSink::open(path)?),
        })
    }
}

impl From<String> for OutputTarget {
    fn from(value: String) -> Self {
        match value.as_str() {
            "stdout" => OutputTarget::Stdout,
            "stderr" => OutputTarget::Stderr,
            _ => OutputTarget::File(PathBuf::from(value)),
        }
    }
}

impl From<OutputTarget> for String {
    fn from(target: OutputTarget) -> Self {
        target.to_string()
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("stdout"),
            OutputTarget::Stderr => f.write_str("stderr"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}
