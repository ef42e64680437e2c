//! # Named Logger
//!
//! Leveled logging with templated records and named sub-loggers.
//!
//! ## Features
//!
//! - **Integer Levels**: `DISABLED < FATAL < ERROR < WARNING < INFO < DEBUG`, plus custom levels
//! - **Templates**: record layout from `{{.Timestamp}}`, `{{.Namespace}}`, `{{.Level}}`, `{{.Message}}`
//! - **Named Loggers**: per-namespace sinks, formats and time formats, seeded from the default logger
//! - **Thread Safe**: registry and logger state can be shared across threads
//!
//! ```
//! use named_logger::prelude::*;
//!
//! let buffer = MemorySink::new();
//! let registry = LoggerRegistry::builder()
//!     .format("{{.Namespace}} {{.Level}}: {{.Message}}")
//!     .output(buffer.clone())
//!     .build()
//!     .unwrap();
//!
//! registry.info("ready");
//! registry.get_named_logger("db").warn("slow query");
//!
//! assert_eq!(buffer.contents(), "main INFO: ready\ndb WARN: slow query\n");
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;
#[cfg(feature = "split")]
pub mod split;

pub mod prelude {
    pub use crate::core::{
        Dispatch, Level, Log, Logger, LoggerError, LoggerMetrics, LoggerRegistry, Record,
        RegistryBuilder, Result, Settings, SharedSink, Sink, Template, TimestampFormat,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
    #[cfg(feature = "split")]
    pub use crate::split::{Route, SplitLogger};
}

pub use crate::core::{
    Dispatch, Field, Level, Log, Logger, LoggerError, LoggerMetrics, LoggerRegistry,
    OutputTarget, Record, RegistryBuilder, Result, Settings, SharedSink, Sink, Template,
    TimestampFormat, WriteErrorCallback, DEFAULT_FORMAT, DEFAULT_LEVEL, DEFAULT_NAMESPACE,
    DEFAULT_TIME_FORMAT, FATAL_EXIT_CODE,
};
pub use sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
#[cfg(feature = "split")]
pub use split::{Route, SplitLogger};
