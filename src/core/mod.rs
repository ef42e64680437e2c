//! Core logger types and traits

pub mod error;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod registry;
pub mod settings;
pub mod sink;
pub mod template;
pub mod timestamp;

pub use error::{LoggerError, Result};
pub use level::Level;
pub use logger::{Dispatch, Log, Logger, WriteErrorCallback, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use record::Record;
pub use registry::{LoggerRegistry, RegistryBuilder, DEFAULT_LEVEL, DEFAULT_NAMESPACE};
pub use settings::{OutputTarget, Settings};
pub use sink::{SharedSink, Sink};
pub use template::{Field, Template, DEFAULT_FORMAT};
pub use timestamp::{TimestampFormat, DEFAULT_TIME_FORMAT};
