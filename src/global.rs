//! Process-wide default registry
//!
//! Thin free functions over one lazily created [`LoggerRegistry`], for
//! applications that do not want to pass a registry around. Everything here
//! delegates; prefer an explicit registry in libraries and tests.
//!
//! ```no_run
//! use named_logger::{global, Level};
//!
//! global::set_level(Level::DEBUG);
//! global::set_format("{{.Namespace}} {{.Level}}: {{.Message}}").unwrap();
//! global::info("started");
//!
//! let db = global::get_named_logger("db");
//! ```

use crate::core::{
    Level, Log, Logger, LoggerRegistry, Result, SharedSink, TimestampFormat,
};
use std::fmt;
use std::io;
use std::sync::OnceLock;

static REGISTRY: OnceLock<LoggerRegistry> = OnceLock::new();

/// The process-wide registry, created with defaults on first use
pub fn registry() -> &'static LoggerRegistry {
    REGISTRY.get_or_init(LoggerRegistry::new)
}

/// Install a preconfigured registry.
///
/// Only succeeds before the registry has been used; otherwise the registry
/// is handed back.
pub fn install(registry: LoggerRegistry) -> std::result::Result<(), LoggerRegistry> {
    REGISTRY.set(registry)
}

pub fn get_named_logger(namespace: &str) -> Logger {
    registry().get_named_logger(namespace)
}

pub fn set_level(level: Level) {
    registry().set_level(level);
}

pub fn level() -> Level {
    registry().level()
}

pub fn set_format(format: &str) -> Result<()> {
    registry().set_format(format)?;
    Ok(())
}

pub fn set_time_format(format: impl Into<TimestampFormat>) {
    registry().set_time_format(format);
}

pub fn set_output(sink: impl Into<SharedSink>) {
    registry().set_output(sink);
}

pub fn set_handler(sink: impl Into<SharedSink>) {
    registry().set_handler(sink);
}

pub fn flush() -> io::Result<()> {
    registry().flush_all()
}

pub fn log(level: Level, message: impl fmt::Display) {
    registry().log(level, message);
}

pub fn log_all(level: Level, parts: &[&dyn fmt::Display]) {
    registry().log_all(level, parts);
}

pub fn logf(level: Level, args: fmt::Arguments<'_>) {
    registry().logf(level, args);
}

pub fn debug(message: impl fmt::Display) {
    registry().debug(message);
}

pub fn debugf(args: fmt::Arguments<'_>) {
    registry().debugf(args);
}

pub fn info(message: impl fmt::Display) {
    registry().info(message);
}

pub fn infof(args: fmt::Arguments<'_>) {
    registry().infof(args);
}

pub fn warn(message: impl fmt::Display) {
    registry().warn(message);
}

pub fn warnf(args: fmt::Arguments<'_>) {
    registry().warnf(args);
}

pub fn error(message: impl fmt::Display) {
    registry().error(message);
}

pub fn errorf(args: fmt::Arguments<'_>) {
    registry().errorf(args);
}

/// Log at FATAL and exit with status 1 unless the level gate rejects it
pub fn fatal(message: impl fmt::Display) {
    registry().fatal(message);
}

pub fn fatalf(args: fmt::Arguments<'_>) {
    registry().fatalf(args);
}
