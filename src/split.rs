//! Stdout/stderr split logger
//!
//! A fixed-layout logger with two outputs: error and fatal records go to the
//! "stderr" sink, everything else to the "stdout" sink. Lines look like
//!
//! ```text
//! [2025-01-08 10:30:45 +0000] INFO: server started
//! [2025-01-08 10:30:45 +0000] DEBUG: src/main.rs:42: cache warmed
//! ```
//!
//! Debug records carry the caller's source location.

use crate::core::logger::Shared;
use crate::core::{
    Dispatch, Level, LoggerMetrics, Result, SharedSink, TimestampFormat, WriteErrorCallback,
    FATAL_EXIT_CODE,
};
use crate::sinks::{ConsoleSink, FileSink};
use parking_lot::RwLock;
use std::fmt;
use std::io;
use std::panic::Location;
use std::path::Path;

/// Threshold of a new split logger: everything is shown
pub const SPLIT_DEFAULT_LEVEL: Level = Level::DEBUG;

/// Which of the two outputs a record is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Stdout,
    Stderr,
}

pub struct SplitLogger {
    shared: Shared,
    stdout: RwLock<SharedSink>,
    stderr: RwLock<SharedSink>,
    time_format: TimestampFormat,
}

impl SplitLogger {
    /// Split logger writing to the process's standard output and error
    pub fn new() -> Self {
        Self::with_outputs(ConsoleSink::stdout(), ConsoleSink::stderr())
    }

    pub fn with_outputs(stdout: impl Into<SharedSink>, stderr: impl Into<SharedSink>) -> Self {
        Self {
            shared: Shared::new(SPLIT_DEFAULT_LEVEL, None),
            stdout: RwLock::new(stdout.into()),
            stderr: RwLock::new(stderr.into()),
            time_format: TimestampFormat::default(),
        }
    }

    /// Set a callback for sink write failures, replacing the one-time
    /// warning on standard error
    #[must_use = "builder methods return a new value"]
    pub fn on_write_error(mut self, callback: WriteErrorCallback) -> Self {
        self.shared = Shared::new(self.level(), Some(callback));
        self
    }

    pub fn set_level(&self, level: Level) {
        self.shared.set_threshold(level);
    }

    pub fn level(&self) -> Level {
        self.shared.threshold()
    }

    pub fn stdout(&self) -> SharedSink {
        self.stdout.read().clone()
    }

    pub fn stderr(&self) -> SharedSink {
        self.stderr.read().clone()
    }

    pub fn outputs(&self) -> (SharedSink, SharedSink) {
        (self.stdout(), self.stderr())
    }

    pub fn set_stdout(&self, sink: impl Into<SharedSink>) {
        *self.stdout.write() = sink.into();
    }

    pub fn set_stderr(&self, sink: impl Into<SharedSink>) {
        *self.stderr.write() = sink.into();
    }

    /// Send both routes to the same sink
    pub fn set_combined_output(&self, sink: impl Into<SharedSink>) {
        let sink = sink.into();
        *self.stdout.write() = sink.clone();
        *self.stderr.write() = sink;
    }

    /// Append the stdout route to a file; on error the current sink is kept
    pub fn set_std_log_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let sink = FileSink::open(path)?;
        self.set_stdout(sink);
        Ok(())
    }

    /// Append the stderr route to a file; on error the current sink is kept
    pub fn set_err_log_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let sink = FileSink::open(path)?;
        self.set_stderr(sink);
        Ok(())
    }

    /// Append both routes to one file; on error the current sinks are kept
    pub fn set_combined_log_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let sink = FileSink::open(path)?;
        self.set_combined_output(sink);
        Ok(())
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.shared.metrics()
    }

    /// Gate, render and write one record to `route` without terminating
    #[track_caller]
    pub fn emit(&self, level: Level, route: Route, message: impl fmt::Display) -> Dispatch {
        if !level.should_emit(self.level()) {
            self.shared.metrics().record_suppressed();
            return Dispatch::Suppressed;
        }

        let callee = if level >= Level::DEBUG {
            let location = Location::caller();
            format!("{}:{}: ", location.file(), location.line())
        } else {
            String::new()
        };
        let line = format!(
            "[{}] {}: {}{}\n",
            self.time_format.now(),
            level.tag(),
            callee,
            message
        );

        let sink = match route {
            Route::Stdout => self.stdout(),
            Route::Stderr => self.stderr(),
        };
        let written = self.shared.deliver(&sink, &line);

        if level.is_fatal() {
            Dispatch::Fatal
        } else if written {
            Dispatch::Written
        } else {
            Dispatch::Dropped
        }
    }

    /// Log at any level to the stdout route
    #[track_caller]
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        let dispatch = self.emit(level, Route::Stdout, message);
        self.exit_on_fatal(dispatch);
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.emit(Level::DEBUG, Route::Stdout, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.emit(Level::INFO, Route::Stdout, message);
    }

    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.emit(Level::WARNING, Route::Stdout, message);
    }

    #[track_caller]
    pub fn err(&self, message: impl fmt::Display) {
        self.emit(Level::ERROR, Route::Stderr, message);
    }

    /// Log to the stderr route and exit with status 1 if the record passed
    /// the gate
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        let dispatch = self.emit(Level::FATAL, Route::Stderr, message);
        self.exit_on_fatal(dispatch);
    }

    pub fn flush(&self) -> io::Result<()> {
        let (stdout, stderr) = self.outputs();
        stdout.flush()?;
        if !stderr.same_as(&stdout) {
            stderr.flush()?;
        }
        Ok(())
    }

    fn exit_on_fatal(&self, dispatch: Dispatch) {
        if dispatch.is_fatal() {
            let _ = self.flush();
            std::process::exit(FATAL_EXIT_CODE);
        }
    }
}

impl Default for SplitLogger {
    fn default() -> Self {
        Self::new()
    }
}
