//! Logger implementation

use super::{
    error::{LoggerError, Result},
    level::Level,
    metrics::LoggerMetrics,
    record::{self, Record},
    sink::SharedSink,
    template::Template,
    timestamp::TimestampFormat,
};
use parking_lot::RwLock;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit status used when a fatal record terminates the process
pub const FATAL_EXIT_CODE: i32 = 1;

/// Callback invoked with every sink write failure
pub type WriteErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// What happened to a single record.
///
/// Returned by [`Log::emit`] so callers (and tests) can observe the fatal
/// signal without the process being terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Rejected by the level gate, nothing was rendered
    Suppressed,
    /// Rendered and accepted by the sink
    Written,
    /// Rendered, but the sink rejected the write
    Dropped,
    /// A fatal record passed the gate; the caller must terminate
    Fatal,
}

impl Dispatch {
    #[must_use]
    pub fn is_emitted(self) -> bool {
        self != Dispatch::Suppressed
    }

    #[must_use]
    pub fn is_fatal(self) -> bool {
        self == Dispatch::Fatal
    }
}

/// State shared by every logger of one registry
pub(crate) struct Shared {
    threshold: RwLock<Level>,
    metrics: LoggerMetrics,
    on_write_error: Option<WriteErrorCallback>,
    warned: AtomicBool,
}

impl Shared {
    pub(crate) fn new(threshold: Level, on_write_error: Option<WriteErrorCallback>) -> Self {
        Self {
            threshold: RwLock::new(threshold),
            metrics: LoggerMetrics::new(),
            on_write_error,
            warned: AtomicBool::new(false),
        }
    }

    pub(crate) fn threshold(&self) -> Level {
        *self.threshold.read()
    }

    pub(crate) fn set_threshold(&self, level: Level) {
        *self.threshold.write() = level;
    }

    pub(crate) fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Write one rendered record, counting and reporting a failure.
    ///
    /// Returns whether the sink accepted the record.
    pub(crate) fn deliver(&self, sink: &SharedSink, line: &str) -> bool {
        match sink.write_record(line.as_bytes()) {
            Ok(()) => {
                self.metrics.record_written();
                true
            }
            Err(source) => {
                self.report(LoggerError::write(sink.name(), source));
                false
            }
        }
    }

    /// Write failures never reach the logging call site
    fn report(&self, err: LoggerError) {
        self.metrics.record_write_failure();

        match self.on_write_error {
            Some(ref callback) => callback(&err),
            None => {
                if !self.warned.swap(true, Ordering::Relaxed) {
                    eprintln!(
                        "[LOGGER WARNING] {}. Further write failures are only counted.",
                        err
                    );
                }
            }
        }
    }
}

/// One immutable configuration of a logger.
///
/// Setters build a new state and swap it in, so a record is always rendered
/// against a consistent sink/template/time-format triple.
#[derive(Clone)]
pub(crate) struct LoggerState {
    pub(crate) sink: SharedSink,
    pub(crate) template: Arc<Template>,
    pub(crate) time_format: TimestampFormat,
}

impl LoggerState {
    pub(crate) fn new(sink: SharedSink, template: Template, time_format: TimestampFormat) -> Self {
        Self {
            sink,
            template: Arc::new(template),
            time_format,
        }
    }
}

/// The capability set shared by the default logger and every named logger.
///
/// Implementors provide the record dispatch and the three setters; the
/// leveled convenience methods are built on top of [`Log::emit`].
///
/// Line-oriented methods (`log`, `info`, ...) append one newline to the
/// message. Formatted methods (`logf`, `infof`, ...) render their
/// [`fmt::Arguments`] as-is.
pub trait Log {
    fn namespace(&self) -> &str;

    /// Gate, render and write one record without terminating the process.
    ///
    /// `message` is used verbatim as the `Message` field.
    fn emit(&self, level: Level, message: &str) -> Dispatch;

    fn flush(&self) -> io::Result<()>;

    /// Compile and install a new template.
    ///
    /// On error the previous template stays in effect.
    fn set_format(&self, format: &str) -> Result<&Self>;

    /// Never fails; a layout chrono cannot interpret is rendered literally
    fn set_time_format(&self, format: impl Into<TimestampFormat>) -> &Self;

    fn set_output(&self, sink: impl Into<SharedSink>) -> &Self;

    /// Flush and exit with status 1 if `dispatch` carries the fatal signal
    fn exit_on_fatal(&self, dispatch: Dispatch) {
        if dispatch.is_fatal() {
            let _ = self.flush();
            std::process::exit(FATAL_EXIT_CODE);
        }
    }

    fn log(&self, level: Level, message: impl fmt::Display) {
        let dispatch = self.emit(level, &record::line(message));
        self.exit_on_fatal(dispatch);
    }

    /// Log several values joined by single spaces
    fn log_all(&self, level: Level, parts: &[&dyn fmt::Display]) {
        let dispatch = self.emit(level, &record::join_line(parts));
        self.exit_on_fatal(dispatch);
    }

    fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        let dispatch = self.emit(level, &fmt::format(args));
        self.exit_on_fatal(dispatch);
    }

    fn debug(&self, message: impl fmt::Display) {
        self.log(Level::DEBUG, message);
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::DEBUG, args);
    }

    fn info(&self, message: impl fmt::Display) {
        self.log(Level::INFO, message);
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::INFO, args);
    }

    fn warn(&self, message: impl fmt::Display) {
        self.log(Level::WARNING, message);
    }

    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::WARNING, args);
    }

    fn error(&self, message: impl fmt::Display) {
        self.log(Level::ERROR, message);
    }

    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::ERROR, args);
    }

    /// Log at FATAL and exit with status 1 if the record passed the gate
    fn fatal(&self, message: impl fmt::Display) {
        self.log(Level::FATAL, message);
    }

    fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::FATAL, args);
    }
}

/// Handle to one logger's state.
///
/// Clones share identity: a setter called through any clone is observed by
/// all of them.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    namespace: String,
    state: RwLock<Arc<LoggerState>>,
    shared: Arc<Shared>,
}

impl Logger {
    pub(crate) fn with_state(
        namespace: impl Into<String>,
        state: LoggerState,
        shared: Arc<Shared>,
    ) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                namespace: namespace.into(),
                state: RwLock::new(Arc::new(state)),
                shared,
            }),
        }
    }

    /// New logger under `namespace` seeded with a snapshot of this logger's
    /// current sink, template and time format
    pub(crate) fn fork(&self, namespace: &str) -> Logger {
        let state = LoggerState::clone(&self.state());
        Logger::with_state(namespace, state, Arc::clone(&self.inner.shared))
    }

    fn state(&self) -> Arc<LoggerState> {
        Arc::clone(&self.inner.state.read())
    }

    fn update(&self, apply: impl FnOnce(&mut LoggerState)) {
        let mut guard = self.inner.state.write();
        let mut next = LoggerState::clone(&guard);
        apply(&mut next);
        *guard = Arc::new(next);
    }

    /// Source of the installed template
    pub fn format(&self) -> String {
        self.state().template.source().to_string()
    }

    pub fn time_format(&self) -> TimestampFormat {
        self.state().time_format.clone()
    }

    pub fn output(&self) -> SharedSink {
        self.state().sink.clone()
    }

    /// Threshold of the registry this logger belongs to
    pub fn level(&self) -> Level {
        self.inner.shared.threshold()
    }

    /// Whether both handles refer to the same logger
    pub fn same_as(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Render a record with the current configuration without writing it
    pub fn render(&self, level: Level, message: &str) -> String {
        let state = self.state();
        let record = Record::new(
            state.time_format.now(),
            &self.inner.namespace,
            level,
            message,
        );
        state.template.render(&record)
    }
}

impl Log for Logger {
    fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    fn emit(&self, level: Level, message: &str) -> Dispatch {
        let shared = &self.inner.shared;
        if !level.should_emit(shared.threshold()) {
            shared.metrics.record_suppressed();
            return Dispatch::Suppressed;
        }

        let state = self.state();
        let record = Record::new(
            state.time_format.now(),
            &self.inner.namespace,
            level,
            message,
        );
        let line = state.template.render(&record);
        let written = shared.deliver(&state.sink, &line);

        if level.is_fatal() {
            Dispatch::Fatal
        } else if written {
            Dispatch::Written
        } else {
            Dispatch::Dropped
        }
    }

    fn flush(&self) -> io::Result<()> {
        self.state().sink.flush()
    }

    fn set_format(&self, format: &str) -> Result<&Self> {
        let template = Arc::new(Template::compile(format)?);
        self.update(|state| state.template = template);
        Ok(self)
    }

    fn set_time_format(&self, format: impl Into<TimestampFormat>) -> &Self {
        let format = format.into();
        self.update(|state| state.time_format = format);
        self
    }

    fn set_output(&self, sink: impl Into<SharedSink>) -> &Self {
        let sink = sink.into();
        self.update(|state| state.sink = sink);
        self
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Logger")
            .field("namespace", &self.inner.namespace)
            .field("format", &state.template.source())
            .field("time_format", &state.time_format)
            .field("sink", &state.sink)
            .finish()
    }
}
