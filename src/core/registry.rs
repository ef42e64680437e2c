//! Named-logger registry
//!
//! [`LoggerRegistry`] owns the default logger, the named loggers created from
//! it and the threshold they all share. A new named logger takes a snapshot
//! of the default logger's sink, template and time format at the moment it
//! is first requested; later changes on either side are not propagated.

use super::{
    error::Result,
    level::Level,
    logger::{Dispatch, Log, Logger, LoggerState, Shared, WriteErrorCallback},
    metrics::LoggerMetrics,
    settings::Settings,
    sink::SharedSink,
    template::Template,
    timestamp::TimestampFormat,
};
use crate::sinks::ConsoleSink;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Namespace of the default logger
pub const DEFAULT_NAMESPACE: &str = "main";

/// Threshold used when none is configured
pub const DEFAULT_LEVEL: Level = Level::INFO;

pub struct LoggerRegistry {
    default: Logger,
    named: RwLock<HashMap<String, Logger>>,
    shared: Arc<Shared>,
}

impl LoggerRegistry {
    /// Registry with the default namespace, threshold, template, time format
    /// and a standard error sink
    #[must_use]
    pub fn new() -> Self {
        Self::assemble(
            DEFAULT_NAMESPACE.to_string(),
            DEFAULT_LEVEL,
            Template::standard(),
            TimestampFormat::default(),
            SharedSink::new(ConsoleSink::stderr()),
            None,
        )
    }

    /// Create a builder for LoggerRegistry
    ///
    /// # Example
    /// ```
    /// use named_logger::prelude::*;
    ///
    /// let registry = LoggerRegistry::builder()
    ///     .level(Level::DEBUG)
    ///     .format("{{.Level}} {{.Message}}")
    ///     .output(MemorySink::new())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(registry.level(), Level::DEBUG);
    /// ```
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Build a registry from deserialized settings, opening its output
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Self::builder()
            .namespace(settings.namespace.clone())
            .level(settings.level)
            .format(settings.format.clone())
            .time_format(settings.time_format.clone())
            .output(settings.output.open()?)
            .build()
    }

    fn assemble(
        namespace: String,
        level: Level,
        template: Template,
        time_format: TimestampFormat,
        sink: SharedSink,
        on_write_error: Option<WriteErrorCallback>,
    ) -> Self {
        let shared = Arc::new(Shared::new(level, on_write_error));
        let state = LoggerState::new(sink, template, time_format);
        Self {
            default: Logger::with_state(namespace, state, Arc::clone(&shared)),
            named: RwLock::new(HashMap::new()),
            shared,
        }
    }

    pub fn default_logger(&self) -> &Logger {
        &self.default
    }

    /// Return the logger for `namespace`, creating it on first use.
    ///
    /// Repeated calls with the same namespace return handles to the same
    /// logger. The default logger's own namespace is not special here: asking
    /// for it creates a separate named logger.
    pub fn get_named_logger(&self, namespace: &str) -> Logger {
        if let Some(logger) = self.named.read().get(namespace) {
            return logger.clone();
        }

        let mut named = self.named.write();
        named
            .entry(namespace.to_string())
            .or_insert_with(|| self.default.fork(namespace))
            .clone()
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.named.read().contains_key(namespace)
    }

    /// Namespaces of the named loggers created so far, sorted
    pub fn namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = self.named.read().keys().cloned().collect();
        namespaces.sort();
        namespaces
    }

    /// Set the threshold shared by the default and every named logger
    pub fn set_level(&self, level: Level) {
        self.shared.set_threshold(level);
    }

    pub fn level(&self) -> Level {
        self.shared.threshold()
    }

    /// Alias of [`Log::set_output`] on the default logger
    pub fn set_handler(&self, sink: impl Into<SharedSink>) -> &Self {
        self.set_output(sink)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.shared.metrics()
    }

    /// Flush the default logger's sink and every named logger's sink
    pub fn flush_all(&self) -> io::Result<()> {
        self.default.flush()?;
        let named: Vec<Logger> = self.named.read().values().cloned().collect();
        for logger in named {
            logger.flush()?;
        }
        Ok(())
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("namespace", &self.default.namespace())
            .field("level", &self.level())
            .field("named", &self.namespaces())
            .finish()
    }
}

/// Top-level calls act on the default logger
impl Log for LoggerRegistry {
    fn namespace(&self) -> &str {
        self.default.namespace()
    }

    fn emit(&self, level: Level, message: &str) -> Dispatch {
        self.default.emit(level, message)
    }

    fn flush(&self) -> io::Result<()> {
        self.default.flush()
    }

    fn set_format(&self, format: &str) -> Result<&Self> {
        self.default.set_format(format)?;
        Ok(self)
    }

    fn set_time_format(&self, format: impl Into<TimestampFormat>) -> &Self {
        self.default.set_time_format(format);
        self
    }

    fn set_output(&self, sink: impl Into<SharedSink>) -> &Self {
        self.default.set_output(sink);
        self
    }
}

/// Builder for constructing a LoggerRegistry with a fluent API
///
/// The template is compiled in [`RegistryBuilder::build`], so an invalid
/// format is reported before any logger exists.
pub struct RegistryBuilder {
    namespace: String,
    level: Level,
    format: Option<String>,
    time_format: TimestampFormat,
    output: Option<SharedSink>,
    on_write_error: Option<WriteErrorCallback>,
}

impl RegistryBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            level: DEFAULT_LEVEL,
            format: None,
            time_format: TimestampFormat::default(),
            output: None,
            on_write_error: None,
        }
    }

    /// Namespace of the default logger
    #[must_use = "builder methods return a new value"]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: impl Into<TimestampFormat>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Sink of the default logger, standard error if not set
    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, sink: impl Into<SharedSink>) -> Self {
        self.output = Some(sink.into());
        self
    }

    /// Set a callback for sink write failures
    ///
    /// # Example
    ///
    /// ```
    /// use named_logger::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let registry = LoggerRegistry::builder()
    ///     .on_write_error(Arc::new(|err: &LoggerError| {
    ///         eprintln!("log write failed: {}", err);
    ///     }))
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn on_write_error(mut self, callback: WriteErrorCallback) -> Self {
        self.on_write_error = Some(callback);
        self
    }

    /// Build the LoggerRegistry
    pub fn build(self) -> Result<LoggerRegistry> {
        let template = match self.format {
            Some(ref format) => Template::compile(format)?,
            None => Template::standard(),
        };
        let sink = self
            .output
            .unwrap_or_else(|| SharedSink::new(ConsoleSink::stderr()));

        Ok(LoggerRegistry::assemble(
            self.namespace,
            self.level,
            template,
            self.time_format,
            sink,
            self.on_write_error,
        ))
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::template::DEFAULT_FORMAT;
    use crate::sinks::MemorySink;

    fn registry() -> (LoggerRegistry, MemorySink) {
        let buffer = MemorySink::new();
        let registry = LoggerRegistry::builder()
            .format("{{.Namespace}} {{.Level}}: {{.Message}}")
            .output(buffer.clone())
            .build()
            .unwrap();
        (registry, buffer)
    }

    #[test]
    fn test_defaults() {
        let registry = LoggerRegistry::new();
        let default = registry.default_logger();

        assert_eq!(default.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(registry.level(), Level::INFO);
        assert_eq!(default.format(), DEFAULT_FORMAT);
        assert_eq!(default.time_format(), TimestampFormat::default());
        assert_eq!(default.output().name(), "stderr");
    }

    #[test]
    fn test_builder_rejects_bad_format() {
        let result = LoggerRegistry::builder().format("{{.Message").build();
        assert!(matches!(result, Err(err) if err.is_template()));
    }

    #[test]
    fn test_same_namespace_same_logger() {
        let (registry, _) = registry();
        let first = registry.get_named_logger("db");
        let second = registry.get_named_logger("db");

        assert!(first.same_as(&second));
        assert_eq!(registry.namespaces(), vec!["db".to_string()]);
    }

    #[test]
    fn test_named_logger_does_not_reseed() {
        let (registry, _) = registry();
        let db = registry.get_named_logger("db");
        db.set_format("{{.Message}}").unwrap();

        registry.set_format("{{.Level}}").unwrap();
        assert_eq!(registry.get_named_logger("db").format(), "{{.Message}}");
    }

    #[test]
    fn test_snapshot_at_creation() {
        let (registry, buffer) = registry();
        registry.set_time_format("%Y");
        let api = registry.get_named_logger("api");

        assert_eq!(api.format(), registry.default_logger().format());
        assert_eq!(api.time_format(), TimestampFormat::from("%Y"));
        assert!(api.output().same_as(&registry.default_logger().output()));

        // Later default changes are not propagated
        registry.set_format("{{.Message}}").unwrap();
        registry.set_output(MemorySink::new());
        api.info("still old format");
        assert_eq!(buffer.contents(), "api INFO: still old format\n");
    }

    #[test]
    fn test_main_namespace_is_separate_named_logger() {
        let (registry, _) = registry();
        let main = registry.get_named_logger(DEFAULT_NAMESPACE);
        assert!(!main.same_as(registry.default_logger()));
        assert!(registry.contains(DEFAULT_NAMESPACE));
    }

    #[test]
    fn test_threshold_shared_by_named_loggers() {
        let (registry, buffer) = registry();
        let worker = registry.get_named_logger("worker");

        registry.set_level(Level::ERROR);
        worker.warn("hidden");
        assert!(buffer.is_empty());
        assert_eq!(worker.level(), Level::ERROR);

        registry.set_level(Level::DEBUG);
        worker.debug("shown");
        assert_eq!(buffer.contents(), "worker DEBUG: shown\n");
    }

    #[test]
    fn test_set_handler_alias() {
        let (registry, _) = registry();
        let other = MemorySink::new();
        registry.set_handler(other.clone()).info("redirected");
        assert_eq!(other.contents(), "main INFO: redirected\n");
    }

    #[test]
    fn test_concurrent_get_named_logger() {
        let (registry, _) = registry();
        let registry = Arc::new(registry);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.get_named_logger("shared"))
            })
            .collect();

        let loggers: Vec<Logger> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for logger in &loggers {
            assert!(logger.same_as(&loggers[0]));
        }
        assert_eq!(registry.namespaces().len(), 1);
    }

    #[test]
    fn test_debug_output() {
        let (registry, _) = registry();
        registry.get_named_logger("db");
        let debug = format!("{:?}", registry);
        assert!(debug.contains("namespace: \"main\""), "{}", debug);
        assert!(debug.contains("level: Level(30)"), "{}", debug);
        assert!(debug.contains("named: [\"db\"]"), "{}", debug);

        assert!(registry.set_format("{{.Bad}}").unwrap_err().is_template());
    }

    #[test]
    fn test_flush_all() {
        let (registry, _) = registry();
        registry.get_named_logger("a").set_output(MemorySink::new());
        registry.get_named_logger("b");
        assert!(registry.flush_all().is_ok());
    }
}
