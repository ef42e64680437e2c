//! Logging macros for ergonomic log message formatting.
//!
//! These behave like `println!`: the formatted message gets one trailing
//! newline, exactly like the line-oriented [`Log`](crate::Log) methods. The
//! logger can be anything implementing [`Log`](crate::Log), such as a
//! [`Logger`](crate::Logger) or a [`LoggerRegistry`](crate::LoggerRegistry).
//!
//! # Examples
//!
//! ```
//! use named_logger::prelude::*;
//! use named_logger::info;
//!
//! let registry = LoggerRegistry::builder()
//!     .output(MemorySink::new())
//!     .build()
//!     .unwrap();
//!
//! // Basic logging
//! info!(registry, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! let http = registry.get_named_logger("http");
//! info!(http, "Server listening on port {}", port);
//! ```

/// Log a message at any level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use named_logger::prelude::*;
/// # let registry = LoggerRegistry::builder().output(MemorySink::new()).build().unwrap();
/// use named_logger::log;
/// log!(registry, Level::INFO, "Simple message");
/// log!(registry, Level::new(25), "Custom level code: {}", 25);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::Log as _;
        $logger.log($level, format_args!($($arg)+))
    }};
}

/// Log a debug-level message.
///
/// ```
/// # use named_logger::prelude::*;
/// # let registry = LoggerRegistry::builder().output(MemorySink::new()).build().unwrap();
/// use named_logger::debug;
/// debug!(registry, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::WARNING, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::ERROR, $($arg)+)
    };
}

/// Log a fatal-level message, exiting with status 1 if it passes the gate.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::FATAL, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Level, LoggerRegistry};
    use crate::sinks::MemorySink;

    fn registry() -> (LoggerRegistry, MemorySink) {
        let buffer = MemorySink::new();
        let registry = LoggerRegistry::builder()
            .level(Level::DEBUG)
            .format("{{.Level}} {{.Message}}")
            .output(buffer.clone())
            .build()
            .unwrap();
        (registry, buffer)
    }

    #[test]
    fn test_log_macro() {
        let (registry, buffer) = registry();
        log!(registry, Level::INFO, "Test message");
        log!(registry, Level::INFO, "Formatted: {}", 42);
        assert_eq!(buffer.lines(), vec!["INFO Test message", "INFO Formatted: 42"]);
    }

    #[test]
    fn test_leveled_macros() {
        let (registry, buffer) = registry();
        debug!(registry, "Debug message");
        info!(registry, "Items: {}", 100);
        warn!(registry, "Retry {} of {}", 1, 3);
        error!(registry, "Code: {}", 500);

        assert_eq!(
            buffer.lines(),
            vec!["DEBUG Debug message", "INFO Items: 100", "WARN Retry 1 of 3", "ERROR Code: 500"]
        );
    }

    #[test]
    fn test_macro_with_named_logger_reference() {
        let (registry, buffer) = registry();
        let worker = registry.get_named_logger("worker");
        let worker_ref = &worker;
        info!(worker_ref, "via reference");
        assert_eq!(buffer.contents(), "INFO via reference\n");
    }

    #[test]
    fn test_fatal_macro_gated() {
        let (registry, buffer) = registry();
        registry.set_level(Level::DISABLED);
        fatal!(registry, "Critical failure: {}", "system");
        assert!(buffer.is_empty());
    }
}
