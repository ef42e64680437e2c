//! Fatal records terminate the process with status 1
//!
//! Each check re-runs this test binary, filtered down to a single child test
//! that only does something when the log path is passed in the environment.

use named_logger::prelude::*;
use named_logger::FATAL_EXIT_CODE;
use std::env;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const LOG_PATH_VAR: &str = "NAMED_LOGGER_FATAL_LOG";

/// Run `child` in a subprocess writing to a fresh log file
fn run_child(child: &str) -> (Option<i32>, String) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("fatal.log");

    let output = Command::new(env::current_exe().expect("Failed to locate test binary"))
        .args(["--exact", child, "--nocapture", "--test-threads=1"])
        .env(LOG_PATH_VAR, &log_file)
        .output()
        .expect("Failed to spawn child test");

    let content = fs::read_to_string(&log_file).unwrap_or_default();
    (output.status.code(), content)
}

fn child_registry() -> Option<LoggerRegistry> {
    let path = env::var_os(LOG_PATH_VAR)?;
    let registry = LoggerRegistry::builder()
        .format("{{.Level}} {{.Message}}")
        .output(FileSink::open(path).expect("Failed to open log file"))
        .build()
        .expect("Failed to build registry");
    Some(registry)
}

#[test]
fn child_fatal() {
    if let Some(registry) = child_registry() {
        registry.fatal("boom");
        // Unreachable when the fatal record passes the gate
        registry.info("after fatal");
    }
}

#[test]
fn child_named_fatalf() {
    if let Some(registry) = child_registry() {
        let worker = registry.get_named_logger("worker");
        worker.fatalf(format_args!("code {}", 7));
        worker.info("after fatal");
    }
}

#[test]
fn child_disabled_fatal() {
    if let Some(registry) = child_registry() {
        registry.set_level(Level::DISABLED);
        registry.fatal("suppressed");
        registry.set_level(Level::INFO);
        registry.info("survived");
    }
}

#[test]
fn test_fatal_exits_with_status_one() {
    let (code, content) = run_child("child_fatal");
    assert_eq!(code, Some(FATAL_EXIT_CODE));
    assert_eq!(content.trim(), "FATAL boom");
}

#[test]
fn test_named_logger_fatalf_exits() {
    let (code, content) = run_child("child_named_fatalf");
    assert_eq!(code, Some(1));
    assert_eq!(content, "FATAL code 7");
}

#[test]
fn test_suppressed_fatal_does_not_exit() {
    let (code, content) = run_child("child_disabled_fatal");
    assert_eq!(code, Some(0));
    assert_eq!(content, "INFO survived\n");
}

#[cfg(feature = "split")]
mod split {
    use super::*;
    use named_logger::SplitLogger;

    #[test]
    fn child_split_fatal() {
        if let Some(path) = env::var_os(LOG_PATH_VAR) {
            let logger = SplitLogger::new();
            logger.set_combined_log_file(path).expect("Failed to open log file");
            logger.fatal("split boom");
            logger.info("after fatal");
        }
    }

    #[test]
    fn test_split_fatal_exits() {
        let (code, content) = run_child("split::child_split_fatal");
        assert_eq!(code, Some(1));
        assert!(content.ends_with("] FATAL: split boom\n"), "{:?}", content);
    }
}
