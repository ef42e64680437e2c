//! Per-call log record

use super::level::Level;
use std::fmt::{self, Write};

/// Values substituted into a template for a single log call.
///
/// Exists only for the duration of one format-and-write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    pub timestamp: String,
    pub namespace: &'a str,
    pub level: Level,
    pub message: &'a str,
}

impl<'a> Record<'a> {
    pub fn new(timestamp: String, namespace: &'a str, level: Level, message: &'a str) -> Self {
        Self {
            timestamp,
            namespace,
            level,
            message,
        }
    }
}

/// Render a message the way line-oriented calls do: display it and append
/// exactly one newline.
pub fn line(message: impl fmt::Display) -> String {
    let mut out = String::new();
    // Writing into a String only fails if the Display impl itself errors.
    let _ = write!(out, "{}", message);
    out.push('\n');
    out
}

/// Join arguments with single spaces and append one newline.
pub fn join_line(parts: &[&dyn fmt::Display]) -> String {
    let mut out = String::new();
    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", part);
    }
    out.push('\n');
    out
}
