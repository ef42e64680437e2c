//! Basic logger usage example
//!
//! Demonstrates the default logger, level thresholds and templates.
//!
//! Run with: cargo run --example basic_usage

use named_logger::prelude::*;
use named_logger::info;

fn main() -> Result<()> {
    println!("=== Named Logger - Basic Usage Example ===\n");

    // Default namespace "main", threshold INFO, standard error output
    let registry = LoggerRegistry::builder()
        .level(Level::DEBUG)
        .output(ConsoleSink::stdout())
        .build()?;

    println!("1. Logging at different levels:");
    registry.debug("This is a debug message");
    registry.info("This is an info message");
    registry.warn("This is a warning message");
    registry.error("This is an error message");

    println!("\n2. Raising the threshold to WARNING:");
    registry.set_level(Level::WARNING);
    registry.debug("Debug message (hidden)");
    registry.info("Info message (hidden)");
    registry.warn("Warning message (visible)");

    println!("\n3. Custom template and time format:");
    registry.set_level(Level::INFO);
    registry
        .set_format("{{.Timestamp}} | {{if .Level}}{{.Level}}{{else}}-{{end}} | {{.Message}}")?
        .set_time_format("%H:%M:%S");
    registry.info("Reformatted record");
    registry.log(Level::new(25), "Custom level without a tag");
    info!(registry, "Formatted with the macro: {} + {} = {}", 1, 2, 1 + 2);

    println!("\n4. Rejected template keeps the previous one:");
    if let Err(err) = registry.set_format("{{.Severity}}") {
        println!("   {}", err);
    }
    registry.info("Still using the previous template");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
