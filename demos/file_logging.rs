//! File logging example
//!
//! Demonstrates file sinks, settings loaded from JSON and the stdout/stderr
//! split logger.
//!
//! Run with: cargo run --example file_logging

use named_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Named Logger - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("named_logger_demo");
    fs::create_dir_all(&dir)?;
    let app_log = dir.join("app.log");
    let audit_log = dir.join("audit.log");

    println!("1. Registry configured from JSON settings:");
    let settings = Settings {
        output: named_logger::OutputTarget::File(app_log.clone()),
        level: Level::DEBUG,
        ..Settings::default()
    };
    println!("{}", settings.to_json()?);
    let registry = LoggerRegistry::from_settings(&settings)?;
    registry.info("Written to app.log");
    registry.debug("Debug details");

    println!("\n2. A named logger with its own file:");
    let audit = registry.get_named_logger("audit");
    audit.set_output(FileSink::open(&audit_log)?);
    audit.info("User admin logged in");
    registry.flush_all()?;

    println!("   app.log:\n{}", fs::read_to_string(&app_log)?);
    println!("   audit.log:\n{}", fs::read_to_string(&audit_log)?);

    #[cfg(feature = "split")]
    {
        println!("3. Split logger, errors to their own file:");
        let split = SplitLogger::new();
        split.set_err_log_file(dir.join("errors.log"))?;
        split.info("Goes to standard output");
        split.debug("Carries the caller location");
        split.err("Goes to errors.log");
        split.flush()?;
        println!("   errors.log:\n{}", fs::read_to_string(dir.join("errors.log"))?);
    }

    println!("=== Example completed successfully! ===");

    Ok(())
}
