//! Named logger example
//!
//! Demonstrates per-namespace loggers, their snapshot of the default logger's
//! configuration, and independent outputs.
//!
//! Run with: cargo run --example named_loggers

use named_logger::prelude::*;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Named Logger - Named Loggers Example ===\n");

    let registry = LoggerRegistry::builder()
        .format("[{{.Timestamp}}] {{.Namespace}} {{.Level}}: {{.Message}}")
        .time_format("%H:%M:%S%.3f")
        .output(ConsoleSink::stdout())
        .build()?;

    println!("1. Named loggers start with the default logger's configuration:");
    let db = registry.get_named_logger("db");
    let http = registry.get_named_logger("http");
    registry.info("Application starting");
    db.info("Connection pool ready");
    http.info("Listening on :8080");

    println!("\n2. Changing a named logger leaves the others alone:");
    http.set_format("{{.Namespace}} >> {{.Message}}")?;
    http.warn("Slow client");
    db.warn("Slow query");

    println!("\n3. Later changes to the default are not propagated:");
    registry.set_format("{{.Level}}: {{.Message}}")?;
    registry.info("Default logger reformatted");
    db.info("Still the layout it started with");
    let cache = registry.get_named_logger("cache");
    cache.info("Created after the change, so it picks up the new layout");

    println!("\n4. Loggers are shared across threads:");
    let registry = Arc::new(registry);
    let handles: Vec<_> = (0..3)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let worker = registry.get_named_logger("worker");
                worker.infof(format_args!("Worker thread {} running\n", i));
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.join();
    }

    println!("\n   Known namespaces: {:?}", registry.namespaces());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
