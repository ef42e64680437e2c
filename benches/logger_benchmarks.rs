//! Criterion benchmarks for named_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use named_logger::prelude::*;
use std::io;

/// Sink that discards everything, so benchmarks measure the logger only
struct NullSink;

impl Sink for NullSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn null_registry(level: Level) -> LoggerRegistry {
    LoggerRegistry::builder()
        .level(level)
        .output(NullSink)
        .build()
        .expect("Failed to build registry")
}

// ============================================================================
// Template Benchmarks
// ============================================================================

fn bench_template(c: &mut Criterion) {
    let mut group = c.benchmark_group("template");

    group.bench_function("compile_default", |b| {
        b.iter(|| Template::compile(black_box(named_logger::DEFAULT_FORMAT)))
    });

    group.bench_function("compile_conditional", |b| {
        b.iter(|| {
            Template::compile(black_box(
                "{{if .Level}}[{{.Level}}] {{end}}{{- .Namespace -}}: {{.Message}}",
            ))
        })
    });

    let template = Template::standard();
    let record = Record::new(
        "2025-01-08 10:30:45 +0000".to_string(),
        "main",
        Level::INFO,
        "request handled\n",
    );
    group.throughput(Throughput::Elements(1));
    group.bench_function("render_default", |b| {
        b.iter(|| black_box(template.render(black_box(&record))))
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let registry = null_registry(Level::DEBUG);
    group.bench_function("info", |b| {
        b.iter(|| registry.info(black_box("Info message")))
    });

    group.bench_function("infof", |b| {
        b.iter(|| registry.infof(format_args!("Request {} took {}ms", black_box(42), 7)))
    });

    let named = registry.get_named_logger("bench");
    group.bench_function("named_info", |b| {
        b.iter(|| named.info(black_box("Info message")))
    });

    let memory = LoggerRegistry::builder()
        .output(MemorySink::new())
        .build()
        .expect("Failed to build registry");
    group.bench_function("memory_sink", |b| {
        b.iter(|| memory.warn(black_box("Buffered message")))
    });

    group.finish();
}

fn bench_suppressed(c: &mut Criterion) {
    let mut group = c.benchmark_group("suppressed");
    group.throughput(Throughput::Elements(1));

    let registry = null_registry(Level::ERROR);
    group.bench_function("debug_below_threshold", |b| {
        b.iter(|| registry.debug(black_box("Filtered message")))
    });

    let disabled = null_registry(Level::DISABLED);
    group.bench_function("disabled", |b| {
        b.iter(|| disabled.error(black_box("Filtered message")))
    });

    group.finish();
}

// ============================================================================
// Registry Benchmarks
// ============================================================================

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    let registry = null_registry(Level::INFO);
    registry.get_named_logger("existing");
    group.bench_function("get_existing", |b| {
        b.iter(|| black_box(registry.get_named_logger(black_box("existing"))))
    });

    let mut n = 0u64;
    group.bench_function("create_named", |b| {
        b.iter(|| {
            n += 1;
            black_box(registry.get_named_logger(&format!("logger-{}", n)))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_template,
    bench_logging,
    bench_suppressed,
    bench_registry
);
criterion_main!(benches);
