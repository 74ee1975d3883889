//! Criterion benchmarks for connector_logging

use connector_logging::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

/// Discards everything so only filtering and dispatch are measured
struct NullAppender;

impl Appender for NullAppender {
    fn append(&mut self, event: &LogEvent) -> connector_logging::Result<()> {
        black_box(event);
        Ok(())
    }

    fn flush(&mut self) -> connector_logging::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn event_log_chain() -> AndFilter {
    AndFilter::new()
        .with(FilterPredicate::logger_match(ComponentNames::PLUGIN))
        .with(FilterPredicate::level_range(LogLevel::Warn, LogLevel::Fatal))
}

// ============================================================================
// Filter Benchmarks
// ============================================================================

fn bench_and_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("and_filter");
    group.throughput(Throughput::Elements(1));

    let chain = event_log_chain();
    let accepted = LogEvent::new(ComponentNames::PLUGIN, LogLevel::Error, "accepted");
    let wrong_logger = LogEvent::new(ComponentNames::HOST, LogLevel::Error, "wrong logger");
    let below_range = LogEvent::new(ComponentNames::PLUGIN, LogLevel::Debug, "below range");

    group.bench_function("accept", |b| {
        b.iter(|| black_box(chain.decide(Some(black_box(&accepted)))));
    });

    group.bench_function("deny_logger", |b| {
        b.iter(|| black_box(chain.decide(Some(black_box(&wrong_logger)))));
    });

    group.bench_function("deny_range", |b| {
        b.iter(|| black_box(chain.decide(Some(black_box(&below_range)))));
    });

    group.finish();
}

// ============================================================================
// Facade Benchmarks
// ============================================================================

fn bench_facade(c: &mut Criterion) {
    let mut group = c.benchmark_group("facade");
    group.throughput(Throughput::Elements(1));

    let repository = Repository::new();
    repository.add_appender(
        "",
        AppenderSlot::new(NullAppender).with_filter(event_log_chain()),
    );
    let logger = repository.logger(ComponentNames::PLUGIN);
    logger.set_level(Some(LogLevel::Info));

    group.bench_function("disabled_level", |b| {
        b.iter(|| LogFacade::debug(&logger, black_box("This is debug 1"), 12, None));
    });

    group.bench_function("enabled_filtered", |b| {
        b.iter(|| LogFacade::info(&logger, black_box("This is info x"), 18, None));
    });

    group.bench_function("enabled_written", |b| {
        b.iter(|| LogFacade::error(&logger, black_box("This is error 2"), 10, None));
    });

    group.finish();
}

// ============================================================================
// Context Benchmarks
// ============================================================================

fn bench_context(c: &mut Criterion) {
    let mut group = c.benchmark_group("context");
    group.throughput(Throughput::Elements(1));

    let store = ContextStore::new();
    store.set(ContextScope::Global, "service", "connector");
    store.set(ContextScope::Global, "site", "eu-west");

    group.bench_function("global_set_clear", |b| {
        b.iter(|| {
            store.set(ContextScope::Global, "request", black_box(42));
            black_box(store.clear(ContextScope::Global, "request"))
        });
    });

    group.bench_function("call_set_clear", |b| {
        b.iter(|| {
            store.set(ContextScope::CallScoped, EVENT_ID_PROPERTY, black_box(42));
            black_box(store.clear(ContextScope::CallScoped, EVENT_ID_PROPERTY))
        });
    });

    group.bench_function("snapshot", |b| {
        b.iter(|| black_box(store.snapshot()));
    });

    group.finish();
}

criterion_group!(benches, bench_and_filter, bench_facade, bench_context);
criterion_main!(benches);
