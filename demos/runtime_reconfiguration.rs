//! Runtime reconfiguration example
//!
//! A plugin logger writes to an event-log appender behind an AND filter chain.
//! The logger level and the appender's level range are changed while the
//! program runs.
//!
//! Run with: cargo run --example runtime_reconfiguration

use connector_logging::prelude::*;

fn main() -> Result<()> {
    println!("=== Connector Logging - Runtime Reconfiguration Example ===\n");

    let event_log = EventLogAppender::with_writer(ComponentNames::PLUGIN, std::io::stdout());
    let repository = Repository::builder()
        .appender(
            "",
            AppenderSlot::new(event_log).with_filter(
                AndFilter::new()
                    .with(FilterPredicate::logger_match(ComponentNames::PLUGIN))
                    .with(FilterPredicate::level_range(LogLevel::Debug, LogLevel::Fatal)),
            ),
        )
        .build()?;

    let log = repository.logger(ComponentNames::PLUGIN);
    let configurator = FilterConfigurator::new(repository.clone());
    let testing = std::io::Error::new(std::io::ErrorKind::Other, "Testing");

    LogFacade::error(&log, "This is error 2", 10, None);

    println!("\n1. Logger raised to ERROR:");
    configurator.set_logger_threshold_for(&log, Some(LogLevel::Error));
    LogFacade::debug(&log, "This is debug 1", 12, None);

    println!("\n2. Logger back to DEBUG:");
    configurator.set_logger_threshold_for(&log, Some(LogLevel::Debug));
    LogFacade::debug(&log, "This is debug 2", 12, None);

    println!("\n3. Event log narrowed to WARN..FATAL:");
    configurator.set_appender_range_for(&log, LogLevel::Warn, LogLevel::Fatal);
    LogFacade::debug(&log, "This is debug x", 18, Some(&testing));
    LogFacade::info(&log, "This is info x", 18, Some(&testing));
    LogFacade::warn(&log, "This is warn x", 18, Some(&testing));
    LogFacade::error(&log, "This is error x", 18, Some(&testing));
    LogFacade::fatal(&log, "This is fatal x", 18, Some(&testing));

    repository.flush()?;

    let metrics = repository.metrics();
    println!(
        "\nWritten: {}, filtered: {}",
        metrics.total_logged(),
        metrics.filtered_count()
    );
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
