//! Basic usage example
//!
//! Demonstrates a repository with a console appender, the logger hierarchy,
//! context properties and event-id tagged messages.
//!
//! Run with: cargo run --example basic_usage

use connector_logging::prelude::*;
use connector_logging::{info_event, warn_event};

fn main() -> Result<()> {
    println!("=== Connector Logging - Basic Usage Example ===\n");

    let repository = Repository::builder()
        .root_level(LogLevel::Debug)
        .appender("", AppenderSlot::new(ConsoleAppender::new()))
        .global_property("service", "connector")
        .build()?;

    // Loggers inherit their level from the nearest configured ancestor
    println!("1. Logger hierarchy:");
    let base = repository.logger(ComponentNames::BASE);
    let host = repository.logger(ComponentNames::HOST);
    host.debug("Host debug message (visible)");
    base.set_level(Some(LogLevel::Info));
    host.debug("Host debug message (hidden, inherited INFO)");
    host.info("Host info message (visible)");

    println!("\n2. Event ids:");
    let plugin = repository.logger(ComponentNames::PLUGIN);
    LogFacade::info(&plugin, "Plugin loaded", 8, None);
    info_event!(plugin, 9, "Syncing {} companies", 3);

    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "sage server did not answer");
    warn_event!(plugin, 18, err = &err; "Retrying company {}", "ACME");

    println!("\n3. Call-scoped context:");
    CallContext::scope(|| {
        let _request = repository
            .context()
            .guard(ContextScope::CallScoped, "request", "r-42");
        plugin.info("Inside the request");
    });
    plugin.info("After the request");

    repository.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
