//! The logger repository: hierarchy, appender registry and global context
//!
//! A [`Repository`] is constructed explicitly and passed to whatever needs it.
//! Services create one at startup and share it (it is a cheap `Arc` clone);
//! tests build as many independent repositories as they like.

use super::{
    appender::{AppenderSlot, SharedAppender},
    context::{ContextStore, FieldValue},
    error::Result,
    log_event::LogEvent,
    log_level::LogLevel,
    logger::{Logger, LoggerNode},
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Registry name of the appender [`Repository::events`] reads from
pub const MEMORY_APPENDER_NAME: &str = "MemoryAppender";

struct RepositoryInner {
    root: Arc<LoggerNode>,
    loggers: RwLock<HashMap<String, Arc<LoggerNode>>>,
    appenders: RwLock<Vec<SharedAppender>>,
    context: ContextStore,
    threshold: RwLock<LogLevel>,
    metrics: LoggerMetrics,
}

#[derive(Clone)]
pub struct Repository {
    inner: Arc<RepositoryInner>,
}

impl Repository {
    /// Empty repository: root level `Debug`, threshold `Trace`, no appenders
    #[must_use]
    pub fn new() -> Self {
        Self::with_root_level(LogLevel::Debug)
    }

    fn with_root_level(level: LogLevel) -> Self {
        Self {
            inner: Arc::new(RepositoryInner {
                root: Arc::new(LoggerNode::new("root", Some(level))),
                loggers: RwLock::new(HashMap::new()),
                appenders: RwLock::new(Vec::new()),
                context: ContextStore::new(),
                threshold: RwLock::new(LogLevel::Trace),
                metrics: LoggerMetrics::new(),
            }),
        }
    }

    #[must_use]
    pub fn builder() -> RepositoryBuilder {
        RepositoryBuilder::new()
    }

    pub fn root(&self) -> Logger {
        self.handle(Arc::clone(&self.inner.root))
    }

    /// Get the logger called `name`, creating it if needed
    ///
    /// An empty name, or the root's own name, refers to the root logger.
    pub fn logger(&self, name: &str) -> Logger {
        if name.is_empty() || name == self.inner.root.name {
            return self.root();
        }
        if let Some(node) = self.inner.loggers.read().get(name) {
            return self.handle(Arc::clone(node));
        }
        let node = Arc::clone(
            self.inner
                .loggers
                .write()
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(LoggerNode::new(name, None))),
        );
        self.handle(node)
    }

    /// Get the logger called `name` only if it already exists
    ///
    /// The root always exists, under an empty name or its own name.
    pub fn exists(&self, name: &str) -> Option<Logger> {
        if name.is_empty() || name == self.inner.root.name {
            return Some(self.root());
        }
        self.inner
            .loggers
            .read()
            .get(name)
            .map(|node| self.handle(Arc::clone(node)))
    }

    /// Every logger created so far, excluding the root
    pub fn current_loggers(&self) -> Vec<Logger> {
        self.inner
            .loggers
            .read()
            .values()
            .map(|node| self.handle(Arc::clone(node)))
            .collect()
    }

    fn handle(&self, node: Arc<LoggerNode>) -> Logger {
        Logger {
            node,
            repository: self.clone(),
        }
    }

    /// Register `slot` and attach it to the logger called `logger_name`
    pub fn add_appender(&self, logger_name: &str, slot: AppenderSlot) -> SharedAppender {
        let shared = slot.into_shared();
        self.inner.appenders.write().push(Arc::clone(&shared));
        self.logger(logger_name)
            .node
            .appenders
            .write()
            .push(Arc::clone(&shared));
        shared
    }

    /// Every registered appender, in registration order
    pub fn appenders(&self) -> Vec<SharedAppender> {
        self.inner.appenders.read().clone()
    }

    pub fn appender(&self, name: &str) -> Option<SharedAppender> {
        self.inner
            .appenders
            .read()
            .iter()
            .find(|slot| slot.lock().name() == name)
            .cloned()
    }

    pub fn context(&self) -> &ContextStore {
        &self.inner.context
    }

    /// Repository-wide minimum level, applied before any logger level
    pub fn threshold(&self) -> LogLevel {
        *self.inner.threshold.read()
    }

    pub fn set_threshold(&self, level: LogLevel) {
        *self.inner.threshold.write() = level;
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    /// Events held by the appender registered as [`MEMORY_APPENDER_NAME`]
    ///
    /// With `exact` the logger name must equal `logger_filter`; otherwise it
    /// must start with it. No memory appender yields an empty list.
    pub fn events(&self, logger_filter: &str, exact: bool) -> Vec<LogEvent> {
        let Some(slot) = self.appender(MEMORY_APPENDER_NAME) else {
            return Vec::new();
        };
        let events = slot.lock().buffered_events().unwrap_or_default();
        events
            .into_iter()
            .filter(|event| {
                if exact {
                    event.logger_name == logger_filter
                } else {
                    event.logger_name.starts_with(logger_filter)
                }
            })
            .collect()
    }

    pub fn flush(&self) -> Result<()> {
        for slot in self.appenders() {
            slot.lock().flush()?;
        }
        Ok(())
    }

    /// Ancestors of `name` that exist, nearest first
    fn ancestors(&self, name: &str) -> Vec<Arc<LoggerNode>> {
        let loggers = self.inner.loggers.read();
        let mut found = Vec::new();
        let mut current = name;
        while let Some(dot) = current.rfind('.') {
            current = &current[..dot];
            if let Some(node) = loggers.get(current) {
                found.push(Arc::clone(node));
            }
        }
        found
    }

    pub(crate) fn effective_level(&self, node: &Arc<LoggerNode>) -> LogLevel {
        if let Some(level) = *node.level.read() {
            return level;
        }
        self.ancestors(&node.name)
            .iter()
            .find_map(|ancestor| *ancestor.level.read())
            .or(*self.inner.root.level.read())
            .unwrap_or(LogLevel::Debug)
    }

    /// Deliver `event` to the appenders of `node` and its additive ancestors
    ///
    /// Each appender runs inside `catch_unwind` so one failing appender does
    /// not keep the event from the others.
    pub(crate) fn call_appenders(&self, node: &Arc<LoggerNode>, event: &LogEvent) {
        let mut chain = vec![Arc::clone(node)];
        if !Arc::ptr_eq(node, &self.inner.root) {
            chain.extend(self.ancestors(&node.name));
            chain.push(Arc::clone(&self.inner.root));
        }

        for current in chain {
            let appenders = current.appenders.read().clone();
            for slot in appenders {
                self.call_appender(&slot, event);
            }
            if !current.additive.load(Ordering::Relaxed) {
                break;
            }
        }
    }

    fn call_appender(&self, slot: &SharedAppender, event: &LogEvent) {
        let mut slot = slot.lock();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            slot.do_append(event)
        }));

        match result {
            Ok(Ok(true)) => {
                self.inner.metrics.record_logged();
            }
            Ok(Ok(false)) => {
                self.inner.metrics.record_filtered();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", slot.name(), e);
                self.inner.metrics.record_dropped();
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}. \
                     Other appenders continue to function.",
                    slot.name(),
                    panic_msg
                );
                self.inner.metrics.record_dropped();
            }
        }
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RepositoryInner {
    fn drop(&mut self) {
        for slot in self.appenders.get_mut().iter() {
            if let Err(e) = slot.lock().flush() {
                eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            }
        }
    }
}

/// Builder for constructing a Repository with a fluent API
///
/// # Example
/// ```
/// use connector_logging::prelude::*;
///
/// let repository = Repository::builder()
///     .root_level(LogLevel::Info)
///     .logger_level(ComponentNames::PLUGIN, LogLevel::Debug)
///     .appender("", AppenderSlot::new(MemoryAppender::new()).with_name("MemoryAppender"))
///     .global_property("service", "connector")
///     .build()
///     .unwrap();
///
/// assert!(repository.logger(ComponentNames::PLUGIN).is_enabled_for(LogLevel::Debug));
/// ```
pub struct RepositoryBuilder {
    root_level: LogLevel,
    threshold: LogLevel,
    logger_levels: Vec<(String, LogLevel)>,
    appenders: Vec<(String, AppenderSlot)>,
    global_properties: Vec<(String, FieldValue)>,
}

impl RepositoryBuilder {
    pub fn new() -> Self {
        Self {
            root_level: LogLevel::Debug,
            threshold: LogLevel::Trace,
            logger_levels: Vec::new(),
            appenders: Vec::new(),
            global_properties: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn root_level(mut self, level: LogLevel) -> Self {
        self.root_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: LogLevel) -> Self {
        self.threshold = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn logger_level(mut self, name: impl Into<String>, level: LogLevel) -> Self {
        self.logger_levels.push((name.into(), level));
        self
    }

    /// Attach an appender to a logger; an empty name means the root
    #[must_use = "builder methods return a new value"]
    pub fn appender(mut self, logger_name: impl Into<String>, slot: AppenderSlot) -> Self {
        self.appenders.push((logger_name.into(), slot));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn global_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.global_properties.push((key.into(), value.into()));
        self
    }

    /// Build the Repository
    ///
    /// Fails if an appender carries a level range whose minimum is above its
    /// maximum.
    pub fn build(self) -> Result<Repository> {
        for (_, slot) in &self.appenders {
            slot.validate()?;
        }

        let repository = Repository::with_root_level(self.root_level);
        repository.set_threshold(self.threshold);
        for (name, level) in self.logger_levels {
            repository.logger(&name).set_level(Some(level));
        }
        for (logger_name, slot) in self.appenders {
            repository.add_appender(&logger_name, slot);
        }
        for (key, value) in self.global_properties {
            repository.context().global().set(key, value);
        }
        Ok(repository)
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::and_filter::AndFilter;
    use crate::core::appender::Appender;
    use crate::core::context::{CallContext, ContextScope};
    use crate::core::error::LoggerError;
    use crate::core::filter::FilterPredicate;

    fn memory(repository: &Repository, logger: &str) -> crate::appenders::MemoryHandle {
        let appender = MemoryAppender::new();
        let handle = appender.handle();
        repository.add_appender(logger, AppenderSlot::new(appender));
        handle
    }

    #[test]
    fn test_logger_is_created_once() {
        let repository = Repository::new();
        assert!(repository.exists("A").is_none());
        let a = repository.logger("A");
        a.set_level(Some(LogLevel::Error));
        assert_eq!(repository.logger("A").level(), Some(LogLevel::Error));
        assert_eq!(repository.current_loggers().len(), 1);
        assert_eq!(repository.logger("").name(), "root");
        assert_eq!(repository.exists("").map(|l| l.name().to_string()), Some("root".to_string()));
        assert!(repository.exists("root").is_some());
        repository.logger("root");
        assert_eq!(repository.current_loggers().len(), 1);
    }

    #[test]
    fn test_additivity() {
        let repository = Repository::new();
        let root_events = memory(&repository, "");
        let child_events = memory(&repository, "Nephos.Connector");

        let logger = repository.logger("Nephos.Connector.Host");
        logger.info("both");
        assert_eq!(root_events.len(), 1);
        assert_eq!(child_events.len(), 1);

        repository.logger("Nephos.Connector").set_additive(false);
        logger.info("child only");
        assert_eq!(root_events.len(), 1);
        assert_eq!(child_events.len(), 2);
    }

    #[test]
    fn test_event_snapshots_context() {
        CallContext::scope(|| {
            let repository = Repository::new();
            let events = memory(&repository, "");
            repository.context().set(ContextScope::Global, "service", "connector");
            repository.context().set(ContextScope::CallScoped, "EventID", 7);

            repository.logger("A").info("hello");
            repository.context().clear(ContextScope::CallScoped, "EventID");
            repository.logger("A").info("again");

            let captured = events.events();
            assert_eq!(captured[0].property("EventID"), Some(&FieldValue::Int(7)));
            assert_eq!(captured[0].property("service"), Some(&FieldValue::from("connector")));
            assert!(captured[1].property("EventID").is_none());
        });
    }

    #[test]
    fn test_events_exact_and_hierarchical() {
        let repository = Repository::new();
        repository.add_appender(
            "",
            AppenderSlot::new(MemoryAppender::new()).with_name(MEMORY_APPENDER_NAME),
        );

        repository.logger("Nephos.Connector").info("base");
        repository.logger("Nephos.Connector.Plugin").info("plugin");
        repository.logger("Other").info("other");

        assert_eq!(repository.events("Nephos.Connector", false).len(), 2);
        assert_eq!(repository.events("Nephos.Connector", true).len(), 1);
        assert!(Repository::new().events("Nephos", false).is_empty());
    }

    #[test]
    fn test_filtered_events_are_counted() {
        let repository = Repository::new();
        let events = MemoryAppender::new();
        let handle = events.handle();
        repository.add_appender(
            "",
            AppenderSlot::new(events).with_filter(
                AndFilter::new().with(FilterPredicate::level_range(LogLevel::Warn, LogLevel::Fatal)),
            ),
        );

        let logger = repository.logger("A");
        logger.info("skipped");
        logger.error("kept");

        assert_eq!(handle.len(), 1);
        assert_eq!(repository.metrics().filtered_count(), 1);
        assert_eq!(repository.metrics().total_logged(), 1);
    }

    #[test]
    fn test_panicking_appender_is_isolated() {
        struct Panicking;

        impl Appender for Panicking {
            fn append(&mut self, _event: &LogEvent) -> Result<()> {
                panic!("appender exploded");
            }

            fn flush(&mut self) -> Result<()> {
                Ok(())
            }

            fn name(&self) -> &str {
                "panicking"
            }
        }

        let repository = Repository::new();
        repository.add_appender("", AppenderSlot::new(Panicking));
        let events = memory(&repository, "");

        repository.logger("A").error("still delivered");

        assert_eq!(events.len(), 1);
        assert_eq!(repository.metrics().dropped_count(), 1);
    }

    #[test]
    fn test_builder_rejects_empty_range() {
        let result = Repository::builder()
            .appender(
                "",
                AppenderSlot::new(MemoryAppender::new()).with_filter(
                    FilterPredicate::level_range(LogLevel::Error, LogLevel::Debug),
                ),
            )
            .build();
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }
}
