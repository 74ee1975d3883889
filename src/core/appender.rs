//! Appender trait for log output destinations, and the registry slot that
//! wraps each appender with its threshold and filter list

use super::and_filter::ChainFilter;
use super::error::{LoggerError, Result};
use super::filter::{FilterDecision, FilterPredicate};
use super::log_event::LogEvent;
use super::log_level::LogLevel;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Closed set of appender kinds known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppenderKind {
    Console,
    File,
    Json,
    EventLog,
    Memory,
    Custom,
}

impl AppenderKind {
    /// Kinds whose severity range can be rewritten at runtime
    pub fn honors_level_range(self) -> bool {
        matches!(self, AppenderKind::EventLog)
    }
}

pub trait Appender: Send + Sync {
    fn append(&mut self, event: &LogEvent) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    fn kind(&self) -> AppenderKind {
        AppenderKind::Custom
    }

    /// Name of the logger or application this appender writes for, if any
    fn target_name(&self) -> Option<&str> {
        None
    }

    /// Events retained in memory, for appenders that keep them
    fn buffered_events(&self) -> Option<Vec<LogEvent>> {
        None
    }
}

/// Appender shared between the registry and the loggers it is attached to
pub type SharedAppender = Arc<Mutex<AppenderSlot>>;

/// An appender together with its threshold and filter list
///
/// Filters run in order: `Deny` rejects the event, `Accept` stops evaluation
/// and keeps it, `Neutral` moves on. An event that reaches the end is kept.
pub struct AppenderSlot {
    name: String,
    threshold: Option<LogLevel>,
    filters: Vec<ChainFilter>,
    output: Box<dyn Appender>,
}

impl AppenderSlot {
    pub fn new<A: Appender + 'static>(output: A) -> Self {
        Self::from_boxed(Box::new(output))
    }

    pub fn from_boxed(output: Box<dyn Appender>) -> Self {
        Self {
            name: output.name().to_string(),
            threshold: None,
            filters: Vec::new(),
            output,
        }
    }

    /// Override the registry name (defaults to the appender's own name)
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, level: LogLevel) -> Self {
        self.threshold = Some(level);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<ChainFilter>) -> Self {
        self.filters.push(filter.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AppenderKind {
        self.output.kind()
    }

    pub fn target_name(&self) -> Option<&str> {
        self.output.target_name()
    }

    pub fn buffered_events(&self) -> Option<Vec<LogEvent>> {
        self.output.buffered_events()
    }

    pub fn threshold(&self) -> Option<LogLevel> {
        self.threshold
    }

    pub fn set_threshold(&mut self, level: Option<LogLevel>) {
        self.threshold = level;
    }

    pub fn add_filter(&mut self, filter: impl Into<ChainFilter>) {
        self.filters.push(filter.into());
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn filters(&self) -> &[ChainFilter] {
        &self.filters
    }

    pub fn filter_head(&self) -> Option<&ChainFilter> {
        self.filters.first()
    }

    pub fn filter_head_mut(&mut self) -> Option<&mut ChainFilter> {
        self.filters.first_mut()
    }

    /// Threshold check followed by the filter list
    pub fn decide(&self, event: &LogEvent) -> FilterDecision {
        if let Some(threshold) = self.threshold {
            if event.level < threshold {
                return FilterDecision::Deny;
            }
        }

        for filter in &self.filters {
            match filter.decide(Some(event)) {
                FilterDecision::Deny => return FilterDecision::Deny,
                FilterDecision::Accept => return FilterDecision::Accept,
                FilterDecision::Neutral => {}
            }
        }

        FilterDecision::Neutral
    }

    /// Write `event` if it passes; returns whether it was written
    pub fn do_append(&mut self, event: &LogEvent) -> Result<bool> {
        if !self.decide(event).permits() {
            return Ok(false);
        }
        self.output.append(event)?;
        Ok(true)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()
    }

    /// Reject level ranges that can never match
    pub fn validate(&self) -> Result<()> {
        for filter in &self.filters {
            let predicates: Vec<&FilterPredicate> = match filter {
                ChainFilter::And(chain) => chain.iter().collect(),
                ChainFilter::Predicate(predicate) => vec![predicate],
            };
            for predicate in predicates {
                if let FilterPredicate::LevelRange { min, max, .. } = predicate {
                    if min > max {
                        return Err(LoggerError::config(
                            self.name.clone(),
                            format!("level range {}..{} is empty", min, max),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn into_shared(self) -> SharedAppender {
        Arc::new(Mutex::new(self))
    }
}

impl std::fmt::Debug for AppenderSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppenderSlot")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("target_name", &self.target_name())
            .field("threshold", &self.threshold)
            .field("filters", &self.filters)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::and_filter::AndFilter;

    struct Sink {
        written: Vec<String>,
    }

    impl Appender for Sink {
        fn append(&mut self, event: &LogEvent) -> Result<()> {
            self.written.push(event.message.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "sink"
        }
    }

    fn slot() -> AppenderSlot {
        AppenderSlot::new(Sink {
            written: Vec::new(),
        })
    }

    fn event(level: LogLevel, message: &str) -> LogEvent {
        LogEvent::new("A", level, message)
    }

    #[test]
    fn test_threshold_denies_lower_levels() {
        let slot = slot().with_threshold(LogLevel::Warn);
        assert_eq!(slot.decide(&event(LogLevel::Info, "m")), FilterDecision::Deny);
        assert!(slot.decide(&event(LogLevel::Warn, "m")).permits());
    }

    #[test]
    fn test_accept_stops_filter_list() {
        let slot = slot()
            .with_filter(FilterPredicate::string_match("keep"))
            .with_filter(FilterPredicate::DenyAll);

        assert_eq!(slot.decide(&event(LogLevel::Info, "keep me")), FilterDecision::Accept);
        assert_eq!(slot.decide(&event(LogLevel::Info, "drop me")), FilterDecision::Deny);
    }

    #[test]
    fn test_do_append_reports_written() {
        let mut slot = slot().with_filter(
            AndFilter::new().with(FilterPredicate::level_range(LogLevel::Error, LogLevel::Fatal)),
        );
        assert!(!slot.do_append(&event(LogLevel::Info, "quiet")).unwrap());
        assert!(slot.do_append(&event(LogLevel::Error, "loud")).unwrap());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let slot = slot().with_filter(
            AndFilter::new().with(FilterPredicate::level_range(LogLevel::Fatal, LogLevel::Debug)),
        );
        assert!(matches!(
            slot.validate(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_kind_defaults_to_custom() {
        let slot = slot().with_name("renamed");
        assert_eq!(slot.kind(), AppenderKind::Custom);
        assert_eq!(slot.name(), "renamed");
        assert!(slot.target_name().is_none());
        assert!(!slot.kind().honors_level_range());
    }
}
