//! Runtime reconfiguration of logger levels and appender level ranges
//!
//! Every operation here is best-effort: a logger, appender, chain or range
//! predicate that cannot be found leaves the repository untouched and the
//! caller is not told. Reconfiguration can therefore be issued speculatively
//! against a running service.

use super::{log_level::LogLevel, logger::Logger, repository::Repository};

/// Rewrites thresholds on an existing repository
///
/// # Example
///
/// ```
/// use connector_logging::prelude::*;
///
/// let repository = Repository::new();
/// let plugin = repository.logger(ComponentNames::PLUGIN);
/// let configurator = FilterConfigurator::new(repository.clone());
///
/// configurator.set_logger_threshold(ComponentNames::PLUGIN, Some(LogLevel::Error));
/// assert!(!plugin.is_enabled_for(LogLevel::Debug));
///
/// // Unknown loggers are ignored.
/// configurator.set_logger_threshold("No.Such.Logger", Some(LogLevel::Error));
/// assert!(repository.exists("No.Such.Logger").is_none());
/// ```
#[derive(Clone)]
pub struct FilterConfigurator {
    repository: Repository,
}

impl FilterConfigurator {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Set the level of the logger called `sink_name`; `None` reverts it to
    /// inheriting from its ancestors
    pub fn set_logger_threshold(&self, sink_name: &str, level: Option<LogLevel>) {
        if let Some(logger) = self.repository.exists(sink_name) {
            logger.set_level(level);
        }
    }

    /// Set the level of a logger already in hand, the root included
    pub fn set_logger_threshold_for(&self, logger: &Logger, level: Option<LogLevel>) {
        logger.set_level(level);
    }

    /// Rewrite the level range of the event-log appender writing for
    /// `sink_name`
    ///
    /// Only the first appender whose kind honors a level range and whose
    /// target name equals `sink_name` is considered, and within its AND chain
    /// only the first `LevelRange` predicate is rewritten. Later appenders and
    /// later range predicates are left as they are.
    pub fn set_appender_range(&self, sink_name: &str, min: LogLevel, max: LogLevel) {
        for shared in self.repository.appenders() {
            let mut slot = shared.lock();
            if !slot.kind().honors_level_range() || slot.target_name() != Some(sink_name) {
                continue;
            }

            if let Some(chain) = slot
                .filter_head_mut()
                .and_then(|head| head.as_and_filter_mut())
            {
                if let Some((range_min, range_max)) = chain.first_level_range_mut() {
                    *range_min = min;
                    *range_max = max;
                }
            }
            break;
        }
    }

    pub fn set_appender_range_for(&self, logger: &Logger, min: LogLevel, max: LogLevel) {
        self.set_appender_range(logger.name(), min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::{EventLogAppender, MemoryAppender};
    use crate::core::and_filter::{AndFilter, ChainFilter};
    use crate::core::appender::{AppenderSlot, SharedAppender};
    use crate::core::filter::FilterPredicate;

    fn range_of(shared: &SharedAppender, index: usize) -> Option<(LogLevel, LogLevel)> {
        let slot = shared.lock();
        match slot.filter_head()?.as_and_filter()?.get(index)? {
            FilterPredicate::LevelRange { min, max, .. } => Some((*min, *max)),
            _ => None,
        }
    }

    fn event_log(target: &str, chain: AndFilter) -> AppenderSlot {
        AppenderSlot::new(EventLogAppender::with_writer(target, std::io::sink()))
            .with_filter(chain)
    }

    #[test]
    fn test_rewrites_first_range_only() {
        let repository = Repository::new();
        let shared = repository.add_appender(
            "A",
            event_log(
                "A",
                AndFilter::new()
                    .with(FilterPredicate::logger_match("A"))
                    .with(FilterPredicate::level_range(LogLevel::Error, LogLevel::Fatal))
                    .with(FilterPredicate::level_range(LogLevel::Warn, LogLevel::Fatal)),
            ),
        );

        FilterConfigurator::new(repository).set_appender_range("A", LogLevel::Debug, LogLevel::Info);

        assert_eq!(range_of(&shared, 1), Some((LogLevel::Debug, LogLevel::Info)));
        assert_eq!(range_of(&shared, 2), Some((LogLevel::Warn, LogLevel::Fatal)));
    }

    #[test]
    fn test_unmatched_name_changes_nothing() {
        let repository = Repository::new();
        let shared = repository.add_appender(
            "A",
            event_log(
                "A",
                AndFilter::new().with(FilterPredicate::level_range(LogLevel::Error, LogLevel::Fatal)),
            ),
        );

        let configurator = FilterConfigurator::new(repository);
        configurator.set_appender_range("B", LogLevel::Debug, LogLevel::Info);
        configurator.set_appender_range("a", LogLevel::Debug, LogLevel::Info);

        assert_eq!(range_of(&shared, 0), Some((LogLevel::Error, LogLevel::Fatal)));
    }

    #[test]
    fn test_only_event_log_kind_is_considered() {
        let repository = Repository::new();
        let memory = repository.add_appender(
            "A",
            AppenderSlot::new(MemoryAppender::new()).with_name("A").with_filter(
                AndFilter::new().with(FilterPredicate::level_range(LogLevel::Error, LogLevel::Fatal)),
            ),
        );

        FilterConfigurator::new(repository).set_appender_range("A", LogLevel::Debug, LogLevel::Info);

        assert_eq!(range_of(&memory, 0), Some((LogLevel::Error, LogLevel::Fatal)));
    }

    #[test]
    fn test_head_that_is_not_a_chain_is_skipped() {
        let repository = Repository::new();
        let shared = repository.add_appender(
            "A",
            AppenderSlot::new(EventLogAppender::with_writer("A", std::io::sink()))
                .with_filter(FilterPredicate::level_range(LogLevel::Error, LogLevel::Fatal)),
        );

        FilterConfigurator::new(repository).set_appender_range("A", LogLevel::Debug, LogLevel::Info);

        let slot = shared.lock();
        assert!(matches!(
            slot.filter_head(),
            Some(ChainFilter::Predicate(FilterPredicate::LevelRange {
                min: LogLevel::Error,
                max: LogLevel::Fatal,
                ..
            }))
        ));
    }

    #[test]
    fn test_stops_at_first_matching_appender() {
        let repository = Repository::new();
        let first = repository.add_appender(
            "A",
            event_log("A", AndFilter::new().with(FilterPredicate::logger_match("A"))),
        );
        let second = repository.add_appender(
            "A",
            event_log(
                "A",
                AndFilter::new().with(FilterPredicate::level_range(LogLevel::Error, LogLevel::Fatal)),
            ),
        );

        FilterConfigurator::new(repository).set_appender_range("A", LogLevel::Debug, LogLevel::Info);

        // The first match has no range predicate, so nothing changes anywhere.
        let first_len = first
            .lock()
            .filter_head()
            .and_then(|head| head.as_and_filter())
            .map(|chain| chain.len());
        assert_eq!(first_len, Some(1));
        assert_eq!(range_of(&second, 0), Some((LogLevel::Error, LogLevel::Fatal)));
    }

    #[test]
    fn test_root_threshold_is_reconfigurable() {
        let repository = Repository::new();
        let root = repository.root();
        let plugin = repository.logger("Nephos.Connector.Plugin");
        let configurator = FilterConfigurator::new(repository.clone());

        configurator.set_logger_threshold_for(&root, Some(LogLevel::Fatal));
        assert_eq!(root.level(), Some(LogLevel::Fatal));
        assert!(!plugin.is_enabled_for(LogLevel::Error));

        configurator.set_logger_threshold(root.name(), Some(LogLevel::Warn));
        assert_eq!(root.level(), Some(LogLevel::Warn));

        configurator.set_logger_threshold("", Some(LogLevel::Info));
        assert_eq!(root.level(), Some(LogLevel::Info));
        assert!(plugin.is_enabled_for(LogLevel::Info));
        assert!(!plugin.is_enabled_for(LogLevel::Debug));
    }

    #[test]
    fn test_logger_threshold_missing_logger_is_noop() {
        let repository = Repository::new();
        let configurator = FilterConfigurator::new(repository.clone());

        configurator.set_logger_threshold("Nephos.Connector.Plugin", Some(LogLevel::Fatal));
        assert!(repository.current_loggers().is_empty());

        let logger = repository.logger("Nephos.Connector.Plugin");
        configurator.set_logger_threshold_for(&logger, Some(LogLevel::Fatal));
        assert_eq!(logger.level(), Some(LogLevel::Fatal));
        assert!(!logger.is_enabled_for(LogLevel::Error));
    }
}
