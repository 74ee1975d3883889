//! Named loggers in a dotted-name hierarchy

use super::{
    appender::SharedAppender,
    log_event::LogEvent,
    log_level::LogLevel,
    repository::Repository,
    sink::Sink,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Per-name state owned by the repository
#[derive(Debug)]
pub(crate) struct LoggerNode {
    pub(crate) name: String,
    pub(crate) level: RwLock<Option<LogLevel>>,
    pub(crate) additive: AtomicBool,
    pub(crate) appenders: RwLock<Vec<SharedAppender>>,
}

impl LoggerNode {
    pub(crate) fn new(name: impl Into<String>, level: Option<LogLevel>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(level),
            additive: AtomicBool::new(true),
            appenders: RwLock::new(Vec::new()),
        }
    }
}

/// Handle to a named logger
///
/// Cheap to clone. A logger without its own level inherits the level of the
/// nearest configured ancestor (`Nephos.Connector.Plugin` looks at
/// `Nephos.Connector`, then `Nephos`, then the root).
///
/// # Example
///
/// ```
/// use connector_logging::prelude::*;
///
/// let repository = Repository::new();
/// let parent = repository.logger("Nephos.Connector");
/// let plugin = repository.logger("Nephos.Connector.Plugin");
///
/// parent.set_level(Some(LogLevel::Error));
/// assert!(!plugin.is_enabled_for(LogLevel::Warn));
/// assert!(plugin.is_enabled_for(LogLevel::Error));
/// ```
#[derive(Clone)]
pub struct Logger {
    pub(crate) node: Arc<LoggerNode>,
    pub(crate) repository: Repository,
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Configured level; `None` means inherited
    pub fn level(&self) -> Option<LogLevel> {
        *self.node.level.read()
    }

    pub fn set_level(&self, level: Option<LogLevel>) {
        *self.node.level.write() = level;
    }

    /// The level actually in force for this logger
    pub fn effective_level(&self) -> LogLevel {
        self.repository.effective_level(&self.node)
    }

    pub fn additive(&self) -> bool {
        self.node.additive.load(Ordering::Relaxed)
    }

    /// When false, ancestors' appenders are not called for this logger's events
    pub fn set_additive(&self, additive: bool) {
        self.node.additive.store(additive, Ordering::Relaxed);
    }

    pub fn appenders(&self) -> Vec<SharedAppender> {
        self.node.appenders.read().clone()
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.repository.threshold() && level >= self.effective_level()
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if self.is_enabled_for(level) {
            self.emit_event(level, message.as_ref(), None);
        }
    }

    pub fn log_with_error(
        &self,
        level: LogLevel,
        message: impl AsRef<str>,
        error: &(dyn std::error::Error + 'static),
    ) {
        if self.is_enabled_for(level) {
            self.emit_event(level, message.as_ref(), Some(error));
        }
    }

    /// Build the event with the current context snapshot and hand it to the
    /// appenders of this logger and its additive ancestors
    fn emit_event(
        &self,
        level: LogLevel,
        message: &str,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        let mut event = LogEvent::new(self.name(), level, message)
            .with_properties(self.repository.context().snapshot());
        if let Some(error) = error {
            event = event.with_error(error);
        }
        self.repository.call_appenders(&self.node, &event);
    }

    #[inline]
    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Fatal, message);
    }
}

impl Sink for Logger {
    fn name(&self) -> &str {
        Logger::name(self)
    }

    fn is_enabled_for(&self, level: LogLevel) -> bool {
        Logger::is_enabled_for(self, level)
    }

    /// Writes unconditionally; callers check `is_enabled_for` first
    fn emit(
        &self,
        level: LogLevel,
        message: &str,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        self.emit_event(level, message, error);
    }

    fn level(&self) -> Option<LogLevel> {
        Logger::level(self)
    }

    fn set_level(&self, level: Option<LogLevel>) {
        Logger::set_level(self, level);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.node.name)
            .field("level", &self.level())
            .field("additive", &self.additive())
            .finish()
    }
}
