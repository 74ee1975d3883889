//! The surface the facade and configurator need from a logger

use super::log_level::LogLevel;

/// A named logger that decides whether a level is enabled and writes events
///
/// [`Logger`](super::Logger) is the in-crate implementation; tests and other
/// backends can provide their own.
pub trait Sink {
    fn name(&self) -> &str;

    fn is_enabled_for(&self, level: LogLevel) -> bool;

    fn emit(
        &self,
        level: LogLevel,
        message: &str,
        error: Option<&(dyn std::error::Error + 'static)>,
    );

    /// Configured minimum level; `None` means inherited
    fn level(&self) -> Option<LogLevel>;

    fn set_level(&self, level: Option<LogLevel>);
}

impl<S: Sink + ?Sized> Sink for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_enabled_for(&self, level: LogLevel) -> bool {
        (**self).is_enabled_for(level)
    }

    fn emit(
        &self,
        level: LogLevel,
        message: &str,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        (**self).emit(level, message, error);
    }

    fn level(&self) -> Option<LogLevel> {
        (**self).level()
    }

    fn set_level(&self, level: Option<LogLevel>) {
        (**self).set_level(level);
    }
}
