//! Severity-specific emit helpers that tag each event with an event id
//!
//! Each helper checks whether the level is enabled before doing anything. When
//! it is, the call-scoped `EventID` property is set, the event is emitted, and
//! the property is cleared again. The value that was under `EventID` before
//! the call is not restored: a nested call under the same call context leaves
//! the outer id cleared. Callers that need nesting should hold a
//! [`ContextGuard`](super::ContextGuard) instead.

use super::{context::CallContext, log_level::LogLevel, sink::Sink};

/// Property key read by the event-log appender
pub const EVENT_ID_PROPERTY: &str = "EventID";

pub struct LogFacade;

impl LogFacade {
    /// Emit `message` at `level` with `event_id` in the call context
    pub fn emit<S: Sink + ?Sized>(
        sink: &S,
        level: LogLevel,
        message: &str,
        event_id: i64,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        if !sink.is_enabled_for(level) {
            return;
        }

        let call = CallContext::current();
        let _ = call.set(EVENT_ID_PROPERTY, event_id);
        sink.emit(level, message, error);
        call.remove(EVENT_ID_PROPERTY);
    }

    #[inline]
    pub fn debug<S: Sink + ?Sized>(
        sink: &S,
        message: &str,
        event_id: i64,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        Self::emit(sink, LogLevel::Debug, message, event_id, error);
    }

    #[inline]
    pub fn info<S: Sink + ?Sized>(
        sink: &S,
        message: &str,
        event_id: i64,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        Self::emit(sink, LogLevel::Info, message, event_id, error);
    }

    #[inline]
    pub fn warn<S: Sink + ?Sized>(
        sink: &S,
        message: &str,
        event_id: i64,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        Self::emit(sink, LogLevel::Warn, message, event_id, error);
    }

    #[inline]
    pub fn error<S: Sink + ?Sized>(
        sink: &S,
        message: &str,
        event_id: i64,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        Self::emit(sink, LogLevel::Error, message, event_id, error);
    }

    #[inline]
    pub fn fatal<S: Sink + ?Sized>(
        sink: &S,
        message: &str,
        event_id: i64,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        Self::emit(sink, LogLevel::Fatal, message, event_id, error);
    }
}
