//! Logging macros that tag events with an event id.
//!
//! Each macro checks whether the level is enabled before formatting, so a
//! disabled call never builds its message. Enabled calls go through
//! [`LogFacade::emit`](crate::core::LogFacade::emit), which sets and clears
//! the call-scoped `EventID` around the write.
//!
//! # Examples
//!
//! ```
//! use connector_logging::prelude::*;
//! use connector_logging::{error_event, info_event};
//!
//! let repository = Repository::new();
//! let logger = repository.logger(ComponentNames::PLUGIN);
//!
//! info_event!(logger, 8, "Plugin loaded");
//!
//! let company = "ACME";
//! info_event!(logger, 9, "Syncing company {}", company);
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "Testing");
//! error_event!(logger, 16, err = &err; "Sync failed for {}", company);
//! ```

/// Emit a formatted message at `level` with an event id.
///
/// An attached error goes before the format string, separated by `;`.
///
/// ```
/// # use connector_logging::prelude::*;
/// use connector_logging::log_event;
/// let repository = Repository::new();
/// let logger = repository.logger("Nephos.Connector");
/// log_event!(logger, LogLevel::Warn, 3, "Retry {} of {}", 1, 3);
/// ```
#[macro_export]
macro_rules! log_event {
    ($sink:expr, $level:expr, $event_id:expr, err = $err:expr; $($arg:tt)+) => {{
        let sink = &$sink;
        let level: $crate::LogLevel = $level;
        if $crate::core::Sink::is_enabled_for(sink, level) {
            $crate::core::LogFacade::emit(
                sink,
                level,
                &format!($($arg)+),
                $event_id,
                Some($err as &(dyn std::error::Error + 'static)),
            );
        }
    }};
    ($sink:expr, $level:expr, $event_id:expr, $($arg:tt)+) => {{
        let sink = &$sink;
        let level: $crate::LogLevel = $level;
        if $crate::core::Sink::is_enabled_for(sink, level) {
            $crate::core::LogFacade::emit(sink, level, &format!($($arg)+), $event_id, None);
        }
    }};
}

/// Emit a debug-level message with an event id.
#[macro_export]
macro_rules! debug_event {
    ($sink:expr, $event_id:expr, $($arg:tt)+) => {
        $crate::log_event!($sink, $crate::LogLevel::Debug, $event_id, $($arg)+)
    };
}

/// Emit an info-level message with an event id.
#[macro_export]
macro_rules! info_event {
    ($sink:expr, $event_id:expr, $($arg:tt)+) => {
        $crate::log_event!($sink, $crate::LogLevel::Info, $event_id, $($arg)+)
    };
}

/// Emit a warn-level message with an event id.
#[macro_export]
macro_rules! warn_event {
    ($sink:expr, $event_id:expr, $($arg:tt)+) => {
        $crate::log_event!($sink, $crate::LogLevel::Warn, $event_id, $($arg)+)
    };
}

/// Emit an error-level message with an event id.
#[macro_export]
macro_rules! error_event {
    ($sink:expr, $event_id:expr, $($arg:tt)+) => {
        $crate::log_event!($sink, $crate::LogLevel::Error, $event_id, $($arg)+)
    };
}

/// Emit a fatal-level message with an event id.
#[macro_export]
macro_rules! fatal_event {
    ($sink:expr, $event_id:expr, $($arg:tt)+) => {
        $crate::log_event!($sink, $crate::LogLevel::Fatal, $event_id, $($arg)+)
    };
}
