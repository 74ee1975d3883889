//! Single-predicate log filters
//!
//! A [`FilterPredicate`] looks at one event and returns a tri-state
//! [`FilterDecision`]. The built-in variants mirror the usual backend filters;
//! anything else plugs in through the [`Filter`] trait as
//! [`FilterPredicate::Custom`].

use super::log_event::LogEvent;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Verdict of one filter over one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterDecision {
    Accept,
    Deny,
    /// No opinion; does not veto
    Neutral,
}

impl FilterDecision {
    /// Anything except `Deny` lets the event through
    #[inline]
    pub fn permits(self) -> bool {
        self != FilterDecision::Deny
    }
}

/// Backend-supplied predicate
///
/// Filters are `Send + Sync` so they can be shared across threads.
pub trait Filter: Send + Sync {
    fn decide(&self, event: &LogEvent) -> FilterDecision;

    /// Short label used in debug output
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Filter for F
where
    F: Fn(&LogEvent) -> FilterDecision + Send + Sync,
{
    fn decide(&self, event: &LogEvent) -> FilterDecision {
        self(event)
    }
}

#[derive(Clone)]
pub enum FilterPredicate {
    /// Hierarchical logger-name match: the event's logger name starts with
    /// `logger_to_match`
    LoggerMatch {
        logger_to_match: String,
        accept_on_match: bool,
    },
    /// Inclusive severity range; events outside are denied
    LevelRange {
        min: LogLevel,
        max: LogLevel,
        accept_on_match: bool,
    },
    /// Exactly one severity
    LevelMatch {
        level: LogLevel,
        accept_on_match: bool,
    },
    /// Message contains `substring`
    StringMatch {
        substring: String,
        accept_on_match: bool,
    },
    DenyAll,
    Custom(Arc<dyn Filter>),
}

impl FilterPredicate {
    pub fn logger_match(logger_to_match: impl Into<String>) -> Self {
        FilterPredicate::LoggerMatch {
            logger_to_match: logger_to_match.into(),
            accept_on_match: true,
        }
    }

    pub fn level_range(min: LogLevel, max: LogLevel) -> Self {
        FilterPredicate::LevelRange {
            min,
            max,
            accept_on_match: true,
        }
    }

    pub fn level_match(level: LogLevel) -> Self {
        FilterPredicate::LevelMatch {
            level,
            accept_on_match: true,
        }
    }

    pub fn string_match(substring: impl Into<String>) -> Self {
        FilterPredicate::StringMatch {
            substring: substring.into(),
            accept_on_match: true,
        }
    }

    pub fn custom<F: Filter + 'static>(filter: F) -> Self {
        FilterPredicate::Custom(Arc::new(filter))
    }

    /// Flip `accept_on_match`; no effect on `DenyAll` and `Custom`
    #[must_use]
    pub fn accept_on_match(mut self, accept: bool) -> Self {
        match &mut self {
            FilterPredicate::LoggerMatch { accept_on_match, .. }
            | FilterPredicate::LevelRange { accept_on_match, .. }
            | FilterPredicate::LevelMatch { accept_on_match, .. }
            | FilterPredicate::StringMatch { accept_on_match, .. } => *accept_on_match = accept,
            FilterPredicate::DenyAll | FilterPredicate::Custom(_) => {}
        }
        self
    }

    pub fn decide(&self, event: &LogEvent) -> FilterDecision {
        match self {
            FilterPredicate::LoggerMatch {
                logger_to_match,
                accept_on_match,
            } => {
                if !logger_to_match.is_empty() && event.logger_name.starts_with(logger_to_match.as_str())
                {
                    on_match(*accept_on_match)
                } else {
                    FilterDecision::Neutral
                }
            }
            FilterPredicate::LevelRange {
                min,
                max,
                accept_on_match,
            } => {
                if !event.level.within(*min, *max) {
                    FilterDecision::Deny
                } else if *accept_on_match {
                    FilterDecision::Accept
                } else {
                    FilterDecision::Neutral
                }
            }
            FilterPredicate::LevelMatch {
                level,
                accept_on_match,
            } => {
                if event.level == *level {
                    on_match(*accept_on_match)
                } else {
                    FilterDecision::Neutral
                }
            }
            FilterPredicate::StringMatch {
                substring,
                accept_on_match,
            } => {
                if !substring.is_empty() && event.message.contains(substring.as_str()) {
                    on_match(*accept_on_match)
                } else {
                    FilterDecision::Neutral
                }
            }
            FilterPredicate::DenyAll => FilterDecision::Deny,
            FilterPredicate::Custom(filter) => filter.decide(event),
        }
    }
}

fn on_match(accept_on_match: bool) -> FilterDecision {
    if accept_on_match {
        FilterDecision::Accept
    } else {
        FilterDecision::Deny
    }
}

impl fmt::Debug for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterPredicate::LoggerMatch {
                logger_to_match,
                accept_on_match,
            } => f
                .debug_struct("LoggerMatch")
                .field("logger_to_match", logger_to_match)
                .field("accept_on_match", accept_on_match)
                .finish(),
            FilterPredicate::LevelRange {
                min,
                max,
                accept_on_match,
            } => f
                .debug_struct("LevelRange")
                .field("min", min)
                .field("max", max)
                .field("accept_on_match", accept_on_match)
                .finish(),
            FilterPredicate::LevelMatch {
                level,
                accept_on_match,
            } => f
                .debug_struct("LevelMatch")
                .field("level", level)
                .field("accept_on_match", accept_on_match)
                .finish(),
            FilterPredicate::StringMatch {
                substring,
                accept_on_match,
            } => f
                .debug_struct("StringMatch")
                .field("substring", substring)
                .field("accept_on_match", accept_on_match)
                .finish(),
            FilterPredicate::DenyAll => f.write_str("DenyAll"),
            FilterPredicate::Custom(filter) => write!(f, "Custom({})", filter.name()),
        }
    }
}
