//! # Connector Logging
//!
//! Log filtering and context enrichment for connector services.
//!
//! ## Features
//!
//! - **AND filter chains**: exact logger-name matching combined with level
//!   ranges and other predicates, denying on the first failure
//! - **Scoped context**: process-wide and per-call properties captured into
//!   every event, with set/clear returning the prior value
//! - **Runtime reconfiguration**: change logger levels and appender level
//!   ranges on a running repository
//! - **Event ids**: severity helpers that tag each event with an `EventID`

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, EventLogAppender, MemoryAppender, MemoryHandle};
    pub use crate::core::{
        AndFilter, Appender, AppenderKind, AppenderSlot, CallContext, ChainFilter,
        ComponentNames, ContextGuard, ContextScope, ContextStore, FieldValue, Filter,
        FilterConfigurator, FilterDecision, FilterPredicate, LogEvent, LogFacade, LogLevel,
        Logger, LoggerError, LoggerMetrics, Repository, RepositoryBuilder, Result, SharedAppender,
        Sink, EVENT_ID_PROPERTY,
    };
}

pub use appenders::{ConsoleAppender, EventLogAppender, MemoryAppender, MemoryHandle};
pub use core::{
    AndFilter, Appender, AppenderKind, AppenderSlot, CallContext, ChainFilter, ComponentNames,
    ContextGuard, ContextScope, ContextStore, FieldValue, Filter, FilterConfigurator,
    FilterDecision, FilterPredicate, LogEvent, LogFacade, LogLevel, Logger, LoggerError,
    LoggerMetrics, Repository, RepositoryBuilder, Result, SharedAppender, Sink, EVENT_ID_PROPERTY,
};
