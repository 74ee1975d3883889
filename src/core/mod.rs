//! Core types: levels, events, filters, context, repository and facade

pub mod and_filter;
pub mod appender;
pub mod component_names;
pub mod configurator;
pub mod context;
pub mod error;
pub mod facade;
pub mod filter;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod repository;
pub mod sink;

pub use and_filter::{AndFilter, ChainFilter};
pub use appender::{Appender, AppenderKind, AppenderSlot, SharedAppender};
pub use component_names::ComponentNames;
pub use configurator::FilterConfigurator;
pub use context::{
    CallContext, CallContextGuard, ContextGuard, ContextScope, ContextStore, FieldValue,
    GlobalContext, InCallContext, Properties,
};
pub use error::{LoggerError, Result};
pub use facade::{LogFacade, EVENT_ID_PROPERTY};
pub use filter::{Filter, FilterDecision, FilterPredicate};
pub use log_event::{AttachedError, LogEvent};
pub use log_level::LogLevel;
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use repository::{Repository, RepositoryBuilder, MEMORY_APPENDER_NAME};
pub use sink::Sink;
