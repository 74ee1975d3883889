//! Appender implementations

pub mod console;
pub mod event_log;
pub mod memory;

pub use console::ConsoleAppender;
pub use event_log::{EntryType, EventLogAppender};
pub use memory::{MemoryAppender, MemoryHandle};

pub use crate::core::Appender;
