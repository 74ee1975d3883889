//! In-memory appender
//!
//! Keeps every event it receives. Register it under
//! [`MEMORY_APPENDER_NAME`](crate::core::MEMORY_APPENDER_NAME) to make the
//! events reachable through [`Repository::events`](crate::core::Repository::events),
//! or keep a [`MemoryHandle`] to read them directly.

use crate::core::{Appender, AppenderKind, LogEvent, Result};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
pub struct MemoryAppender {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader that stays valid after the appender is moved into a repository
    pub fn handle(&self) -> MemoryHandle {
        MemoryHandle {
            events: Arc::clone(&self.events),
        }
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, event: &LogEvent) -> Result<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn kind(&self) -> AppenderKind {
        AppenderKind::Memory
    }

    fn buffered_events(&self) -> Option<Vec<LogEvent>> {
        Some(self.events.lock().clone())
    }
}

#[derive(Clone)]
pub struct MemoryHandle {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl MemoryHandle {
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}
