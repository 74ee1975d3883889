//! Event-log style appender
//!
//! Writes one record per event in the shape of an operating-system event log
//! entry: source application, numeric event id, and entry type. The event id
//! comes from the `EventID` context property (0 when absent), which is what
//! [`LogFacade`](crate::core::LogFacade) sets around each emit.
//!
//! This is the appender kind whose level range can be rewritten at runtime by
//! [`FilterConfigurator::set_appender_range`](crate::core::FilterConfigurator::set_appender_range).

use crate::core::{Appender, AppenderKind, LogEvent, LogLevel, Result, EVENT_ID_PROPERTY};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Entry type of an event-log record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Information,
    Warning,
    Error,
}

impl EntryType {
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace | LogLevel::Debug | LogLevel::Info => EntryType::Information,
            LogLevel::Warn => EntryType::Warning,
            LogLevel::Error | LogLevel::Fatal => EntryType::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Information => "Information",
            EntryType::Warning => "Warning",
            EntryType::Error => "Error",
        }
    }
}

pub struct EventLogAppender {
    application_name: String,
    log_name: String,
    writer: Box<dyn Write + Send + Sync>,
}

impl EventLogAppender {
    /// Records go to stderr
    pub fn new(application_name: impl Into<String>) -> Self {
        Self::with_writer(application_name, std::io::stderr())
    }

    pub fn with_writer<W>(application_name: impl Into<String>, writer: W) -> Self
    where
        W: Write + Send + Sync + 'static,
    {
        Self {
            application_name: application_name.into(),
            log_name: "Application".to_string(),
            writer: Box::new(writer),
        }
    }

    /// Append records to a file
    pub fn to_file(application_name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_writer(application_name, BufWriter::new(file)))
    }

    #[must_use]
    pub fn with_log_name(mut self, log_name: impl Into<String>) -> Self {
        self.log_name = log_name.into();
        self
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    fn event_id(event: &LogEvent) -> i64 {
        event
            .property(EVENT_ID_PROPERTY)
            .and_then(|value| value.as_int())
            .unwrap_or(0)
    }

    fn format_record(&self, event: &LogEvent) -> String {
        let mut record = format!(
            "Log={} Source={} EventID={} Type={} Message={}",
            self.log_name,
            self.application_name,
            Self::event_id(event),
            EntryType::for_level(event.level).as_str(),
            event.message
        );
        if let Some(ref error) = event.error {
            record.push_str(" Exception=");
            record.push_str(&error.message);
        }
        record
    }
}

impl Appender for EventLogAppender {
    fn append(&mut self, event: &LogEvent) -> Result<()> {
        let record = self.format_record(event);
        writeln!(self.writer, "{}", record)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "eventlog"
    }

    fn kind(&self) -> AppenderKind {
        AppenderKind::EventLog
    }

    fn target_name(&self) -> Option<&str> {
        Some(&self.application_name)
    }
}
