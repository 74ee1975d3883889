//! Console appender for demos and local debugging
//!
//! Prints `[LEVEL] logger - message`; Error and Fatal go to stderr.

use crate::core::{Appender, AppenderKind, LogEvent, LogLevel, Result, EVENT_ID_PROPERTY};
#[cfg(feature = "console")]
use colored::Colorize;

pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_colors(cfg!(feature = "console"))
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn render(&self, event: &LogEvent) -> String {
        let level = format!("{:5}", event.level.to_str());
        let level = if self.use_colors {
            colorize(level, event.level)
        } else {
            level
        };

        let mut line = format!("[{}] {} - {}", level, event.logger_name, event.message);
        if let Some(id) = event.property(EVENT_ID_PROPERTY) {
            line.push_str(&format!(" (EventID {})", id));
        }
        if let Some(ref error) = event.error {
            line.push_str(" | ");
            line.push_str(&error.message);
        }
        line
    }
}

#[cfg(feature = "console")]
fn colorize(level: String, severity: LogLevel) -> String {
    level.color(severity.color_code()).to_string()
}

#[cfg(not(feature = "console"))]
fn colorize(level: String, _severity: LogLevel) -> String {
    level
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, event: &LogEvent) -> Result<()> {
        let output = self.render(event);

        match event.level {
            LogLevel::Error | LogLevel::Fatal => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    fn kind(&self) -> AppenderKind {
        AppenderKind::Console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, Properties};

    #[test]
    fn test_render_without_colors() {
        let appender = ConsoleAppender::with_colors(false);
        let event = LogEvent::new("Nephos.Connector.UI", LogLevel::Info, "window opened");

        assert_eq!(appender.render(&event), "[INFO ] Nephos.Connector.UI - window opened");
        assert_eq!(appender.kind(), AppenderKind::Console);
    }

    #[test]
    fn test_render_shows_event_id() {
        let appender = ConsoleAppender::with_colors(false);
        let mut properties = Properties::new();
        properties.insert(EVENT_ID_PROPERTY.to_string(), FieldValue::Int(10));
        let event = LogEvent::new("Nephos.Connector.Plugin", LogLevel::Error, "This is error 2")
            .with_properties(properties);

        assert!(appender.render(&event).ends_with("This is error 2 (EventID 10)"));
    }
}
