//! Structured JSON logger for aerokv
//!
//! - One log line = one event
//! - `event` first, `severity` second, remaining fields sorted by name
//! - Synchronous, no buffering
//! - Written to stderr so the CLI's stdout stays a clean response stream

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::events::Event;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-operation detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimum severity a logger emits, or `Off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Info,
    #[default]
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Lowest severity that passes this level.
    pub fn threshold(self) -> Option<Severity> {
        match self {
            LogLevel::Trace => Some(Severity::Trace),
            LogLevel::Info => Some(Severity::Info),
            LogLevel::Warn => Some(Severity::Warn),
            LogLevel::Error => Some(Severity::Error),
            LogLevel::Off => None,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(format!(
                "invalid log level '{}': expected trace, info, warn, error or off",
                other
            )),
        }
    }
}

/// A structured logger that outputs JSON lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Create a logger emitting everything at or above `level`.
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// A logger that never writes.
    pub fn disabled() -> Self {
        Self::new(LogLevel::Off)
    }

    /// The configured level.
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns true if a line at `severity` would be written.
    ///
    /// Callers check this before formatting expensive fields.
    #[inline]
    pub fn enabled(&self, severity: Severity) -> bool {
        self.level
            .threshold()
            .is_some_and(|threshold| severity >= threshold)
    }

    /// Log an event at its default severity.
    pub fn event(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(event.severity(), event, fields);
    }

    /// Log an event with an explicit severity.
    pub fn log(&self, severity: Severity, event: Event, fields: &[(&str, &str)]) {
        self.log_to_writer(severity, event, fields, &mut io::stderr());
    }

    /// Write one log line to `writer` if `severity` passes the level.
    pub fn log_to_writer<W: Write>(
        &self,
        severity: Severity,
        event: Event,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        if !self.enabled(severity) {
            return;
        }
        let line = render(severity, event.as_str(), fields);

        // Logging failures never propagate into store operations
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

/// Render a single JSON log line, newline included.
pub fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(128);

    output.push_str("{\"event\":");
    push_json_string(&mut output, event);
    output.push_str(",\"severity\":");
    push_json_string(&mut output, severity.as_str());

    let mut sorted_fields: Vec<_> = fields.iter().collect();
    sorted_fields.sort_by_key(|(k, _)| *k);

    for (key, value) in sorted_fields {
        output.push(',');
        push_json_string(&mut output, key);
        output.push(':');
        push_json_string(&mut output, value);
    }

    output.push_str("}\n");
    output
}

fn push_json_string(output: &mut String, s: &str) {
    output.push_str(&Value::from(s).to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(logger: Logger, severity: Severity, fields: &[(&str, &str)]) -> String {
        let mut buffer = Vec::new();
        logger.log_to_writer(severity, Event::InsertAccepted, fields, &mut buffer);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_level_filtering() {
        let logger = Logger::new(LogLevel::Warn);

        assert!(!logger.enabled(Severity::Trace));
        assert!(!logger.enabled(Severity::Info));
        assert!(logger.enabled(Severity::Warn));
        assert!(logger.enabled(Severity::Error));
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let output = capture(Logger::disabled(), Severity::Error, &[]);
        assert!(output.is_empty());
    }

    #[test]
    fn test_filtered_line_not_written() {
        let output = capture(Logger::new(LogLevel::Error), Severity::Info, &[]);
        assert!(output.is_empty());
    }

    #[test]
    fn test_log_json_format() {
        let output = capture(Logger::new(LogLevel::Trace), Severity::Info, &[("key", "user1")]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "KV_INSERT_ACCEPTED");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["key"], "user1");
    }

    #[test]
    fn test_render_deterministic_ordering() {
        let a = render(Severity::Info, "TEST", &[("zebra", "1"), ("apple", "2")]);
        let b = render(Severity::Info, "TEST", &[("apple", "2"), ("zebra", "1")]);

        assert_eq!(a, b);
        assert!(a.find("\"event\"").unwrap() < a.find("\"severity\"").unwrap());
        assert!(a.find("apple").unwrap() < a.find("zebra").unwrap());
    }

    #[test]
    fn test_render_escapes_special_chars() {
        let output = render(Severity::Warn, "TEST", &[("key", "a\"b\nc")]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["key"], "a\"b\nc");
        assert_eq!(output.matches('\n').count(), 1);
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("TRACE".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::Off);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_level_default_is_warn() {
        assert_eq!(LogLevel::default(), LogLevel::Warn);
        assert_eq!(Logger::default().level(), LogLevel::Warn);
    }
}
