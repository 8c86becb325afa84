//! Match event logger
//!
//! Messages go to stdout, to an in-memory buffer, or both. Tests switch the
//! logger to `OutputMode::Memory` and inspect what the controller reported.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Verbosity level for match output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - no output
    Silent = 0,
    /// Minimal - match start and turn changes
    Minimal = 1,
    /// Normal - every accepted or refused command (default)
    #[default]
    Normal = 2,
    /// Verbose - phase changes and automatic effects
    Verbose = 3,
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// e.g. "action", "blocked", "phase", "turn"
    pub category: Option<String>,
}

/// Guard type that provides read-only access to log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }

    /// Entries with the given category
    pub fn in_category<'s>(&'s self, category: &'s str) -> impl Iterator<Item = &'s LogEntry> + 's {
        self.guard
            .iter()
            .filter(move |entry| entry.category.as_deref() == Some(category))
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Centralized logger for match events
pub struct MatchLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl MatchLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        MatchLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn disable_capture(&mut self) {
        self.output_mode = OutputMode::Stdout;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    /// Get access to captured log entries
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    /// Print buffered entries allowed by the current verbosity, then clear
    pub fn flush_buffer(&mut self) {
        for entry in self.log_buffer.borrow().iter() {
            if entry.level <= self.verbosity {
                self.write_stdout(entry);
            }
        }
        self.clear_logs();
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    #[inline]
    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, None, message);
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, None, message);
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, None, message);
    }

    /// An accepted player command
    pub fn action(&self, message: &str) {
        self.log(VerbosityLevel::Normal, Some("action"), message);
    }

    /// A command the rule engine refused
    pub fn blocked(&self, message: &str) {
        self.log(VerbosityLevel::Normal, Some("blocked"), message);
    }

    /// Phase changes and automatic phase effects
    pub fn phase(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, Some("phase"), message);
    }

    /// Turn boundaries and match start
    pub fn turn(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, Some("turn"), message);
    }

    /// Capture and/or print one message
    ///
    /// Captured entries are kept regardless of verbosity so tests can see
    /// everything; stdout respects the verbosity level.
    pub fn log(&self, level: VerbosityLevel, category: Option<&str>, message: &str) {
        if level == VerbosityLevel::Silent {
            return;
        }
        let should_capture = self.is_capturing();
        let should_output =
            matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) && level <= self.verbosity;

        if !should_capture && !should_output {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            category: category.map(str::to_string),
        };

        if should_output {
            self.write_stdout(&entry);
        }
        if should_capture {
            self.log_buffer.borrow_mut().push(entry);
        }
    }

    fn write_stdout(&self, entry: &LogEntry) {
        match self.output_format {
            OutputFormat::Text if entry.level == VerbosityLevel::Minimal => println!("{}", entry.message),
            OutputFormat::Text => println!("  {}", entry.message),
            OutputFormat::Json => match serde_json::to_string(entry) {
                Ok(line) => println!("{line}"),
                Err(_) => println!("{}", entry.message),
            },
        }
    }
}

impl Default for MatchLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MatchLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = MatchLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture() {
        let mut logger = MatchLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();

        logger.normal("test message");
        logger.minimal("minimal message");
        logger.verbose("verbose message");

        let logs = logger.logs();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[1].level, VerbosityLevel::Minimal);
        assert_eq!(logs[2].level, VerbosityLevel::Verbose);
    }

    #[test]
    fn test_categories() {
        let mut logger = MatchLogger::new();
        logger.enable_capture();

        logger.action("P1 played Forest");
        logger.blocked("not your turn");
        logger.action("P1 cast Grizzly Bears");

        let logs = logger.logs();
        assert_eq!(logs.in_category("action").count(), 2);
        assert_eq!(logs.in_category("blocked").count(), 1);
        assert_eq!(logs.in_category("phase").count(), 0);
    }

    #[test]
    fn test_flush_buffer_clears() {
        let mut logger = MatchLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();
        logger.normal("message 1");
        logger.normal("message 2");
        assert_eq!(logger.logs().len(), 2);

        logger.flush_buffer();
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_disable_capture() {
        let mut logger = MatchLogger::new();
        logger.enable_capture();
        assert!(logger.is_capturing());

        logger.disable_capture();
        assert!(!logger.is_capturing());
        logger.set_verbosity(VerbosityLevel::Silent);
        logger.normal("dropped");
        assert!(logger.logs().is_empty());
    }
}
