//! Console - the log channel test outcomes are reported on

use colored::*;
use std::cell::RefCell;
use std::fmt;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// One line of runner output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    /// `Test: <name> OK`
    Passed { name: String },
    /// `Test: <name> FAILED <message>`
    Failed { name: String, message: String },
    /// Trace information following a `Failed` record
    Trace { trace: String },
}

impl LogRecord {
    pub fn level(&self) -> Level {
        match self {
            LogRecord::Passed { .. } => Level::Info,
            LogRecord::Failed { .. } | LogRecord::Trace { .. } => Level::Error,
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogRecord::Passed { name } => write!(f, "Test: {} OK", name),
            LogRecord::Failed { name, message } => write!(f, "Test: {} FAILED {}", name, message),
            LogRecord::Trace { trace } => write!(f, "{}", trace),
        }
    }
}

/// Sink for runner output
pub trait Console {
    fn record(&self, record: &LogRecord);
}

/// Console that prints info records to stdout and errors to stderr
#[derive(Debug, Default)]
pub struct StdConsole {
    /// Disable colored output
    no_color: bool,
}

impl StdConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colored output
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    fn render(&self, record: &LogRecord) -> String {
        if self.no_color {
            return record.to_string();
        }

        match record {
            LogRecord::Passed { name } => {
                format!("{} {} {}", "Test:".bold(), name, "OK".green().bold())
            }
            LogRecord::Failed { name, message } => format!(
                "{} {} {} {}",
                "Test:".bold(),
                name,
                "FAILED".red().bold(),
                message
            ),
            LogRecord::Trace { trace } => trace.dimmed().to_string(),
        }
    }
}

impl Console for StdConsole {
    fn record(&self, record: &LogRecord) {
        let line = self.render(record);
        match record.level() {
            Level::Info => println!("{}", line),
            Level::Error => eprintln!("{}", line),
        }
    }
}

/// Console that keeps every record in memory, for running headless
#[derive(Debug, Default)]
pub struct CapturedConsole {
    records: RefCell<Vec<LogRecord>>,
}

impl CapturedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.borrow().clone()
    }

    /// Records rendered as plain text lines
    pub fn lines(&self) -> Vec<String> {
        self.records.borrow().iter().map(ToString::to_string).collect()
    }

    /// All lines joined with newlines
    pub fn transcript(&self) -> String {
        self.lines().join("\n")
    }

    pub fn count(&self, level: Level) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|record| record.level() == level)
            .count()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl Console for CapturedConsole {
    fn record(&self, record: &LogRecord) {
        self.records.borrow_mut().push(record.clone());
    }
}
