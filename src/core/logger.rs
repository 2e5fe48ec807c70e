//=========================================================================
// Logger
//=========================================================================
//
// Explicit logging collaborator handed to every component at
// construction.
//
// Sinks:
//   Facade → forwards to the `log` crate under a fixed target
//   Null   → discards everything
//   Memory → captures records for inspection (diagnostics, tests)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::Level;

//=== LogRecord ===========================================================

/// A record captured by a memory-backed [`Logger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

//=== MemoryLog ===========================================================

/// Read handle onto the records captured by [`Logger::memory`].
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    records: Rc<RefCell<Vec<LogRecord>>>,
}

impl MemoryLog {
    /// Returns a copy of every record captured so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.borrow().clone()
    }

    /// Number of records at exactly `level`.
    pub fn count(&self, level: Level) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.level == level)
            .count()
    }

    /// True if any record at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.records
            .borrow()
            .iter()
            .any(|r| r.level == level && r.message.contains(needle))
    }

    /// Drops every captured record.
    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

//=== Logger ==============================================================

#[derive(Clone)]
enum Sink {
    Facade,
    Null,
    Memory(MemoryLog),
}

/// Cheap-to-clone handle through which engine components emit diagnostics.
///
/// Components never reach for an ambient logger; whoever builds them
/// decides where records go. [`Logger::null`] satisfies the same contract
/// when diagnostics are unwanted.
#[derive(Clone)]
pub struct Logger {
    target: Cow<'static, str>,
    sink: Sink,
}

impl Logger {
    /// Forwards records to the `log` facade under `target`.
    pub fn new(target: impl Into<Cow<'static, str>>) -> Self {
        Self {
            target: target.into(),
            sink: Sink::Facade,
        }
    }

    /// A logger that discards every record.
    pub fn null() -> Self {
        Self {
            target: Cow::Borrowed(""),
            sink: Sink::Null,
        }
    }

    /// A logger that captures records in memory, plus the handle to read them.
    pub fn memory(target: impl Into<Cow<'static, str>>) -> (Self, MemoryLog) {
        let log = MemoryLog::default();
        let logger = Self {
            target: target.into(),
            sink: Sink::Memory(log.clone()),
        };
        (logger, log)
    }

    /// Derives a logger for a sub-component, e.g. `engine` → `engine::scene`.
    pub fn child(&self, suffix: &str) -> Self {
        let target = if self.target.is_empty() {
            Cow::Owned(suffix.to_owned())
        } else {
            Cow::Owned(format!("{}::{}", self.target, suffix))
        };
        Self {
            target,
            sink: self.sink.clone(),
        }
    }

    /// Target attached to every record.
    pub fn target(&self) -> &str {
        &self.target
    }

    //--- Emission ---------------------------------------------------------

    /// Emits one record at `level`.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        match &self.sink {
            Sink::Facade => log::log!(target: self.target.as_ref(), level, "{}", args),
            Sink::Null => {}
            Sink::Memory(log) => log.records.borrow_mut().push(LogRecord {
                level,
                target: self.target.to_string(),
                message: args.to_string(),
            }),
        }
    }

    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new("stepwise")
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sink = match self.sink {
            Sink::Facade => "facade",
            Sink::Null => "null",
            Sink::Memory(_) => "memory",
        };
        f.debug_struct("Logger")
            .field("target", &self.target)
            .field("sink", &sink)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
