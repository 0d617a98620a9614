//! Leveled logging service shared by the runtime and hosted programs.
//!
//! The emitted programs log through a runtime object rather than calling the
//! console directly; this module is the Rust side of that surface. A `Log`
//! renders arguments with the value string coercion and hands the finished
//! message to a [`LogSink`], so embedders can route program output to the
//! console, to `tracing`, or to an in-memory recorder for tests.
//!
//! ## Examples
//! ```rust
//! use std::rc::Rc;
//! use totem_runtime::{Log, LogLevel, RecordingSink, Value};
//!
//! let sink = Rc::new(RecordingSink::new());
//! let log = Log::with_sink(Rc::clone(&sink));
//! log.print(&[Value::Bool(true)]);
//! log.warn(&[Value::str("low"), Value::number(3.0)]);
//! assert_eq!(sink.lines(), vec!["true", "[WARN] low 3"]);
//! assert_eq!(sink.entries()[1].0, LogLevel::Warn);
//! ```

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use crate::value::Value;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Print,
    Info,
    Warn,
    Err,
}

impl LogLevel {
    /// Return the bracketed label for the level, if the level carries one.
    ///
    /// `Print` output is deliberately bare.
    pub const fn label(self) -> Option<&'static str> {
        match self {
            LogLevel::Print => None,
            LogLevel::Info => Some("INFO"),
            LogLevel::Warn => Some("WARN"),
            LogLevel::Err => Some("ERR"),
        }
    }

    /// Prefix a message with the level label, when the level has one.
    pub fn decorate(self, message: &str) -> String {
        match self.label() {
            Some(label) => format!("[{label}] {message}"),
            None => message.to_string(),
        }
    }
}

/// Destination for rendered log messages.
///
/// Sinks receive the bare message; presentation (labels, colors, routing) is
/// the sink's concern.
pub trait LogSink {
    fn write(&self, level: LogLevel, message: &str);
}

impl<T: LogSink + ?Sized> LogSink for Rc<T> {
    fn write(&self, level: LogLevel, message: &str) {
        (**self).write(level, message)
    }
}

/// Sink that writes labeled lines to stdout and stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Print | LogLevel::Info => println!("{}", level.decorate(message)),
            LogLevel::Warn | LogLevel::Err => eprintln!("{}", level.decorate(message)),
        }
    }
}

/// Sink that forwards program output to the host's `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Print | LogLevel::Info => tracing::info!(target: "totem_runtime", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "totem_runtime", "{message}"),
            LogLevel::Err => tracing::error!(target: "totem_runtime", "{message}"),
        }
    }
}

/// Sink that records every message for later inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: RefCell<Vec<(LogLevel, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the recorded messages in presentation form, labels included.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|(level, message)| level.decorate(message))
            .collect()
    }

    /// Return the recorded `(level, message)` pairs.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.borrow().clone()
    }
}

impl LogSink for RecordingSink {
    fn write(&self, level: LogLevel, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

/// Handle to a log sink, cheap to clone into every instance and service.
#[derive(Clone)]
pub struct Log {
    sink: Rc<dyn LogSink>,
}

impl Log {
    /// Construct a log that writes to the console.
    pub fn new() -> Self {
        Self::with_sink(ConsoleSink)
    }

    /// Construct a log that writes to the given sink.
    pub fn with_sink(sink: impl LogSink + 'static) -> Self {
        Self { sink: Rc::new(sink) }
    }

    /// Log without a level label.
    pub fn print(&self, args: &[Value]) {
        self.emit(LogLevel::Print, args);
    }

    /// Log at informational level.
    pub fn info(&self, args: &[Value]) {
        self.emit(LogLevel::Info, args);
    }

    /// Log at warning level.
    pub fn warn(&self, args: &[Value]) {
        self.emit(LogLevel::Warn, args);
    }

    /// Log at error level.
    pub fn err(&self, args: &[Value]) {
        self.emit(LogLevel::Err, args);
    }

    fn emit(&self, level: LogLevel, args: &[Value]) {
        let message = args.iter().map(Value::to_string).collect::<Vec<_>>().join(" ");
        self.sink.write(level, &message);
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Log(..)")
    }
}
