//! The runtime service hosts construct once and pass around.
//!
//! `Runtime` is the Rust counterpart of the api object emitted programs
//! address: enum sets, type definition, structural dispatch, pipelines, and
//! the log live behind one value wired up at startup.
//!
//! ## Examples
//! ```rust
//! use totem_runtime::{MatchTable, Runtime, Value};
//!
//! let runtime = Runtime::new();
//! let color = runtime.enum_set(["Red", "Blue"]);
//! assert!(color.is(&Value::str("Red")));
//!
//! let table = MatchTable::new().entry("_", Value::str("other"));
//! assert_eq!(runtime.match_value(&Value::number(9.0), &table), Value::str("other"));
//! ```

use crate::dispatch::MatchTable;
use crate::enums::EnumSet;
use crate::log::{Log, LogSink};
use crate::object::{Type, TypeDescriptor};
use crate::value::{FuncValue, Value};

/// The runtime service.
///
/// Immutable after construction; cloning shares the log sink.
#[derive(Debug, Clone)]
pub struct Runtime {
    log: Log,
}

impl Runtime {
    /// Construct a runtime logging to the console.
    pub fn new() -> Self {
        Self { log: Log::new() }
    }

    /// Construct a runtime logging to the given sink.
    pub fn with_sink(sink: impl LogSink + 'static) -> Self {
        Self {
            log: Log::with_sink(sink),
        }
    }

    /// Return the runtime's log.
    pub fn log(&self) -> &Log {
        &self.log
    }

    /// Declare an enum set from its tags.
    pub fn enum_set<I, S>(&self, tags: I) -> EnumSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnumSet::new(tags)
    }

    /// Define an object type; instances report guard denials through this
    /// runtime's log.
    pub fn define_type(&self, descriptor: TypeDescriptor) -> Type {
        Type::new(descriptor, self.log.clone())
    }

    /// Resolve a subject against a match table; no match is `undefined`.
    pub fn match_value(&self, subject: &Value, table: &MatchTable) -> Value {
        table.resolve(subject).unwrap_or(Value::Undefined)
    }

    /// Compose stages into a pipeline callable.
    pub fn pipeline(&self, stages: Vec<FuncValue>) -> FuncValue {
        crate::pipeline::pipeline(stages)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_subjects_dispatch_to_undefined() {
        let runtime = Runtime::new();
        let table = MatchTable::new().entry("a", Value::number(1.0));
        assert_eq!(runtime.match_value(&Value::str("b"), &table), Value::Undefined);
    }
}
