//! String-keyed structural dispatch with pattern keys.
//!
//! A [`MatchTable`] maps string keys to result values. Resolution coerces the
//! subject to a string and scans entries in declaration order, trying each
//! key exactly and then, for a key spelled `/pattern/`, as a regular
//! expression; the key `_` is the fallback when the whole scan misses.
//!
//! ## Examples
//! ```rust
//! use totem_runtime::{MatchTable, Value};
//!
//! let table = MatchTable::new()
//!     .entry("a", Value::number(1.0))
//!     .entry("/^b/", Value::number(2.0))
//!     .entry("_", Value::number(0.0));
//! assert_eq!(table.resolve(&Value::str("a")), Some(Value::number(1.0)));
//! assert_eq!(table.resolve(&Value::str("bat")), Some(Value::number(2.0)));
//! assert_eq!(table.resolve(&Value::str("zzz")), Some(Value::number(0.0)));
//! ```

use regex::Regex;

use crate::value::Value;

const FALLBACK_KEY: &str = "_";

#[derive(Debug, Clone)]
struct MatchEntry {
    key: String,
    pattern: Option<Regex>,
    result: Value,
}

/// An ordered dispatch table.
#[derive(Debug, Clone, Default)]
pub struct MatchTable {
    entries: Vec<MatchEntry>,
    fallback: Option<Value>,
}

impl MatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Patterns compile once, here; a key that looks like a
    /// pattern but does not compile only ever matches exactly.
    pub fn entry(mut self, key: impl Into<String>, result: Value) -> Self {
        let key = key.into();
        if key == FALLBACK_KEY && self.fallback.is_none() {
            self.fallback = Some(result.clone());
        }
        let pattern = compile_pattern(&key);
        self.entries.push(MatchEntry { key, pattern, result });
        self
    }

    /// Resolve the subject against the table.
    ///
    /// The subject is coerced to its string form; the first exact key or
    /// matching pattern wins, and the fallback answers only when the scan
    /// finds nothing.
    pub fn resolve(&self, subject: &Value) -> Option<Value> {
        let key = subject.to_string();
        for entry in &self.entries {
            if entry.key == key {
                return Some(entry.result.clone());
            }
            if entry.key == FALLBACK_KEY {
                continue;
            }
            if let Some(pattern) = &entry.pattern {
                if pattern.is_match(&key) {
                    return Some(entry.result.clone());
                }
            }
        }
        self.fallback.clone()
    }
}

// A pattern key is `/inner/` with a nonempty inner; anything else is a plain
// key.
fn compile_pattern(key: &str) -> Option<Regex> {
    let inner = key.strip_prefix('/')?.strip_suffix('/')?;
    if inner.is_empty() {
        return None;
    }
    Regex::new(inner).ok()
}
