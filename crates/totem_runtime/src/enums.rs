//! Enum sets: named tags with a membership test.
//!
//! An enum in a Totem program is a frozen set of string tags. The only
//! operation beyond enumeration is [`EnumSet::is`], the membership test the
//! `is` operator lowers to.
//!
//! ## Examples
//! ```rust
//! use totem_runtime::{EnumSet, Value};
//!
//! let color = EnumSet::new(["Red", "Blue"]);
//! assert!(color.is(&Value::str("Red")));
//! assert!(!color.is(&Value::str("Green")));
//! assert!(!color.is(&Value::str("")));
//! ```

use std::rc::Rc;

use crate::value::Value;

/// A frozen set of enum tags.
///
/// Cloning shares the tag list; equality is identity, matching reference
/// semantics in the emitted programs.
#[derive(Debug, Clone)]
pub struct EnumSet {
    tags: Rc<Vec<String>>,
}

impl EnumSet {
    /// Construct an enum set from its tags, in declaration order.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Rc::new(tags.into_iter().map(Into::into).collect()),
        }
    }

    /// Return the tags in declaration order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Report whether a tag is declared on this enum.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Membership test for the `is` operator.
    ///
    /// Falsy values are never members, so the empty string misses even when a
    /// falsy tag could be spelled.
    pub fn is(&self, value: &Value) -> bool {
        if !value.truthy() {
            return false;
        }
        match value {
            Value::Str(tag) => self.contains(tag),
            _ => false,
        }
    }
}

impl PartialEq for EnumSet {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tags, &other.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_requires_a_truthy_tag() {
        let status = EnumSet::new(["Open", "Closed"]);
        assert!(status.is(&Value::str("Open")));
        assert!(status.is(&Value::str("Closed")));
        assert!(!status.is(&Value::str("open")));
        assert!(!status.is(&Value::Null));
        assert!(!status.is(&Value::number(0.0)));
        assert!(!status.is(&Value::Bool(true)));
    }

    #[test]
    fn empty_set_rejects_everything() {
        let none = EnumSet::new(Vec::<String>::new());
        assert!(none.tags().is_empty());
        assert!(!none.is(&Value::str("anything")));
    }
}
