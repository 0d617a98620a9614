//! Compile-scoped symbol registry.
//!
//! The registry is created fresh per compilation and populated strictly in
//! declaration-encounter order, never by a pre-pass. A name resolves as an
//! enum, type, or typecheck only after its declaring statement has been
//! emitted; anything earlier falls back to generic codegen. Block-scoped
//! declarations additionally receive a fresh emitted identifier (`_0`, `_1`,
//! ...), and later references are substituted through that mapping.
//!
//! ## Notes
//! - Registering a name twice is accepted and changes nothing; membership is
//!   idempotent.
//! - Re-declaring a block-scoped name assigns a fresh encoding and the
//!   mapping is last-write-wins, so later references see the innermost
//!   declaration.

use std::collections::HashMap;

/// Symbol knowledge accumulated over one compilation.
#[derive(Debug, Default, Clone)]
pub struct SymbolRegistry {
    enums: Vec<String>,
    types: Vec<String>,
    typechecks: Vec<String>,
    encoded: HashMap<String, String>,
    next_encoded: usize,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an enum declaration under its emitted name.
    pub fn register_enum(&mut self, name: &str) {
        if !self.is_enum(name) {
            self.enums.push(name.to_string());
        }
    }

    /// Record a type declaration under its emitted name.
    pub fn register_type(&mut self, name: &str) {
        if !self.is_type(name) {
            self.types.push(name.to_string());
        }
    }

    /// Record a typecheck predicate declaration.
    pub fn register_typecheck(&mut self, name: &str) {
        if !self.is_typecheck(name) {
            self.typechecks.push(name.to_string());
        }
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.enums.iter().any(|n| n == name)
    }

    pub fn is_type(&self, name: &str) -> bool {
        self.types.iter().any(|n| n == name)
    }

    pub fn is_typecheck(&self, name: &str) -> bool {
        self.typechecks.iter().any(|n| n == name)
    }

    /// Assign the next emitted identifier to a block-scoped declaration and
    /// remember the mapping for later references.
    pub fn encode_declaration(&mut self, name: &str) -> String {
        let encoded = format!("_{}", self.next_encoded);
        self.next_encoded += 1;
        self.encoded.insert(name.to_string(), encoded.clone());
        encoded
    }

    /// Look up the emitted identifier for a source name, if one was assigned.
    pub fn encoded(&self, name: &str) -> Option<&str> {
        self.encoded.get(name).map(String::as_str)
    }

    /// Declared enum names, in declaration order.
    pub fn enums(&self) -> &[String] {
        &self.enums
    }

    /// Declared type names, in declaration order.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Declared typecheck names, in declaration order.
    pub fn typechecks(&self) -> &[String] {
        &self.typechecks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodings_count_up_from_zero() {
        let mut registry = SymbolRegistry::new();
        assert_eq!(registry.encode_declaration("a"), "_0");
        assert_eq!(registry.encode_declaration("b"), "_1");
        assert_eq!(registry.encoded("a"), Some("_0"));
        assert_eq!(registry.encoded("missing"), None);
    }

    #[test]
    fn redeclaration_is_last_write_wins() {
        let mut registry = SymbolRegistry::new();
        registry.encode_declaration("x");
        assert_eq!(registry.encode_declaration("x"), "_1");
        assert_eq!(registry.encoded("x"), Some("_1"));
    }

    #[test]
    fn registration_is_idempotent() {
        let mut registry = SymbolRegistry::new();
        registry.register_enum("Color");
        registry.register_enum("Color");
        assert_eq!(registry.enums(), ["Color"]);
        assert!(registry.is_enum("Color"));
        assert!(!registry.is_type("Color"));
    }

    #[test]
    fn names_resolve_only_after_registration() {
        let mut registry = SymbolRegistry::new();
        assert!(!registry.is_typecheck("isPositive"));
        registry.register_typecheck("isPositive");
        assert!(registry.is_typecheck("isPositive"));
    }
}
