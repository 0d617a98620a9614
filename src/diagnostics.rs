//! Diagnostics for Totem emission.
//!
//! Emission never aborts on a bad construct: the emitter reports here, emits
//! placeholder or degenerate text, and keeps going. Callers that want strict
//! correctness inspect the collected diagnostics; callers that ignore them
//! still get runnable output.

use core::fmt;

/// A non-fatal problem found while emitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn malformed_is() -> Self {
        Self::new(
            DiagnosticKind::MalformedIs,
            "operator 'is' requires an identifier as its right operand",
        )
    }

    pub fn unsupported_statement(node_kind: &str) -> Self {
        Self::new(
            DiagnosticKind::UnsupportedStatement,
            format!("unknown statement kind '{node_kind}', emitted a placeholder"),
        )
    }

    pub fn unsupported_expression(node_kind: &str) -> Self {
        Self::new(
            DiagnosticKind::UnsupportedExpression,
            format!("unknown expression kind '{node_kind}', emitted a placeholder"),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// What went wrong; the emitter's degraded output per kind is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// `is` used with something other than an identifier on the right.
    MalformedIs,
    /// Statement kind outside the supported catalogue.
    UnsupportedStatement,
    /// Expression kind outside the supported catalogue.
    UnsupportedExpression,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::MalformedIs => write!(f, "malformed is-expression"),
            DiagnosticKind::UnsupportedStatement => write!(f, "unsupported statement"),
            DiagnosticKind::UnsupportedExpression => write!(f, "unsupported expression"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_the_kind() {
        let d = Diagnostic::unsupported_statement("WithStatement");
        assert_eq!(
            d.to_string(),
            "unsupported statement: unknown statement kind 'WithStatement', emitted a placeholder"
        );
    }
}
