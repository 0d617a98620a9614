//! Code emission for Totem programs.
//!
//! The emitter walks the syntax tree once, in source order, translating each
//! construct into target-language text while the registry accumulates symbol
//! knowledge. Declarations register before their initializers emit, so a name
//! specializes later emission only once its declaring statement has been
//! reached; forward references fall back to generic codegen.
//!
//! ## Module Organization
//!
//! - `mod.rs` - The `Codegen` driver, emitted-fragment type, identifier
//!   substitution
//! - `statements.rs` - Statement emission
//! - `expressions.rs` - Expression emission with precedence-aware grouping
//! - `declarations.rs` - Enum factory calls and type descriptor literals
//! - `functions.rs` - Function, method, and guard-prologue emission

mod declarations;
mod expressions;
mod functions;
mod statements;

use totem_syntax::ast::{Program, Stmt};
use totem_syntax::ops;

use crate::diagnostics::Diagnostic;
use crate::registry::SymbolRegistry;

/// Name of the runtime api object addressed by emitted code.
pub(crate) const API_OBJECT: &str = "_o";

/// A fragment of emitted text plus the precedence of its outermost form.
///
/// Parents compare the fragment's precedence against the minimum their
/// position admits and group with parentheses only when they must.
pub(crate) struct Emitted {
    pub(crate) text: String,
    pub(crate) precedence: u8,
}

impl Emitted {
    pub(crate) fn new(text: String, precedence: u8) -> Self {
        Self { text, precedence }
    }

    /// A fragment that never needs grouping.
    pub(crate) fn atom(text: impl Into<String>) -> Self {
        Self::new(text.into(), ops::PREC_ATOM)
    }

    pub(crate) fn grouped(self, min_precedence: u8) -> String {
        if self.precedence < min_precedence {
            format!("({})", self.text)
        } else {
            self.text
        }
    }
}

/// Tree-walking code emitter.
///
/// One per compilation. Emission never fails: malformed constructs degrade to
/// placeholder text and a diagnostic. [`Codegen::finish`] surrenders the
/// registry and the collected diagnostics after the tree has been emitted.
pub struct Codegen {
    pub(crate) registry: SymbolRegistry,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Codegen {
    pub fn new() -> Self {
        Self {
            registry: SymbolRegistry::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Emit a whole program, one statement per line.
    pub fn emit_program(&mut self, program: &Program) -> String {
        self.emit_body(&program.body)
    }

    pub(crate) fn emit_body(&mut self, body: &[Stmt]) -> String {
        body.iter().map(|stmt| self.emit_stmt(stmt)).collect::<Vec<_>>().join("\n")
    }

    /// Surrender the accumulated registry and diagnostics.
    pub fn finish(self) -> (SymbolRegistry, Vec<Diagnostic>) {
        (self.registry, self.diagnostics)
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(%diagnostic, "emission diagnostic");
        self.diagnostics.push(diagnostic);
    }

    /// Builtin name substitutions: the logging entry points resolve to the
    /// runtime's logger.
    pub(crate) fn builtin(name: &str) -> Option<String> {
        let entry = match name {
            "print" | "info" | "warn" | "err" => name,
            _ => return None,
        };
        Some(format!("{API_OBJECT}.$Log.{entry}"))
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}
