#![forbid(unsafe_code)]
//! Totem Programming Language Transpiler
//!
//! Totem is a small object-oriented scripting language that compiles to
//! JavaScript. This crate provides the transpiler: a tree-walking emitter over
//! the [`totem_syntax`] node set, a compile-scoped symbol registry, and
//! non-fatal emission diagnostics. Emitted programs lean on the object runtime
//! in [`totem_runtime`], which exists both as a Rust object model for
//! embedders and as the JavaScript rendition prepended to emitted output.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: emission never panics and never aborts; malformed
//!   constructs degrade to placeholder text plus a [`Diagnostic`]. The runtime
//!   crate enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: the emitter produces JavaScript as *string
//!   fragments*; nothing in the emitted text is executed by this crate.

pub mod codegen;
pub mod diagnostics;
pub mod registry;
mod validation;

pub use totem_syntax::ast;
pub use totem_syntax::ops;

pub use codegen::Codegen;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use registry::SymbolRegistry;

/// Configuration recognized by [`transpile`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TranspileOptions {
    /// Omit the embedded runtime source from the output; the caller is
    /// expected to supply it separately.
    pub debug: bool,
}

/// Names declared over one compilation, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileMetadata {
    pub enums: Vec<String>,
    pub types: Vec<String>,
    pub typechecks: Vec<String>,
}

/// The outcome of one compilation.
///
/// `code` is always runnable best-effort output; callers that want strict
/// correctness must also check that `diagnostics` is empty.
#[derive(Debug, Clone)]
pub struct Transpiled {
    pub code: String,
    pub metadata: CompileMetadata,
    pub diagnostics: Vec<Diagnostic>,
}

/// Transpile a program to JavaScript.
///
/// The emitted body is preceded by the runtime's own source unless
/// [`TranspileOptions::debug`] is set.
///
/// ## Examples
/// ```rust
/// use totem::ast::{EnumExpr, Expr, Program, Stmt};
///
/// let program = Program::new(vec![Stmt::Expr(Expr::Enum(EnumExpr::named(
///     "Color",
///     vec!["Red".into(), "Blue".into()],
/// )))]);
/// let out = totem::transpile(&program, totem::TranspileOptions { debug: true });
/// assert_eq!(out.code, "const Color=_o.$Enum(\"Red\",\"Blue\");");
/// assert_eq!(out.metadata.enums, ["Color"]);
/// ```
#[tracing::instrument(skip_all, fields(statements = program.body.len()))]
pub fn transpile(program: &ast::Program, options: TranspileOptions) -> Transpiled {
    let mut codegen = Codegen::new();
    let body = codegen.emit_program(program);
    let (registry, diagnostics) = codegen.finish();

    let code = if options.debug {
        body
    } else {
        format!("{}\n{body}", totem_runtime::JS_SOURCE)
    };

    Transpiled {
        code,
        metadata: CompileMetadata {
            enums: registry.enums().to_vec(),
            types: registry.types().to_vec(),
            typechecks: registry.typechecks().to_vec(),
        },
        diagnostics,
    }
}
