//! Shared syntax vocabulary for the Totem language: AST node types and operator metadata.
//!
//! This crate is dependency-free and intended for reuse across the transpiler and any future
//! interactive tooling. The external parser produces these nodes; the transpiler consumes them.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not do name resolution or code emission.
//! - Nodes are plain owned data with no source spans; diagnostics in the transpiler are
//!   text-only by contract.
//!
//! ## Examples
//! ```rust
//! use totem_syntax::ast::{Expr, Stmt, Program};
//!
//! let program = Program::new(vec![Stmt::Expr(Expr::call(
//!     Expr::ident("print"),
//!     vec![Expr::str("hello")],
//! ))]);
//! assert_eq!(program.body.len(), 1);
//! ```

pub mod ast;
pub mod ops;
