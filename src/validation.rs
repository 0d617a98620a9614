//! Validation predicate synthesis.
//!
//! Field typechecks and parameter guards share one synthesizer. A bare
//! identifier names a validation when it matches a primitive tester
//! (case-insensitively) or a registered enum, type, or typecheck after
//! substitution; any other expression passes through as a parenthesized
//! predicate evaluated as written.
//!
//! ## Notes
//! - `is_default` distinguishes synthesized predicates from pass-through
//!   expressions. Pass-through predicates may mention `this`, so field
//!   typechecks wrap them in a full `function` instead of an arrow.
//! - Resolution sees encodings, so a block-scoped enum or type validates on
//!   its emitted name.

use totem_syntax::ast::Expr;
use totem_syntax::ops;

use crate::codegen::{Codegen, API_OBJECT};

/// A synthesized validation predicate over one target variable.
pub(crate) struct Predicate {
    pub(crate) expr: String,
    /// True when synthesized from a recognized validation name; false for a
    /// pass-through expression.
    pub(crate) is_default: bool,
}

impl Codegen {
    pub(crate) fn validation(&mut self, test: &Expr, target: &str) -> Predicate {
        if let Expr::Ident(name) = test {
            let lowered = name.to_lowercase();
            match lowered.as_str() {
                "string" | "number" | "function" | "object" => {
                    return Predicate {
                        expr: format!("typeof {target}===\"{lowered}\""),
                        is_default: true,
                    };
                }
                "bool" | "boolean" => {
                    return Predicate {
                        expr: format!("typeof {target}===\"boolean\""),
                        is_default: true,
                    };
                }
                "array" => {
                    return Predicate {
                        expr: format!("Array.isArray({target})"),
                        is_default: true,
                    };
                }
                _ => {}
            }

            let resolved = self.emit_ident(name);
            if self.registry.is_enum(&resolved) {
                return Predicate {
                    expr: format!("{resolved}.is({target})"),
                    is_default: true,
                };
            }
            if self.registry.is_type(&resolved) {
                return Predicate {
                    expr: format!("{target}[{API_OBJECT}.$DataPointer]?.type===\"{resolved}\""),
                    is_default: true,
                };
            }
            if self.registry.is_typecheck(&resolved) {
                return Predicate {
                    expr: format!("{resolved}({target})"),
                    is_default: true,
                };
            }
        }

        Predicate {
            expr: format!("({})", self.emit_operand(test, ops::PREC_SEQUENCE)),
            is_default: false,
        }
    }

    /// Lower a field typecheck to a lambda over `value`. Pass-through
    /// predicates get a `function` wrapper so `this` binds to the instance.
    pub(crate) fn typecheck_lambda(&mut self, test: &Expr) -> String {
        let predicate = self.validation(test, "value");
        if predicate.is_default {
            format!("(value)=>{}", predicate.expr)
        } else {
            format!("function(value){{return {};}}", predicate.expr)
        }
    }
}
