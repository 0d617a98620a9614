//! Function, method, and guard-prologue emission.
//!
//! Declarations, anonymous expressions, and type members all share one body
//! shape: a parameter list and a braced block, with an argument guard ahead
//! of the first statement when any parameter declares a validation test. The
//! guard conjoins one predicate per parameter (`true` for untested ones) and
//! bails out with a logged error before the body runs.

use totem_syntax::ast::{FunctionDecl, FunctionExpr, Param, Stmt};
use totem_syntax::ops;

use super::{Codegen, Emitted, API_OBJECT};

impl Codegen {
    pub(crate) fn emit_function_decl(&mut self, decl: &FunctionDecl) -> String {
        let prologue = self.guard_prologue(&decl.params);
        format!(
            "function {}({}){}",
            decl.name,
            param_names(&decl.params),
            self.emit_block(&decl.body, &prologue),
        )
    }

    /// Anonymous function expressions bind loosest of all postfix-capable
    /// forms, so callee or operand positions force parentheses around them.
    pub(crate) fn emit_function_expr(&mut self, func: &FunctionExpr) -> Emitted {
        let prologue = self.guard_prologue(&func.params);
        let text = format!(
            "function ({}){}",
            param_names(&func.params),
            self.emit_block(&func.body, &prologue),
        );
        Emitted::new(text, ops::PREC_ASSIGN)
    }

    /// Object-member shorthand: `name(params){...}`. Type descriptors use it
    /// for `ctor` and method `handler` entries.
    pub(crate) fn emit_method(&mut self, name: &str, params: &[Param], body: &[Stmt]) -> String {
        let prologue = self.guard_prologue(params);
        format!(
            "{name}({}){}",
            param_names(params),
            self.emit_block(body, &prologue)
        )
    }

    fn guard_prologue(&mut self, params: &[Param]) -> String {
        if params.iter().all(|param| param.test.is_none()) {
            return String::new();
        }
        let tests = params
            .iter()
            .map(|param| match &param.test {
                Some(test) => self.validation(test, &param.name).expr,
                None => "true".to_string(),
            })
            .collect::<Vec<_>>()
            .join("&&");
        format!("if(!({tests})){{{API_OBJECT}.$Log.err('Arguments was invalid');return;}}")
    }
}

fn param_names(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| param.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
