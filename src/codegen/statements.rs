//! Statement emission.
//!
//! Statements emit as single lines without indentation; blocks are braced
//! inline. Declaration statements are where the registry learns names, so
//! emission order is registration order.

use totem_syntax::ast::{Declarator, Expr, IfStmt, Stmt, TypecheckDecl, VarDecl};
use totem_syntax::ops;

use super::Codegen;
use crate::diagnostics::Diagnostic;

impl Codegen {
    pub(crate) fn emit_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Block(body) => self.emit_block(body, ""),
            Stmt::Expr(expr) => self.emit_expr_stmt(expr),
            Stmt::If(if_stmt) => self.emit_if(if_stmt),
            Stmt::VarDecl(decl) => self.emit_var_decl(decl),
            Stmt::Typecheck(decl) => self.emit_typecheck_decl(decl),
            Stmt::Function(decl) => self.emit_function_decl(decl),
            Stmt::Return(None) => "return;".to_string(),
            Stmt::Return(Some(value)) => {
                format!("return {};", self.emit_operand(value, ops::PREC_SEQUENCE))
            }
            Stmt::Break => "break;".to_string(),
            Stmt::Unsupported(kind) => {
                self.report(Diagnostic::unsupported_statement(kind));
                format!("/*STMT:{kind}:*/")
            }
        }
    }

    /// Brace a statement list. The prologue slots in before the first
    /// statement; function emission passes the guard prologue through here.
    pub(crate) fn emit_block(&mut self, body: &[Stmt], prologue: &str) -> String {
        format!("{{{prologue}{}}}", self.emit_body(body))
    }

    /// Enum and type definitions in statement position declare their name as
    /// a `const`; the name registers before the value emits so the definition
    /// body already resolves it.
    fn emit_expr_stmt(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Enum(def) => {
                if let Some(name) = def.name.clone() {
                    self.registry.register_enum(&name);
                    return format!("const {name}={};", self.emit_enum(def).text);
                }
            }
            Expr::Type(def) => {
                let name = def.name.clone();
                self.registry.register_type(&name);
                return format!("const {name}={};", self.emit_type(def).text);
            }
            _ => {}
        }
        format!("{};", self.emit_operand(expr, ops::PREC_SEQUENCE))
    }

    fn emit_if(&mut self, stmt: &IfStmt) -> String {
        let emitted = format!(
            "if({}){}",
            self.emit_operand(&stmt.test, ops::PREC_SEQUENCE),
            self.emit_stmt(&stmt.consequent),
        );
        match &stmt.alternate {
            Some(alternate) => format!("{emitted}else {}", self.emit_stmt(alternate)),
            None => emitted,
        }
    }

    fn emit_var_decl(&mut self, decl: &VarDecl) -> String {
        let declarators = decl
            .declarators
            .iter()
            .map(|declarator| self.emit_declarator(declarator))
            .collect::<Vec<_>>()
            .join(",");
        format!("{} {declarators};", decl.kind.as_str())
    }

    /// The declared name maps to a fresh emitted identifier before the
    /// initializer emits, so a self-referencing initializer sees the new
    /// encoding. Enum and type initializers register under that encoding.
    fn emit_declarator(&mut self, declarator: &Declarator) -> String {
        let encoded = self.registry.encode_declaration(&declarator.name);
        match &declarator.init {
            Some(init) => {
                match init {
                    Expr::Enum(_) => self.registry.register_enum(&encoded),
                    Expr::Type(_) => self.registry.register_type(&encoded),
                    _ => {}
                }
                format!("{encoded}={}", self.emit_operand(init, ops::PREC_ASSIGN))
            }
            None => format!("{encoded}=null"),
        }
    }

    fn emit_typecheck_decl(&mut self, decl: &TypecheckDecl) -> String {
        self.registry.register_typecheck(&decl.name);
        format!(
            "const {}=(value)=>{};",
            decl.name,
            self.emit_operand(&decl.test, ops::PREC_ASSIGN)
        )
    }
}
