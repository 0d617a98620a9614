//! Expression emission with precedence-aware grouping.
//!
//! Every expression emits as an [`Emitted`] fragment carrying the precedence
//! its outermost form binds at. The parent position supplies the minimum
//! precedence it admits and [`Emitted::grouped`] adds parentheses only below
//! that, so `a*(b+c)` groups while `a+b*c` does not.
//!
//! ## Notes
//! - Identifier emission resolves builtins first, then block-scope encodings,
//!   and falls back to the source spelling. Substitution applies to variable
//!   references only; declared names, parameters, and dotted member names
//!   emit verbatim.
//! - Dotted access on a registered enum collapses to the member tag string
//!   (`Color.Red` emits `"Red"`). Computed access never collapses.
//! - `is` lowers to a membership call on its right operand, which must be an
//!   identifier; anything else degrades to `undefined` plus a diagnostic.

use totem_syntax::ast::{
    AssignExpr, BinaryExpr, CallExpr, ConditionalExpr, Expr, Literal, MemberExpr, NewExpr,
    Property, PropertyKey, UnaryExpr, UpdateExpr,
};
use totem_syntax::ops::{self, Associativity, BinaryOp};

use super::{Codegen, Emitted};
use crate::diagnostics::Diagnostic;

impl Codegen {
    /// Emit an expression for a position admitting `min_precedence`, grouping
    /// when the fragment binds looser.
    pub(crate) fn emit_operand(&mut self, expr: &Expr, min_precedence: u8) -> String {
        self.emit_expr(expr).grouped(min_precedence)
    }

    pub(crate) fn emit_expr(&mut self, expr: &Expr) -> Emitted {
        match expr {
            Expr::Ident(name) => Emitted::atom(self.emit_ident(name)),
            Expr::This => Emitted::atom("this"),
            Expr::Literal(literal) => emit_literal(literal),
            Expr::Call(call) => self.emit_call(call),
            Expr::Member(member) => self.emit_member(member),
            Expr::Binary(binary) => self.emit_binary(binary),
            Expr::Assign(assign) => self.emit_assign(assign),
            Expr::Conditional(conditional) => self.emit_conditional(conditional),
            Expr::Sequence(exprs) => self.emit_sequence(exprs),
            Expr::Update(update) => self.emit_update(update),
            Expr::Unary(unary) => self.emit_unary(unary),
            Expr::New(new) => self.emit_new(new),
            Expr::Array(elements) => self.emit_array(elements),
            Expr::Object(properties) => self.emit_object(properties),
            Expr::Enum(def) => self.emit_enum(def),
            Expr::Type(def) => self.emit_type(def),
            Expr::Function(func) => self.emit_function_expr(func),
            Expr::Unsupported(kind) => {
                self.report(Diagnostic::unsupported_expression(kind));
                Emitted::atom(format!("/*{kind}*/"))
            }
        }
    }

    /// Resolve an identifier reference: builtin transforms win, then the
    /// block-scope encoding, then the name itself.
    pub(crate) fn emit_ident(&self, name: &str) -> String {
        if let Some(transformed) = Self::builtin(name) {
            transformed
        } else if let Some(encoded) = self.registry.encoded(name) {
            encoded.to_string()
        } else {
            name.to_string()
        }
    }

    /// Argument lists join with bare commas, so each argument must bind at
    /// least as tight as assignment.
    pub(crate) fn emit_args(&mut self, args: &[Expr]) -> String {
        args.iter()
            .map(|arg| self.emit_operand(arg, ops::PREC_ASSIGN))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn emit_call(&mut self, call: &CallExpr) -> Emitted {
        let callee = self.emit_operand(&call.callee, ops::PREC_CALL);
        let args = self.emit_args(&call.args);
        Emitted::new(format!("{callee}({args})"), ops::PREC_CALL)
    }

    fn emit_member(&mut self, member: &MemberExpr) -> Emitted {
        let object = self.emit_expr(&member.object);

        if !member.computed && self.registry.is_enum(&object.text) {
            if let Expr::Ident(tag) = member.property.as_ref() {
                return Emitted::atom(format!("\"{tag}\""));
            }
        }

        let object = object.grouped(ops::PREC_CALL);
        if member.computed {
            let property = self.emit_operand(&member.property, ops::PREC_SEQUENCE);
            Emitted::new(format!("{object}[{property}]"), ops::PREC_MEMBER)
        } else {
            // Dotted names are member labels, not variable references.
            let property = match member.property.as_ref() {
                Expr::Ident(name) => name.clone(),
                other => self.emit_expr(other).text,
            };
            Emitted::new(format!("{object}.{property}"), ops::PREC_MEMBER)
        }
    }

    fn emit_binary(&mut self, binary: &BinaryExpr) -> Emitted {
        if binary.op == BinaryOp::Is {
            return self.emit_is(binary);
        }
        let info = binary.op.info();
        // The associative side repeats at the operator's own level; the other
        // side must bind strictly tighter.
        let (left_min, right_min) = match info.associativity {
            Associativity::Left => (info.precedence, info.precedence + 1),
            Associativity::Right => (info.precedence + 1, info.precedence),
        };
        let left = self.emit_operand(&binary.left, left_min);
        let right = self.emit_operand(&binary.right, right_min);
        Emitted::new(format!("{left}{}{right}", info.spelling), info.precedence)
    }

    fn emit_is(&mut self, binary: &BinaryExpr) -> Emitted {
        let Expr::Ident(name) = binary.right.as_ref() else {
            self.report(Diagnostic::malformed_is());
            return Emitted::atom("undefined");
        };
        let resolved = self.emit_ident(name);
        let operand = self.emit_operand(&binary.left, ops::PREC_ASSIGN);
        Emitted::new(format!("{resolved}.is({operand})"), ops::PREC_CALL)
    }

    fn emit_assign(&mut self, assign: &AssignExpr) -> Emitted {
        let target = self.emit_operand(&assign.target, ops::PREC_CALL);
        let value = self.emit_operand(&assign.value, ops::PREC_ASSIGN);
        Emitted::new(
            format!("{target}{}{value}", assign.op.as_str()),
            ops::PREC_ASSIGN,
        )
    }

    fn emit_conditional(&mut self, conditional: &ConditionalExpr) -> Emitted {
        let test = self.emit_operand(&conditional.test, BinaryOp::Or.info().precedence);
        let consequent = self.emit_operand(&conditional.consequent, ops::PREC_ASSIGN);
        let alternate = self.emit_operand(&conditional.alternate, ops::PREC_ASSIGN);
        Emitted::new(
            format!("{test} ? {consequent} : {alternate}"),
            ops::PREC_CONDITIONAL,
        )
    }

    fn emit_sequence(&mut self, exprs: &[Expr]) -> Emitted {
        let text = exprs
            .iter()
            .map(|expr| self.emit_operand(expr, ops::PREC_ASSIGN))
            .collect::<Vec<_>>()
            .join(",");
        Emitted::new(text, ops::PREC_SEQUENCE)
    }

    fn emit_update(&mut self, update: &UpdateExpr) -> Emitted {
        let target = self.emit_operand(&update.target, ops::PREC_CALL);
        if update.prefix {
            Emitted::new(format!("{}{target}", update.op.as_str()), ops::PREC_UNARY)
        } else {
            Emitted::new(format!("{target}{}", update.op.as_str()), ops::PREC_POSTFIX)
        }
    }

    fn emit_unary(&mut self, unary: &UnaryExpr) -> Emitted {
        let operand = self.emit_operand(&unary.operand, ops::PREC_UNARY);
        let text = if unary.prefix {
            format!("{} {operand}", unary.op.as_str())
        } else {
            format!("{operand} {}", unary.op.as_str())
        };
        Emitted::new(text, ops::PREC_UNARY)
    }

    /// `new` on a registered type drops the keyword: type constructors are
    /// plain factory closures at runtime.
    fn emit_new(&mut self, new: &NewExpr) -> Emitted {
        let callee = self.emit_expr(&new.callee);
        let args = self.emit_args(&new.args);
        if self.registry.is_type(&callee.text) {
            Emitted::new(format!("{}({args})", callee.text), ops::PREC_CALL)
        } else {
            Emitted::new(
                format!("new {}({args})", callee.grouped(ops::PREC_MEMBER)),
                ops::PREC_CALL,
            )
        }
    }

    fn emit_array(&mut self, elements: &[Expr]) -> Emitted {
        let elements = elements
            .iter()
            .map(|element| self.emit_operand(element, ops::PREC_ASSIGN))
            .collect::<Vec<_>>()
            .join(",");
        Emitted::new(format!("[{elements}]"), ops::PREC_ATOM)
    }

    fn emit_object(&mut self, properties: &[Property]) -> Emitted {
        let properties = properties
            .iter()
            .map(|property| {
                let key = match &property.key {
                    PropertyKey::Ident(name) => name.clone(),
                    PropertyKey::Str(text) => format!("\"{text}\""),
                };
                let value = self.emit_operand(&property.value, ops::PREC_ASSIGN);
                format!("{key}:{value}")
            })
            .collect::<Vec<_>>()
            .join(",");
        Emitted::new(format!("{{{properties}}}"), ops::PREC_ATOM)
    }
}

fn emit_literal(literal: &Literal) -> Emitted {
    match literal {
        Literal::Str(text) => Emitted::atom(format!("\"{text}\"")),
        Literal::Number(value) => {
            let text = number_literal(*value);
            // A leading minus reads as a unary application to the grammar.
            let precedence = if text.starts_with('-') {
                ops::PREC_UNARY
            } else {
                ops::PREC_ATOM
            };
            Emitted::new(text, precedence)
        }
        Literal::Bool(true) => Emitted::atom("true"),
        Literal::Bool(false) => Emitted::atom("false"),
        Literal::Null => Emitted::atom("null"),
        Literal::Undefined => Emitted::atom("undefined"),
    }
}

/// Number spelling in the target language: integral values drop the decimal
/// point while they fit the exact-integer range.
fn number_literal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        return format!("{}", value as i64);
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use totem_syntax::ast::*;
    use totem_syntax::ops::{BinaryOp, UnaryOp};

    use crate::codegen::Codegen;

    fn emit(expr: &Expr) -> String {
        Codegen::new().emit_expr(expr).text
    }

    #[test]
    fn grouping_follows_precedence() {
        let sum = Expr::binary(BinaryOp::Add, Expr::ident("a"), Expr::ident("b"));
        let scaled = Expr::binary(BinaryOp::Mul, sum.clone(), Expr::ident("c"));
        assert_eq!(emit(&scaled), "(a+b)*c");

        let plain = Expr::binary(BinaryOp::Add, sum, Expr::ident("c"));
        assert_eq!(emit(&plain), "a+b+c");
    }

    #[test]
    fn right_operands_group_at_equal_precedence() {
        let inner = Expr::binary(BinaryOp::Sub, Expr::ident("b"), Expr::ident("c"));
        let outer = Expr::binary(BinaryOp::Sub, Expr::ident("a"), inner);
        assert_eq!(emit(&outer), "a-(b-c)");
    }

    #[test]
    fn exponentiation_associates_right() {
        let chain = Expr::binary(
            BinaryOp::Exp,
            Expr::ident("a"),
            Expr::binary(BinaryOp::Exp, Expr::ident("b"), Expr::ident("c")),
        );
        assert_eq!(emit(&chain), "a**b**c");

        let left = Expr::binary(
            BinaryOp::Exp,
            Expr::binary(BinaryOp::Exp, Expr::ident("a"), Expr::ident("b")),
            Expr::ident("c"),
        );
        assert_eq!(emit(&left), "(a**b)**c");
    }

    #[test]
    fn negative_exponent_base_groups() {
        let squared = Expr::binary(BinaryOp::Exp, Expr::number(-2.0), Expr::number(2.0));
        assert_eq!(emit(&squared), "(-2)**2");
    }

    #[test]
    fn enum_member_access_collapses_to_the_tag() {
        let mut codegen = Codegen::new();
        codegen.registry.register_enum("Color");
        let access = Expr::member(Expr::ident("Color"), "Red");
        assert_eq!(codegen.emit_expr(&access).text, "\"Red\"");

        // Computed access keeps the runtime lookup.
        let lookup = Expr::index(Expr::ident("Color"), Expr::str("Red"));
        assert_eq!(codegen.emit_expr(&lookup).text, "Color[\"Red\"]");
    }

    #[test]
    fn is_lowers_to_a_membership_call() {
        let mut codegen = Codegen::new();
        let test = Expr::binary(BinaryOp::Is, Expr::ident("value"), Expr::ident("Color"));
        assert_eq!(codegen.emit_expr(&test).text, "Color.is(value)");
        assert!(codegen.diagnostics.is_empty());
    }

    #[test]
    fn is_with_a_bad_right_operand_degrades() {
        let mut codegen = Codegen::new();
        let test = Expr::binary(BinaryOp::Is, Expr::str("Red"), Expr::number(1.0));
        assert_eq!(codegen.emit_expr(&test).text, "undefined");
        assert_eq!(codegen.diagnostics.len(), 1);
    }

    #[test]
    fn new_drops_the_keyword_for_registered_types() {
        let mut codegen = Codegen::new();
        codegen.registry.register_type("Point");
        let known = Expr::new_instance(Expr::ident("Point"), vec![Expr::number(1.0)]);
        assert_eq!(codegen.emit_expr(&known).text, "Point(1)");

        let foreign = Expr::new_instance(Expr::ident("Date"), vec![]);
        assert_eq!(codegen.emit_expr(&foreign).text, "new Date()");
    }

    #[test]
    fn unary_keeps_a_separating_space() {
        let negated = Expr::unary(UnaryOp::Typeof, Expr::ident("x"));
        assert_eq!(emit(&negated), "typeof x");

        let inverted = Expr::unary(UnaryOp::Not, Expr::ident("ready"));
        assert_eq!(emit(&inverted), "! ready");
    }

    #[test]
    fn sequences_group_inside_argument_lists() {
        let call = Expr::call(
            Expr::ident("f"),
            vec![
                Expr::Sequence(vec![Expr::ident("a"), Expr::ident("b")]),
                Expr::ident("c"),
            ],
        );
        assert_eq!(emit(&call), "f((a,b),c)");
    }

    #[test]
    fn number_literals_spell_like_the_target() {
        assert_eq!(emit(&Expr::number(3.0)), "3");
        assert_eq!(emit(&Expr::number(2.5)), "2.5");
        assert_eq!(emit(&Expr::number(-7.0)), "-7");
    }

    #[test]
    fn string_keys_quote_and_ident_keys_do_not() {
        let object = Expr::Object(vec![
            Property::new(PropertyKey::Ident("a".into()), Expr::number(1.0)),
            Property::new(PropertyKey::Str("b c".into()), Expr::number(2.0)),
        ]);
        assert_eq!(emit(&object), "{a:1,\"b c\":2}");
    }
}
