//! Enum factory calls and type descriptor literals.
//!
//! Both definitions lower to calls on the runtime api object. An enum becomes
//! `_o.$Enum("A","B")`; a type becomes `_o.$Type({...})` with one descriptor
//! entry per member. Fields carry the fixed visibility pair (public reads,
//! private writes), a `null` initial, and an optional typecheck lambda.

use totem_syntax::ast::{EnumExpr, FieldMember, MethodMember, TypeExpr, TypeMember};
use totem_syntax::ops;

use super::{Codegen, Emitted, API_OBJECT};

impl Codegen {
    pub(crate) fn emit_enum(&mut self, def: &EnumExpr) -> Emitted {
        let members = def
            .members
            .iter()
            .map(|member| format!("\"{member}\""))
            .collect::<Vec<_>>()
            .join(",");
        Emitted::new(format!("{API_OBJECT}.$Enum({members})"), ops::PREC_CALL)
    }

    pub(crate) fn emit_type(&mut self, def: &TypeExpr) -> Emitted {
        let members = def
            .members
            .iter()
            .map(|member| self.emit_type_member(member))
            .collect::<Vec<_>>()
            .join(",");
        Emitted::new(
            format!("{API_OBJECT}.$Type({{$name:\"{}\",{members}}})", def.name),
            ops::PREC_CALL,
        )
    }

    fn emit_type_member(&mut self, member: &TypeMember) -> String {
        match member {
            TypeMember::Field(field) => self.emit_field_member(field),
            TypeMember::Ctor(ctor) => self.emit_method("ctor", &ctor.params, &ctor.body),
            TypeMember::Method(method) => self.emit_method_member(method),
        }
    }

    fn emit_field_member(&mut self, field: &FieldMember) -> String {
        let typecheck = match &field.test {
            Some(test) => format!("typecheck:{}", self.typecheck_lambda(test)),
            None => String::new(),
        };
        format!(
            "{}:{{get:'public',set:'private',initial:null,{typecheck}}}",
            field.name
        )
    }

    fn emit_method_member(&mut self, method: &MethodMember) -> String {
        let marker = if method.private { "private:true," } else { "" };
        format!(
            "{}:{{{marker}{}}}",
            method.name,
            self.emit_method("handler", &method.params, &method.body)
        )
    }
}
