//! Abstract syntax tree definitions for Totem
//!
//! This module defines every node kind the emitter handles. The external parser
//! produces these nodes; the emitter only reads them, so the same tree can be
//! emitted repeatedly or inspected afterwards.

use crate::ops::{AssignOp, BinaryOp, UnaryOp, UpdateOp};

/// Identifier (plain string; the language has no interning needs at this scale)
pub type Ident = String;

/// A program is an ordered sequence of statements
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `{ ... }`
    Block(Vec<Stmt>),
    /// An expression in statement position
    Expr(Expr),
    If(IfStmt),
    VarDecl(VarDecl),
    /// `typecheck Name = <test>` - declares a named validation predicate
    Typecheck(TypecheckDecl),
    Function(FunctionDecl),
    Return(Option<Expr>),
    Break,
    /// A construct the parser surfaced but the emitter does not handle;
    /// carries the foreign node-kind name for diagnostics.
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub test: Expr,
    pub consequent: Box<Stmt>,
    pub alternate: Option<Box<Stmt>>,
}

/// Block-scoped (`let`) or function-scoped (`var`) declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Let,
    Var,
}

impl DeclKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            DeclKind::Let => "let",
            DeclKind::Var => "var",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub kind: DeclKind,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: Ident,
    pub init: Option<Expr>,
}

impl Declarator {
    pub fn new(name: impl Into<Ident>, init: Expr) -> Self {
        Self {
            name: name.into(),
            init: Some(init),
        }
    }

    pub fn uninitialized(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            init: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypecheckDecl {
    pub name: Ident,
    pub test: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

/// A function parameter, optionally carrying a validation expression that the
/// emitter turns into a guard prologue predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub test: Option<Expr>,
}

impl Param {
    pub fn plain(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            test: None,
        }
    }

    pub fn tested(name: impl Into<Ident>, test: Expr) -> Self {
        Self {
            name: name.into(),
            test: Some(test),
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    This,
    Literal(Literal),
    Call(CallExpr),
    Member(MemberExpr),
    Binary(BinaryExpr),
    Assign(AssignExpr),
    Conditional(ConditionalExpr),
    /// Comma-separated expression sequence
    Sequence(Vec<Expr>),
    Update(UpdateExpr),
    Unary(UnaryExpr),
    New(NewExpr),
    Array(Vec<Expr>),
    Object(Vec<Property>),
    /// `enum [Name] { A | B | ... }`
    Enum(EnumExpr),
    /// `type Name { ... }`
    Type(TypeExpr),
    /// Anonymous function expression
    Function(FunctionExpr),
    /// A construct the parser surfaced but the emitter does not handle
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Number(f64),
    Bool(bool),
    Null,
    Undefined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: Box<Expr>,
    /// `a[b]` when true, `a.b` when false
    pub computed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub op: AssignOp,
    pub target: Box<Expr>,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    pub test: Box<Expr>,
    pub consequent: Box<Expr>,
    pub alternate: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpr {
    pub op: UpdateOp,
    pub prefix: bool,
    pub target: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub prefix: bool,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: PropertyKey,
    pub value: Expr,
}

impl Property {
    pub fn new(key: PropertyKey, value: Expr) -> Self {
        Self { key, value }
    }
}

/// Object-literal keys are names, not variable references; the emitter never
/// substitutes them.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Ident(Ident),
    Str(String),
}

// ============================================================================
// Enum and type definitions
// ============================================================================

/// An enum definition. The name is present when the definition is a
/// declaration (`enum Color { ... }`) and absent for anonymous value position.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumExpr {
    pub name: Option<Ident>,
    pub members: Vec<Ident>,
}

impl EnumExpr {
    pub fn named(name: impl Into<Ident>, members: Vec<Ident>) -> Self {
        Self {
            name: Some(name.into()),
            members,
        }
    }

    pub fn anonymous(members: Vec<Ident>) -> Self {
        Self {
            name: None,
            members,
        }
    }
}

/// A type definition. The name always exists; it becomes the runtime type tag
/// even when the definition appears in value position.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub name: Ident,
    pub members: Vec<TypeMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeMember {
    Field(FieldMember),
    Ctor(CtorMember),
    Method(MethodMember),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldMember {
    pub name: Ident,
    pub test: Option<Expr>,
}

impl FieldMember {
    pub fn plain(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            test: None,
        }
    }

    pub fn tested(name: impl Into<Ident>, test: Expr) -> Self {
        Self {
            name: name.into(),
            test: Some(test),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CtorMember {
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodMember {
    pub name: Ident,
    pub private: bool,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

// ============================================================================
// Constructor helpers
// ============================================================================

impl Expr {
    pub fn ident(name: impl Into<Ident>) -> Expr {
        Expr::Ident(name.into())
    }

    pub fn str(value: impl Into<String>) -> Expr {
        Expr::Literal(Literal::Str(value.into()))
    }

    pub fn number(value: f64) -> Expr {
        Expr::Literal(Literal::Number(value))
    }

    pub fn bool(value: bool) -> Expr {
        Expr::Literal(Literal::Bool(value))
    }

    pub fn null() -> Expr {
        Expr::Literal(Literal::Null)
    }

    pub fn undefined() -> Expr {
        Expr::Literal(Literal::Undefined)
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
        Expr::Call(CallExpr {
            callee: Box::new(callee),
            args,
        })
    }

    /// Dotted member access `object.property`
    pub fn member(object: Expr, property: impl Into<Ident>) -> Expr {
        Expr::Member(MemberExpr {
            object: Box::new(object),
            property: Box::new(Expr::Ident(property.into())),
            computed: false,
        })
    }

    /// Computed member access `object[property]`
    pub fn index(object: Expr, property: Expr) -> Expr {
        Expr::Member(MemberExpr {
            object: Box::new(object),
            property: Box::new(property),
            computed: true,
        })
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Plain `target = value` assignment
    pub fn assign(target: Expr, value: Expr) -> Expr {
        Expr::Assign(AssignExpr {
            op: AssignOp::Assign,
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    pub fn conditional(test: Expr, consequent: Expr, alternate: Expr) -> Expr {
        Expr::Conditional(ConditionalExpr {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    /// Prefix unary application
    pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary(UnaryExpr {
            op,
            prefix: true,
            operand: Box::new(operand),
        })
    }

    pub fn new_instance(callee: Expr, args: Vec<Expr>) -> Expr {
        Expr::New(NewExpr {
            callee: Box::new(callee),
            args,
        })
    }
}
