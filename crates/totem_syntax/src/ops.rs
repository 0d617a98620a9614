//! Operator vocabulary.
//!
//! This module defines the operator set of the Totem surface language together with the
//! precedence and associativity each operator has in the emitted JavaScript, so the emitter
//! can parenthesize operands exactly where the target grammar requires it.
//!
//! ## Notes
//! - `precedence` is a relative ordering where **higher binds tighter**. The scale spans
//!   [`PREC_SEQUENCE`] (comma, loosest) through [`PREC_ATOM`] (literals and identifiers).
//! - Lookup via `from_str` is **case-sensitive**.
//! - `is` is spelled with a reserved word; its entry has [`OperatorInfo::is_keyword_spelling`]
//!   set to `true`. It does not emit as an infix operator at all (it lowers to a membership
//!   call), but it still carries relational precedence for the parser's benefit.
//!
//! ## Examples
//! ```rust
//! use totem_syntax::ops::{Associativity, BinaryOp};
//!
//! assert_eq!(BinaryOp::from_str("+"), Some(BinaryOp::Add));
//! assert!(BinaryOp::Mul.info().precedence > BinaryOp::Add.info().precedence);
//! assert_eq!(BinaryOp::Exp.info().associativity, Associativity::Right);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

// Precedence levels of the target-language grammar that are not tied to a
// single operator. Binary operator levels sit between PREC_CONDITIONAL and
// PREC_UNARY and are carried by each operator's metadata.

/// Comma/sequence expressions; the loosest level.
pub const PREC_SEQUENCE: u8 = 1;
/// Assignment (right-associative) and arrow-function bodies.
pub const PREC_ASSIGN: u8 = 2;
/// The ternary conditional.
pub const PREC_CONDITIONAL: u8 = 3;
/// Prefix unary operators.
pub const PREC_UNARY: u8 = 15;
/// Postfix update operators.
pub const PREC_POSTFIX: u8 = 16;
/// Call expressions.
pub const PREC_CALL: u8 = 17;
/// Member access and `new` with arguments; a `new` callee must be at least this tight.
pub const PREC_MEMBER: u8 = 18;
/// Identifiers, literals, and parenthesized groups.
pub const PREC_ATOM: u8 = 19;

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub is_keyword_spelling: bool,
}

const fn op(spelling: &'static str, precedence: u8, associativity: Associativity) -> OperatorInfo {
    OperatorInfo {
        spelling,
        precedence,
        associativity,
        is_keyword_spelling: false,
    }
}

const fn word_op(spelling: &'static str, precedence: u8, associativity: Associativity) -> OperatorInfo {
    OperatorInfo {
        spelling,
        precedence,
        associativity,
        is_keyword_spelling: true,
    }
}

/// Infix (binary and logical) operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Logical
    Or,
    And,
    // Bitwise
    BitOr,
    BitXor,
    BitAnd,
    // Equality
    Eq,
    Ne,
    StrictEq,
    StrictNe,
    // Relational
    Lt,
    Le,
    Gt,
    Ge,
    /// Reserved membership operator; lowers to an enum membership call.
    Is,
    // Shift
    Shl,
    Shr,
    UShr,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Exp,
}

impl BinaryOp {
    /// All operators, in precedence order (loosest first).
    pub const ALL: &'static [BinaryOp] = &[
        BinaryOp::Or,
        BinaryOp::And,
        BinaryOp::BitOr,
        BinaryOp::BitXor,
        BinaryOp::BitAnd,
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::StrictEq,
        BinaryOp::StrictNe,
        BinaryOp::Lt,
        BinaryOp::Le,
        BinaryOp::Gt,
        BinaryOp::Ge,
        BinaryOp::Is,
        BinaryOp::Shl,
        BinaryOp::Shr,
        BinaryOp::UShr,
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Rem,
        BinaryOp::Exp,
    ];

    /// Return the metadata entry for this operator.
    pub const fn info(self) -> OperatorInfo {
        match self {
            BinaryOp::Or => op("||", 4, Associativity::Left),
            BinaryOp::And => op("&&", 5, Associativity::Left),
            BinaryOp::BitOr => op("|", 6, Associativity::Left),
            BinaryOp::BitXor => op("^", 7, Associativity::Left),
            BinaryOp::BitAnd => op("&", 8, Associativity::Left),
            BinaryOp::Eq => op("==", 9, Associativity::Left),
            BinaryOp::Ne => op("!=", 9, Associativity::Left),
            BinaryOp::StrictEq => op("===", 9, Associativity::Left),
            BinaryOp::StrictNe => op("!==", 9, Associativity::Left),
            BinaryOp::Lt => op("<", 10, Associativity::Left),
            BinaryOp::Le => op("<=", 10, Associativity::Left),
            BinaryOp::Gt => op(">", 10, Associativity::Left),
            BinaryOp::Ge => op(">=", 10, Associativity::Left),
            BinaryOp::Is => word_op("is", 10, Associativity::Left),
            BinaryOp::Shl => op("<<", 11, Associativity::Left),
            BinaryOp::Shr => op(">>", 11, Associativity::Left),
            BinaryOp::UShr => op(">>>", 11, Associativity::Left),
            BinaryOp::Add => op("+", 12, Associativity::Left),
            BinaryOp::Sub => op("-", 12, Associativity::Left),
            BinaryOp::Mul => op("*", 13, Associativity::Left),
            BinaryOp::Div => op("/", 13, Associativity::Left),
            BinaryOp::Rem => op("%", 13, Associativity::Left),
            BinaryOp::Exp => op("**", 14, Associativity::Right),
        }
    }

    /// Return the operator's emitted spelling.
    pub const fn as_str(self) -> &'static str {
        self.info().spelling
    }

    /// Resolve a spelling to an operator, if it exists.
    pub fn from_str(spelling: &str) -> Option<BinaryOp> {
        BinaryOp::ALL.iter().copied().find(|o| o.as_str() == spelling)
    }
}

/// Assignment operators. All share [`PREC_ASSIGN`] and associate right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl AssignOp {
    pub const ALL: &'static [AssignOp] = &[
        AssignOp::Assign,
        AssignOp::Add,
        AssignOp::Sub,
        AssignOp::Mul,
        AssignOp::Div,
        AssignOp::Rem,
    ];

    pub const fn info(self) -> OperatorInfo {
        match self {
            AssignOp::Assign => op("=", PREC_ASSIGN, Associativity::Right),
            AssignOp::Add => op("+=", PREC_ASSIGN, Associativity::Right),
            AssignOp::Sub => op("-=", PREC_ASSIGN, Associativity::Right),
            AssignOp::Mul => op("*=", PREC_ASSIGN, Associativity::Right),
            AssignOp::Div => op("/=", PREC_ASSIGN, Associativity::Right),
            AssignOp::Rem => op("%=", PREC_ASSIGN, Associativity::Right),
        }
    }

    pub const fn as_str(self) -> &'static str {
        self.info().spelling
    }

    pub fn from_str(spelling: &str) -> Option<AssignOp> {
        AssignOp::ALL.iter().copied().find(|o| o.as_str() == spelling)
    }
}

/// Prefix unary operators. All share [`PREC_UNARY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
    Pos,
    BitNot,
    Typeof,
    Void,
    Delete,
}

impl UnaryOp {
    pub const ALL: &'static [UnaryOp] = &[
        UnaryOp::Not,
        UnaryOp::Neg,
        UnaryOp::Pos,
        UnaryOp::BitNot,
        UnaryOp::Typeof,
        UnaryOp::Void,
        UnaryOp::Delete,
    ];

    pub const fn info(self) -> OperatorInfo {
        match self {
            UnaryOp::Not => op("!", PREC_UNARY, Associativity::Right),
            UnaryOp::Neg => op("-", PREC_UNARY, Associativity::Right),
            UnaryOp::Pos => op("+", PREC_UNARY, Associativity::Right),
            UnaryOp::BitNot => op("~", PREC_UNARY, Associativity::Right),
            UnaryOp::Typeof => word_op("typeof", PREC_UNARY, Associativity::Right),
            UnaryOp::Void => word_op("void", PREC_UNARY, Associativity::Right),
            UnaryOp::Delete => word_op("delete", PREC_UNARY, Associativity::Right),
        }
    }

    pub const fn as_str(self) -> &'static str {
        self.info().spelling
    }

    pub fn from_str(spelling: &str) -> Option<UnaryOp> {
        UnaryOp::ALL.iter().copied().find(|o| o.as_str() == spelling)
    }
}

/// Update operators (`++`/`--`), usable in prefix or postfix position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateOp {
    Incr,
    Decr,
}

impl UpdateOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            UpdateOp::Incr => "++",
            UpdateOp::Decr => "--",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_binary_spelling_round_trips() {
        for op in BinaryOp::ALL {
            assert_eq!(BinaryOp::from_str(op.as_str()), Some(*op));
        }
        for op in AssignOp::ALL {
            assert_eq!(AssignOp::from_str(op.as_str()), Some(*op));
        }
        for op in UnaryOp::ALL {
            assert_eq!(UnaryOp::from_str(op.as_str()), Some(*op));
        }
    }

    #[test]
    fn precedence_ladder_matches_target_grammar() {
        // Logical looser than bitwise, bitwise looser than equality, and so on
        // up to exponentiation.
        let ladder = [
            BinaryOp::Or,
            BinaryOp::And,
            BinaryOp::BitOr,
            BinaryOp::BitXor,
            BinaryOp::BitAnd,
            BinaryOp::Eq,
            BinaryOp::Lt,
            BinaryOp::Shl,
            BinaryOp::Add,
            BinaryOp::Mul,
            BinaryOp::Exp,
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0].info().precedence < pair[1].info().precedence);
        }
        assert!(PREC_SEQUENCE < PREC_ASSIGN);
        assert!(PREC_ASSIGN < PREC_CONDITIONAL);
        assert!(PREC_CONDITIONAL < BinaryOp::Or.info().precedence);
        assert!(BinaryOp::Exp.info().precedence < PREC_UNARY);
        assert!(PREC_CALL < PREC_MEMBER);
        assert!(PREC_MEMBER < PREC_ATOM);
    }

    #[test]
    fn right_associative_operators() {
        assert_eq!(BinaryOp::Exp.info().associativity, Associativity::Right);
        for op in AssignOp::ALL {
            assert_eq!(op.info().associativity, Associativity::Right);
        }
        assert_eq!(BinaryOp::Add.info().associativity, Associativity::Left);
    }

    #[test]
    fn keyword_spellings_are_flagged() {
        assert!(BinaryOp::Is.info().is_keyword_spelling);
        assert!(UnaryOp::Typeof.info().is_keyword_spelling);
        assert!(!BinaryOp::Add.info().is_keyword_spelling);
    }
}
