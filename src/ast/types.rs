//! Core language types and operators.
//!
//! This module defines:
//!
//! - `DecafType` - the type given to declarations and inferred for expressions
//! - `BinaryOp` / `UnaryOp` - the operator sets, grouped into type classes

use std::fmt::Display;

/// The types a declaration or expression can carry.
///
/// `Unknown` is the inference sentinel: it marks a value whose type could
/// not be resolved (e.g. an undefined symbol), so downstream checks skip it
/// instead of reporting a second error for the same cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecafType {
    Unknown,
    Int,
    Bool,
    Void,
    Str,
}

impl Display for DecafType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecafType::Unknown => write!(f, "unknown"),
            DecafType::Int => write!(f, "int"),
            DecafType::Bool => write!(f, "bool"),
            DecafType::Void => write!(f, "void"),
            DecafType::Str => write!(f, "str"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    GtEq,
    Gt,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    /// `==` and `!=`: both operands the same type, result is bool.
    pub fn is_equality(&self) -> bool {
        matches!(self, BinaryOp::Eq | BinaryOp::NotEq)
    }

    /// `||` and `&&`: bool operands, bool result.
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::Or | BinaryOp::And)
    }

    /// `<` `<=` `>=` `>`: int operands, bool result.
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::GtEq | BinaryOp::Gt
        )
    }

    /// The result type of the operator, independent of its operands.
    pub fn result_type(&self) -> DecafType {
        if self.is_logical() || self.is_equality() || self.is_relational() {
            DecafType::Bool
        } else {
            DecafType::Int
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Or => write!(f, "||"),
            BinaryOp::And => write!(f, "&&"),
            BinaryOp::Eq => write!(f, "=="),
            BinaryOp::NotEq => write!(f, "!="),
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::LtEq => write!(f, "<="),
            BinaryOp::GtEq => write!(f, ">="),
            BinaryOp::Gt => write!(f, ">"),
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Mod => write!(f, "%"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    /// The operand type the operator requires, which is also its result type.
    pub fn operand_type(&self) -> DecafType {
        match self {
            UnaryOp::Neg => DecafType::Int,
            UnaryOp::Not => DecafType::Bool,
        }
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}
