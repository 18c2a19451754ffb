//! The classified symbols consumed by the operator-precedence parser.

use std::ops::Range;
use super::ast::{BinOpKind, Param, UnaryOpKind};

/// The precedence of the start-of-input sentinel at the bottom of the parser stack.
pub const START_PRECEDENCE: u8 = 5;

/// The kind of a symbol produced by the [`Lexer`](super::lexer::Lexer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SymbolKind {
    /// A number literal.
    Number(f64),

    /// A single-letter parameter.
    Param(Param),

    /// A function keyword, such as `sin`. Never [`UnaryOpKind::Neg`].
    Function(UnaryOpKind),

    /// A minus sign in prefix position.
    Neg,

    /// A binary operator.
    Binary(BinOpKind),

    OpenParen,

    CloseParen,

    /// The end of the input.
    End,
}

impl SymbolKind {
    /// Returns the precedence of the symbol when it is on top of the parser stack.
    pub fn stack_precedence(self) -> u8 {
        match self {
            Self::Function(_) => 100,
            Self::Number(_) | Self::Param(_) => 120,
            Self::Binary(BinOpKind::Add | BinOpKind::Sub) => 20,
            Self::Binary(BinOpKind::Mul | BinOpKind::Div) => 40,
            Self::Binary(BinOpKind::Pow) => 60,
            Self::Neg => 65,
            Self::OpenParen => 5,
            Self::CloseParen => 120,
            Self::End => START_PRECEDENCE,
        }
    }

    /// Returns the precedence of the symbol when it is the incoming lookahead.
    pub fn input_precedence(self) -> u8 {
        match self {
            Self::Function(_) => 90,
            Self::Number(_) | Self::Param(_) => 110,
            Self::Binary(BinOpKind::Add | BinOpKind::Sub) => 10,
            Self::Binary(BinOpKind::Mul | BinOpKind::Div) => 30,
            Self::Binary(BinOpKind::Pow) => 50,
            Self::Neg => 70,
            Self::OpenParen => 110,
            Self::CloseParen => 0,
            Self::End => 0,
        }
    }

    /// Returns true if a minus sign following this symbol is a negation rather than a subtraction.
    pub fn expects_operand(self) -> bool {
        matches!(self, Self::Binary(_) | Self::Neg | Self::OpenParen)
    }
}

/// A classified symbol, along with the region of the source code it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// The kind of symbol.
    pub kind: SymbolKind,

    /// The region of the source code that this symbol originated from.
    pub span: Range<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_binds_tighter_than_power() {
        // `-x^2` is `(-x)^2`, but `x^-2` is `x^(-2)`
        assert!(SymbolKind::Neg.stack_precedence() > SymbolKind::Binary(BinOpKind::Pow).input_precedence());
        assert!(SymbolKind::Binary(BinOpKind::Pow).stack_precedence() < SymbolKind::Neg.input_precedence());
    }

    #[test]
    fn binary_operators_are_left_associative() {
        for op in [BinOpKind::Add, BinOpKind::Sub, BinOpKind::Mul, BinOpKind::Div, BinOpKind::Pow] {
            let kind = SymbolKind::Binary(op);
            assert!(kind.stack_precedence() > kind.input_precedence());
        }
    }
}
