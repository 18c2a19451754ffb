//! The expression tree of a formula.
//!
//! An [`Expr`] owns all of its children: every subtree belongs to exactly one parent, and every
//! operation that combines trees (the builder operators in this module, reparametrization, and
//! the symbolic operations of downstream crates) clones the trees it is given instead of sharing
//! them. Trees are never modified in place; each operation returns a fresh tree.
//!
//! # Structural equality
//!
//! Two expressions are considered equal by [`PartialEq`] if they have the same shape, where the
//! operands of the commutative operators `+` and `*` may appear in either order. For example,
//! `x*(y+1)` is equal to `(1+y)*x`, but `x-y` is not equal to `y-x`, and `x*2` is not equal to
//! `x+x` even though both always evaluate to the same value. Numbers are compared with `==`,
//! except that two NaN literals are equal to each other, so that every expression is equal to
//! itself.

use super::{
    op::{BinOpKind, Precedence, UnaryOpKind},
    param::{Param, ParamQuery},
};

/// A node of an expression tree.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A number literal.
    Number(f64),

    /// A parameter, whose value is supplied at evaluation time.
    Param(Param),

    /// A function or negation applied to one operand.
    Unary {
        op: UnaryOpKind,
        operand: Box<Expr>,
    },

    /// A binary operation applied to two operands.
    Binary {
        op: BinOpKind,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Creates a number literal.
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a parameter.
    pub fn param(param: Param) -> Self {
        Self::Param(param)
    }

    /// Creates a unary node that owns the given operand.
    pub fn unary(op: UnaryOpKind, operand: Expr) -> Self {
        Self::Unary { op, operand: Box::new(operand) }
    }

    /// Creates a binary node that owns the given operands.
    pub fn binary(op: BinOpKind, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    /// Returns the value of the expression if it is a number literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if the expression is the number literal `value`.
    pub fn is_number(&self, value: f64) -> bool {
        self.as_number() == Some(value)
    }

    /// Returns true if the expression contains a parameter selected by the query. Pass
    /// [`ParamQuery::All`] to check for any parameter at all.
    pub fn contains_param(&self, query: impl Into<ParamQuery>) -> bool {
        fn inner(expr: &Expr, query: ParamQuery) -> bool {
            match expr {
                Expr::Number(_) => false,
                Expr::Param(param) => query.matches(*param),
                Expr::Unary { operand, .. } => inner(operand, query),
                Expr::Binary { lhs, rhs, .. } => inner(lhs, query) || inner(rhs, query),
            }
        }

        inner(self, query.into())
    }

    /// Returns a copy of the expression where every occurrence of `param` is replaced by a copy of
    /// `substitute`.
    pub fn reparametrize(&self, param: Param, substitute: &Expr) -> Expr {
        match self {
            Self::Param(p) if *p == param => substitute.clone(),
            Self::Number(_) | Self::Param(_) => self.clone(),
            Self::Unary { op, operand } => Self::unary(*op, operand.reparametrize(param, substitute)),
            Self::Binary { op, lhs, rhs } => Self::binary(
                *op,
                lhs.reparametrize(param, substitute),
                rhs.reparametrize(param, substitute),
            ),
        }
    }

    /// Returns the precedence of the expression when it is printed.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Number(_) | Self::Param(_) | Self::Unary { .. } => Precedence::Atom,
            Self::Binary { op, .. } => op.precedence(),
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Param(a), Self::Param(b)) => a == b,
            (
                Self::Unary { op: op_a, operand: a },
                Self::Unary { op: op_b, operand: b },
            ) => op_a == op_b && a == b,
            (
                Self::Binary { op: op_a, lhs: lhs_a, rhs: rhs_a },
                Self::Binary { op: op_b, lhs: lhs_b, rhs: rhs_b },
            ) => {
                op_a == op_b
                    && ((lhs_a == lhs_b && rhs_a == rhs_b)
                        || (op_a.is_commutative() && lhs_a == rhs_b && rhs_a == lhs_b))
            },
            _ => false,
        }
    }
}
