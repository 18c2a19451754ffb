//! Builders that combine expressions into new ones.
//!
//! The operators are implemented for both owned expressions, which are moved into the new tree,
//! and borrowed expressions, which are cloned into it. Either way, the result never shares a
//! subtree with another tree.

use std::ops::{Add, Div, Mul, Neg, Sub};
use super::{
    expr::Expr,
    op::{BinOpKind, UnaryOpKind},
};

macro_rules! impl_bin_op {
    ($trait:ident, $method:ident, $kind:ident) => {
        impl $trait for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary(BinOpKind::$kind, self, rhs)
            }
        }

        impl $trait for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary(BinOpKind::$kind, self.clone(), rhs.clone())
            }
        }
    };
}

impl_bin_op!(Add, add, Add);
impl_bin_op!(Sub, sub, Sub);
impl_bin_op!(Mul, mul, Mul);
impl_bin_op!(Div, div, Div);

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::unary(UnaryOpKind::Neg, self)
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::unary(UnaryOpKind::Neg, self.clone())
    }
}

impl Expr {
    /// Returns a copy of this expression raised to a copy of `exponent`.
    pub fn pow(&self, exponent: &Expr) -> Expr {
        Expr::binary(BinOpKind::Pow, self.clone(), exponent.clone())
    }

    /// Returns the square of a copy of this expression, as the `sqr` function.
    pub fn sqr(&self) -> Expr {
        Expr::unary(UnaryOpKind::Sqr, self.clone())
    }

    /// Returns the square root of a copy of this expression.
    pub fn sqrt(&self) -> Expr {
        Expr::unary(UnaryOpKind::Sqrt, self.clone())
    }

    /// Applies the function `op` to a copy of this expression.
    pub fn apply(&self, op: UnaryOpKind) -> Expr {
        Expr::unary(op, self.clone())
    }
}
