use std::fmt::{Display, Formatter, Result};
use super::{
    expr::Expr,
    op::{Precedence, UnaryOpKind},
};

/// Returns the precedence one level tighter than the given one.
fn tighter(precedence: Precedence) -> Precedence {
    match precedence {
        Precedence::Any => Precedence::Term,
        Precedence::Term => Precedence::Factor,
        Precedence::Factor => Precedence::Pow,
        Precedence::Pow | Precedence::Atom => Precedence::Atom,
    }
}

/// Formats the expression, wrapping it in parentheses if it binds looser than `outer`.
fn fmt_with(expr: &Expr, f: &mut Formatter, outer: Precedence) -> Result {
    let paren = expr.precedence() < outer;
    if paren {
        write!(f, "(")?;
    }

    match expr {
        // the formula grammar has no signed or non-finite literals
        Expr::Number(value) if value.is_nan() => write!(f, "(0/0)")?,
        Expr::Number(value) if value.is_infinite() && *value > 0.0 => write!(f, "(1/0)")?,
        Expr::Number(value) if value.is_infinite() => write!(f, "(-(1/0))")?,
        Expr::Number(value) if value.is_sign_negative() => write!(f, "(-{})", -value)?,
        Expr::Number(value) => write!(f, "{}", value)?,
        Expr::Param(param) => write!(f, "{}", param)?,
        Expr::Unary { op: UnaryOpKind::Neg, operand } => {
            write!(f, "(-")?;
            fmt_with(operand, f, Precedence::Any)?;
            write!(f, ")")?;
        },
        Expr::Unary { op, operand } => {
            write!(f, "{}(", op.name())?;
            fmt_with(operand, f, Precedence::Any)?;
            write!(f, ")")?;
        },
        Expr::Binary { op, lhs, rhs } => {
            // all binary operators are left-associative, so only the right operand needs
            // parentheses at the same precedence
            let precedence = op.precedence();
            fmt_with(lhs, f, precedence)?;
            write!(f, "{}", op.symbol())?;
            fmt_with(rhs, f, tighter(precedence))?;
        },
    }

    if paren {
        write!(f, ")")?;
    }
    Ok(())
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        fmt_with(self, f, Precedence::Any)
    }
}
