//! Derivatives of the unary operators, combined with the derivative of their operand by the chain
//! rule.

use formula_parser::parser::ast::{BinOpKind, Expr, Param, UnaryOpKind};
use std::f64::consts::LOG10_E;
use super::{raw_derivative, DerivativeError};

/// Builds `(1+u²)^exponent` or `(1-u²)^exponent`, depending on `inner`, and negates it if `negate`
/// is set. The derivatives of the inverse trigonometric functions all have this form.
fn one_plus_minus_square(negate: bool, inner: BinOpKind, exponent: f64, u: &Expr) -> Expr {
    let base = Expr::binary(inner, Expr::Number(1.0), u.sqr());
    let power = Expr::binary(BinOpKind::Pow, base, Expr::Number(exponent));
    if negate {
        -power
    } else {
        power
    }
}

/// Computes the derivative of `op(u)` with respect to `with`.
pub(super) fn function_derivative(
    op: UnaryOpKind,
    u: &Expr,
    with: Param,
) -> Result<Expr, DerivativeError> {
    let du = || raw_derivative(u, with);

    Ok(match op {
        UnaryOpKind::Abs => return Err(DerivativeError::NoAbsoluteValueDerivative),
        UnaryOpKind::ArcSin => one_plus_minus_square(false, BinOpKind::Sub, -0.5, u) * du()?,
        UnaryOpKind::ArcCos => one_plus_minus_square(true, BinOpKind::Sub, -0.5, u) * du()?,
        UnaryOpKind::ArcTan => one_plus_minus_square(false, BinOpKind::Add, -1.0, u) * du()?,
        UnaryOpKind::Cos => -u.apply(UnaryOpKind::Sin) * du()?,
        UnaryOpKind::Exp => u.apply(UnaryOpKind::Exp) * du()?,
        UnaryOpKind::Ln => du()? / u.clone(),
        UnaryOpKind::Log => du()? / u.clone() * Expr::Number(LOG10_E),
        UnaryOpKind::Sin => u.apply(UnaryOpKind::Cos) * du()?,
        UnaryOpKind::Sqr => Expr::Number(2.0) * (u.clone() * du()?),
        UnaryOpKind::Sqrt => Expr::Number(0.5) * u.pow(&Expr::Number(-0.5)) * du()?,
        UnaryOpKind::Tan => du()? / u.apply(UnaryOpKind::Cos).sqr(),
        UnaryOpKind::Neg => -du()?,
    })
}
