//! Implementation of the simplification rules.
//!
//! Each rule in this module takes the operands of the node to simplify, and returns `Some(expr)`
//! with the simplified expression if the rule applies, or `None` if the rule does not apply. Rules
//! that apply simplify what they produce with the same [`Pass`], so a single pass can collapse a
//! chain of identities such as `--(x*1)`.

use formula_parser::parser::ast::{BinOpKind, Expr, UnaryOpKind};
use std::borrow::Cow;
use super::{step::Step, Pass};

/// Returns true if the expression is a binary node of the given kind.
fn is_binary(expr: &Expr, kind: BinOpKind) -> bool {
    matches!(expr, Expr::Binary { op, .. } if *op == kind)
}

/// Returns the operand of the expression if it is a negation.
fn negated(expr: &Expr) -> Option<&Expr> {
    match expr {
        Expr::Unary { op: UnaryOpKind::Neg, operand } => Some(&**operand),
        _ => None,
    }
}

/// Rotates a chain of the same commutative operator, so that operands of nested nodes move up the
/// tree and meet other operands. Both rotations may apply to the same node.
///
/// `a+(b+c) = c+(a+b)`
/// `(a+b)+c = (c+a)+b`
///
/// Rotations do not mark the pass as changed.
pub fn rotate<'e>(expr: &'e Expr, pass: &mut Pass<'_>) -> Cow<'e, Expr> {
    let Expr::Binary { op, lhs, rhs } = expr else {
        return Cow::Borrowed(expr);
    };
    if !op.is_commutative() || !(is_binary(lhs, *op) || is_binary(rhs, *op)) {
        return Cow::Borrowed(expr);
    }

    let op = *op;
    let (lhs, rhs) = (lhs.clone(), rhs.clone());

    let (lhs, rhs) = match *rhs {
        Expr::Binary { op: inner, lhs: b, rhs: c } if inner == op => {
            pass.rearrange(Step::RotateRight);
            (c, Box::new(Expr::Binary { op, lhs, rhs: b }))
        },
        rhs => (lhs, Box::new(rhs)),
    };

    let (lhs, rhs) = match *lhs {
        Expr::Binary { op: inner, lhs: a, rhs: b } if inner == op => {
            pass.rearrange(Step::RotateLeft);
            (Box::new(Expr::Binary { op, lhs: rhs, rhs: a }), b)
        },
        lhs => (Box::new(lhs), rhs),
    };

    Cow::Owned(Expr::Binary { op, lhs, rhs })
}

/// `a/1 = a`
/// `0/a = 0`
/// `a/a = 1`
pub fn div(lhs: &Expr, rhs: &Expr, pass: &mut Pass<'_>) -> Option<Expr> {
    if rhs.is_number(1.0) {
        pass.apply(Step::DivByOne);
        Some(pass.optimize(lhs))
    } else if lhs.is_number(0.0) {
        pass.apply(Step::ZeroDividend);
        Some(pass.optimize(lhs))
    } else if lhs == rhs {
        pass.apply(Step::DivSelf);
        Some(Expr::Number(1.0))
    } else {
        None
    }
}

/// `a-0 = a`
/// `a-a = 0`
/// `a-(-b) = a+b`
pub fn sub(lhs: &Expr, rhs: &Expr, pass: &mut Pass<'_>) -> Option<Expr> {
    if rhs.is_number(0.0) {
        pass.apply(Step::SubZero);
        return Some(pass.optimize(lhs));
    }

    if lhs == rhs {
        pass.apply(Step::SubSelf);
        return Some(Expr::Number(0.0));
    }

    let b = negated(rhs)?;
    pass.apply(Step::SubNeg);
    let sum = pass.optimize(lhs) + pass.optimize(b);
    Some(pass.optimize(&sum))
}

/// `a*1 = a`, `a*0 = 0`
/// `1*a = a`, `0*a = 0`
/// `a*a = sqr(a)`
pub fn mul(lhs: &Expr, rhs: &Expr, pass: &mut Pass<'_>) -> Option<Expr> {
    for (factor, other) in [(rhs, lhs), (lhs, rhs)] {
        if factor.is_number(1.0) {
            pass.apply(Step::MulOne);
            return Some(pass.optimize(other));
        } else if factor.is_number(0.0) {
            pass.apply(Step::MulZero);
            return Some(pass.optimize(factor));
        }
    }

    if lhs == rhs {
        pass.apply(Step::MulSelf);
        return Some(Expr::unary(UnaryOpKind::Sqr, pass.optimize(rhs)));
    }

    None
}

/// `a+0 = a`
/// `0+a = a`
/// `a+a = a*2`
/// `a+(-b) = a-b`
/// `(-a)+b = b-a`
pub fn add(lhs: &Expr, rhs: &Expr, pass: &mut Pass<'_>) -> Option<Expr> {
    if rhs.is_number(0.0) {
        pass.apply(Step::AddZero);
        return Some(pass.optimize(lhs));
    }

    if lhs.is_number(0.0) {
        pass.apply(Step::AddZero);
        return Some(pass.optimize(rhs));
    }

    if lhs == rhs {
        pass.apply(Step::AddSelf);
        return Some(pass.optimize(rhs) * Expr::Number(2.0));
    }

    if let Some(b) = negated(rhs) {
        pass.apply(Step::AddNeg);
        let difference = pass.optimize(lhs) - pass.optimize(b);
        return Some(pass.optimize(&difference));
    }

    let a = negated(lhs)?;
    pass.apply(Step::NegAdd);
    let difference = pass.optimize(rhs) - pass.optimize(a);
    Some(pass.optimize(&difference))
}

/// `a^0 = 1`
/// `a^1 = a`
pub fn pow(lhs: &Expr, rhs: &Expr, pass: &mut Pass<'_>) -> Option<Expr> {
    if rhs.is_number(0.0) {
        pass.apply(Step::PowZero);
        Some(Expr::Number(1.0))
    } else if rhs.is_number(1.0) {
        pass.apply(Step::PowOne);
        Some(pass.optimize(lhs))
    } else {
        None
    }
}

/// `-(-a) = a`
pub fn neg(operand: &Expr, pass: &mut Pass<'_>) -> Option<Expr> {
    let a = negated(operand)?;
    pass.apply(Step::DoubleNeg);
    Some(pass.optimize(a))
}

/// Applies the rules for the kind of the expression.
pub fn all(expr: &Expr, pass: &mut Pass<'_>) -> Option<Expr> {
    match expr {
        Expr::Binary { op, lhs, rhs } => match op {
            BinOpKind::Add => add(lhs, rhs, pass),
            BinOpKind::Sub => sub(lhs, rhs, pass),
            BinOpKind::Mul => mul(lhs, rhs, pass),
            BinOpKind::Div => div(lhs, rhs, pass),
            BinOpKind::Pow => pow(lhs, rhs, pass),
        },
        Expr::Unary { op: UnaryOpKind::Neg, operand } => neg(operand, pass),
        Expr::Number(_) | Expr::Param(_) | Expr::Unary { .. } => None,
    }
}
