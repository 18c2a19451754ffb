//! Symbolic differentiation of expressions.

mod function;

use formula_parser::parser::ast::{BinOpKind, Expr, Param};
use log::debug;
use std::fmt;
use super::{simplify::simplify_fully, EXTRA_PASSES};

/// An error that occurs while differentiating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivativeError {
    /// The exponent of a power is not a number literal, such as in `x^y`, `2^x` or even `x^(1+1)`.
    NonConstantExponent,

    /// The expression contains the absolute value function, which has no derivative rule.
    NoAbsoluteValueDerivative,
}

impl fmt::Display for DerivativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonConstantExponent => write!(f, "cannot differentiate a power whose exponent is not a number"),
            Self::NoAbsoluteValueDerivative => write!(f, "cannot differentiate the absolute value function"),
        }
    }
}

impl std::error::Error for DerivativeError {}

/// `(f*g)' = f*g' + f'*g`
fn product_rule(f: &Expr, g: &Expr, with: Param) -> Result<Expr, DerivativeError> {
    Ok(f.clone() * raw_derivative(g, with)? + raw_derivative(f, with)? * g.clone())
}

/// `(f/g)' = (f'*g - f*g') / sqr(g)`
fn quotient_rule(f: &Expr, g: &Expr, with: Param) -> Result<Expr, DerivativeError> {
    let numerator = raw_derivative(f, with)? * g.clone() - f.clone() * raw_derivative(g, with)?;
    Ok(numerator / g.sqr())
}

/// `(f^n)' = n*f^(n-1)*f'`, where `n` is a number literal
fn power_rule(base: &Expr, exponent: &Expr, with: Param) -> Result<Expr, DerivativeError> {
    let n = exponent.as_number().ok_or(DerivativeError::NonConstantExponent)?;
    Ok(Expr::Number(n) * base.pow(&Expr::Number(n - 1.0)) * raw_derivative(base, with)?)
}

/// Computes the derivative of the given expression with respect to `with`, without simplifying it.
///
/// The result is built mechanically from the differentiation rules, so it is usually littered
/// with terms like `x*0` and `1*y`.
pub fn raw_derivative(f: &Expr, with: Param) -> Result<Expr, DerivativeError> {
    match f {
        Expr::Number(_) => Ok(Expr::Number(0.0)),
        Expr::Param(param) => Ok(Expr::Number(if *param == with { 1.0 } else { 0.0 })),
        Expr::Unary { op, operand } => function::function_derivative(*op, operand, with),
        Expr::Binary { op, lhs, rhs } => match op {
            BinOpKind::Add => Ok(raw_derivative(lhs, with)? + raw_derivative(rhs, with)?),
            BinOpKind::Sub => Ok(raw_derivative(lhs, with)? - raw_derivative(rhs, with)?),
            BinOpKind::Mul => product_rule(lhs, rhs, with),
            BinOpKind::Div => quotient_rule(lhs, rhs, with),
            BinOpKind::Pow => power_rule(lhs, rhs, with),
        },
    }
}

/// Computes the derivative of the given expression with respect to `with`, and simplifies it,
/// making [`EXTRA_PASSES`] extra passes after the simplifier reaches its fixed point.
///
/// Returns [`Err`] if the expression contains `abs`, or a power whose exponent is not a number
/// literal. No partial result is produced in that case.
pub fn derivative(f: &Expr, with: Param) -> Result<Expr, DerivativeError> {
    derivative_with(f, with, EXTRA_PASSES)
}

/// Computes the derivative of the given expression with respect to `with`, and simplifies it,
/// making `extra_passes` extra passes after the simplifier reaches its fixed point.
pub fn derivative_with(f: &Expr, with: Param, extra_passes: usize) -> Result<Expr, DerivativeError> {
    debug!("differentiating `{}` with respect to `{}`", f, with);
    let raw = raw_derivative(f, with).map_err(|err| {
        debug!("cannot differentiate `{}`: {}", f, err);
        err
    })?;
    Ok(simplify_fully(&raw, extra_passes))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use crate::numerical::{ctxt::Ctxt, eval::Eval};
    use formula_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use super::*;

    fn p(letter: char) -> Param {
        Param::from_letter(letter).unwrap()
    }

    fn derive(source: &str, with: char) -> Result<Expr, DerivativeError> {
        derivative(&parse(source).unwrap(), p(with))
    }

    #[test]
    fn square() {
        let df = derive("x^2", 'x').unwrap();
        assert_eq!(df, parse("x*2").unwrap());
        assert_eq!(df, parse("2*x").unwrap());
    }

    #[test]
    fn leaves() {
        assert_eq!(derive("3", 'x').unwrap(), Expr::Number(0.0));
        assert_eq!(derive("x", 'x').unwrap(), Expr::Number(1.0));
        assert_eq!(derive("y", 'x').unwrap(), Expr::Number(0.0));
        assert_eq!(derive("x*y", 'x').unwrap(), parse("y").unwrap());
    }

    #[test]
    fn raw_derivative_is_unsimplified() {
        let raw = raw_derivative(&parse("x+y").unwrap(), p('x')).unwrap();
        assert_eq!(raw, Expr::Number(1.0) + Expr::Number(0.0));
    }

    #[test]
    fn absolute_value() {
        assert_eq!(derive("abs(x)", 'x'), Err(DerivativeError::NoAbsoluteValueDerivative));
        assert_eq!(derive("sin(abs(x)) + 1", 'x'), Err(DerivativeError::NoAbsoluteValueDerivative));
    }

    #[test]
    fn non_constant_exponent() {
        assert_eq!(derive("x^y", 'x'), Err(DerivativeError::NonConstantExponent));
        assert_eq!(derive("2^x", 'x'), Err(DerivativeError::NonConstantExponent));
        assert_eq!(derive("x^(1+1)", 'x'), Err(DerivativeError::NonConstantExponent));
    }

    #[test]
    fn log_uses_base_ten() {
        let x = p('x');
        let df = derive("log(x)", 'x').unwrap();
        let ctxt = Ctxt::new().with_param(x, 2.0);
        assert_float_absolute_eq!(df.eval(&ctxt), std::f64::consts::LOG10_E / 2.0);
    }

    #[test]
    fn input_is_untouched() {
        let f = parse("sin(x)*x").unwrap();
        derivative(&f, p('x')).unwrap();
        assert_eq!(f.to_string(), "sin(x)*x");
    }

    #[test]
    fn matches_finite_differences() {
        let sources = [
            "sin(x)*cos(x)",
            "tan(x)",
            "exp(x^2)/x",
            "ln(x) + log(x)",
            "sqrt(x)",
            "sqr(x-1)",
            "arcsin(x/2)",
            "arccos(x/2)",
            "arctan(x)",
            "-x^3 + 2*x - 1/x",
            "(x+1)^4 * y",
            "sin(t^2) + x*t",
        ];
        let x = p('x');
        let h = 1e-5;
        let mut rng = StdRng::seed_from_u64(42);

        for source in sources {
            let f = parse(source).unwrap();
            let df = derivative(&f, x).unwrap();
            for _ in 0..10 {
                let x0: f64 = rng.gen_range(0.5..1.5);
                let ctxt = Ctxt::new()
                    .with_param(p('y'), rng.gen_range(-2.0..2.0))
                    .with_param(p('t'), rng.gen_range(-2.0..2.0));

                let above = f.eval(&ctxt.clone().with_param(x, x0 + h));
                let below = f.eval(&ctxt.clone().with_param(x, x0 - h));
                let expected = (above - below) / (2.0 * h);
                assert_float_absolute_eq!(df.eval(&ctxt.with_param(x, x0)), expected, 1e-4);
            }
        }
    }
}
