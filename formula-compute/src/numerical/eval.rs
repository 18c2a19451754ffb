use formula_parser::parser::ast::{BinOpKind, Expr, UnaryOpKind};
use super::ctxt::Ctxt;

/// Any type that can be evaluated to produce a number.
///
/// Evaluation never fails. Domain problems such as `ln(-1)` or `1/0` produce NaN or an infinity,
/// which then propagate through the rest of the computation like any other value.
pub trait Eval {
    /// Evaluate the expression to produce a number, using the given context for the values of
    /// parameters.
    fn eval(&self, ctxt: &Ctxt) -> f64;

    /// Evaluate the expression to produce a number, with every parameter set to zero.
    fn eval_default(&self) -> f64 {
        self.eval(&Ctxt::default())
    }
}

/// Applies a unary operator to a number.
pub fn apply_unary(op: UnaryOpKind, value: f64) -> f64 {
    match op {
        UnaryOpKind::Abs => value.abs(),
        UnaryOpKind::ArcSin => value.asin(),
        UnaryOpKind::ArcCos => value.acos(),
        UnaryOpKind::ArcTan => value.atan(),
        UnaryOpKind::Cos => value.cos(),
        UnaryOpKind::Exp => value.exp(),
        UnaryOpKind::Ln => value.ln(),
        UnaryOpKind::Log => value.log10(),
        UnaryOpKind::Sin => value.sin(),
        UnaryOpKind::Sqr => value * value,
        UnaryOpKind::Sqrt => value.sqrt(),
        UnaryOpKind::Tan => value.tan(),
        UnaryOpKind::Neg => -value,
    }
}

/// Applies a binary operator to two numbers.
pub fn apply_binary(op: BinOpKind, lhs: f64, rhs: f64) -> f64 {
    match op {
        BinOpKind::Add => lhs + rhs,
        BinOpKind::Sub => lhs - rhs,
        BinOpKind::Mul => lhs * rhs,
        BinOpKind::Div => lhs / rhs,
        BinOpKind::Pow => lhs.powf(rhs),
    }
}

impl Eval for Expr {
    fn eval(&self, ctxt: &Ctxt) -> f64 {
        match self {
            Expr::Number(value) => *value,
            Expr::Param(param) => ctxt.get_param(*param),
            Expr::Unary { op, operand } => apply_unary(*op, operand.eval(ctxt)),
            Expr::Binary { op, lhs, rhs } => apply_binary(*op, lhs.eval(ctxt), rhs.eval(ctxt)),
        }
    }
}

/// Eval tests depend on the parser, so ensure that parser tests pass before running these.
#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use formula_parser::parser::{ast::Param, parse};
    use pretty_assertions::assert_eq;
    use super::*;

    fn eval_with(source: &str, ctxt: &Ctxt) -> f64 {
        parse(source).unwrap().eval(ctxt)
    }

    #[test]
    fn arithmetic() {
        let ctxt = Ctxt::new();
        assert_eq!(eval_with("1 + 2 * 3", &ctxt), 7.0);
        assert_eq!(eval_with("(1 + 2) * 3", &ctxt), 9.0);
        assert_eq!(eval_with("8 / 4 / 2", &ctxt), 1.0);
        assert_eq!(eval_with("2 ^ 3 ^ 2", &ctxt), 64.0);
        assert_eq!(eval_with("-2 ^ 2", &ctxt), 4.0);
        assert_eq!(eval_with("2 ^ -1", &ctxt), 0.5);
        assert_eq!(eval_with("3 - -2", &ctxt), 5.0);
    }

    #[test]
    fn functions() {
        let ctxt = Ctxt::new();
        assert_eq!(eval_with("abs(-4)", &ctxt), 4.0);
        assert_eq!(eval_with("sqr(3)", &ctxt), 9.0);
        assert_eq!(eval_with("sqrt(16)", &ctxt), 4.0);
        assert_eq!(eval_with("ln(1)", &ctxt), 0.0);
        assert_eq!(eval_with("exp(0)", &ctxt), 1.0);
        assert_float_absolute_eq!(eval_with("log(1000)", &ctxt), 3.0);
        assert_float_absolute_eq!(eval_with("sin(2)^2 + cos(2)^2", &ctxt), 1.0);
        assert_float_absolute_eq!(eval_with("4 * arctan(1)", &ctxt), std::f64::consts::PI);
        assert_float_absolute_eq!(eval_with("arcsin(1) + arccos(1)", &ctxt), std::f64::consts::FRAC_PI_2);
        assert_float_absolute_eq!(eval_with("tan(1)", &ctxt), 1f64.tan());
    }

    #[test]
    fn parameters() {
        let x = Param::from_letter('x').unwrap();
        let t = Param::from_letter('t').unwrap();
        let ctxt = Ctxt::new().with_param(x, 3.0).with_param(t, 0.5);

        assert_eq!(eval_with("x^2 + 2*x", &ctxt), 15.0);
        assert_eq!(eval_with("x * t", &ctxt), 1.5);

        // unset parameters are zero
        assert_eq!(eval_with("y + 1", &ctxt), 1.0);
    }

    #[test]
    fn domain_errors_propagate() {
        let ctxt = Ctxt::new();
        assert!(eval_with("ln(-1)", &ctxt).is_nan());
        assert!(eval_with("sqrt(-1) + 5", &ctxt).is_nan());
        assert_eq!(eval_with("1 / 0", &ctxt), f64::INFINITY);
        assert!(eval_with("0 / 0", &ctxt).is_nan());
        assert_eq!(eval_with("-1 / 0", &ctxt), f64::NEG_INFINITY);
    }

    #[test]
    fn default_context() {
        assert_eq!(parse("x + 2").unwrap().eval_default(), 2.0);
    }
}
