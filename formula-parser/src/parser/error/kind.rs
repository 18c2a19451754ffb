use ariadne::Fmt;
use formula_attrs::ErrorKind;
use formula_error::{ErrorKind, EXPR};

/// A sequence of characters that is not a number, a parameter, an operator, or a known function.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("undefined token `{}`", name),
    labels = ["I don't know what this means"],
    help = match suggestion {
        Some(suggestion) => format!("did you mean the function {}?", suggestion.fg(EXPR)),
        None => format!(
            "parameters are single letters, and functions are written as {}",
            "name(expr)".fg(EXPR),
        ),
    },
)]
pub struct UndefinedToken {
    /// The text of the token, as written.
    pub name: String,

    /// The name of a function that is spelled similarly, if any.
    pub suggestion: Option<&'static str>,
}

/// Where a parenthesis mismatch was detected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParenIssue {
    /// An opening parenthesis is never closed.
    Unclosed,

    /// A closing parenthesis has no opening partner.
    Unopened,

    /// A pair of parentheses does not surround exactly one expression.
    Contents,
}

/// The parentheses in the formula do not pair up.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unbalanced parentheses",
    labels = [match issue {
        ParenIssue::Unclosed => "this parenthesis is never closed",
        ParenIssue::Unopened => "this parenthesis was never opened",
        ParenIssue::Contents => "these parentheses must surround exactly one expression",
    }],
    help = match issue {
        ParenIssue::Unclosed => format!("add a closing parenthesis {} here", ")".fg(EXPR)),
        ParenIssue::Unopened => format!("add an opening parenthesis {} before this", "(".fg(EXPR)),
        ParenIssue::Contents => format!("write an {} inside the parentheses", "expression".fg(EXPR)),
    },
)]
pub struct ParenMismatch {
    /// What is wrong with the parenthesis.
    pub issue: ParenIssue,
}

/// The formula does not reduce to a single expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid syntax",
    labels = ["I could not make sense of this part of the formula"],
    help = format!("operands must be separated by an {}, such as `*`", "operator".fg(EXPR)),
)]
pub struct Syntax;

/// The parser stack filled up before the formula could be reduced.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "formula is nested too deeply",
    labels = ["the parser ran out of room here"],
    help = format!("the parser can hold at most {} pending symbols", limit.to_string().fg(EXPR)),
)]
pub struct StackOverflow {
    /// The capacity of the parser stack.
    pub limit: usize,
}

/// Something other than a negation or a function was applied to a single operand.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a negation or function call",
    labels = ["this cannot be applied to a single operand"],
    help = format!("functions take their argument in parentheses, like {}", "sin(x)".fg(EXPR)),
)]
pub struct OneOperandExpected;

/// Two operands are not joined by a binary operator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a binary operator between two operands",
    labels = ["these operands are not combined correctly"],
    help = format!("join operands with one of {}", "+ - * / ^".fg(EXPR)),
)]
pub struct TwoOperandsExpected;

/// An operator or function was found where a number or parameter was expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a number or parameter",
    labels = [format!("add a number or parameter {}", "here".fg(EXPR))],
)]
pub struct ParameterExpected;
