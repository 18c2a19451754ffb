pub mod ast;
pub mod error;
pub mod lexer;
pub mod symbol;

use ast::Expr;
use error::{kind::{self, ParenIssue}, Error};
use lexer::Lexer;
use log::trace;
use std::ops::Range;
use symbol::{Symbol, SymbolKind, START_PRECEDENCE};

/// The default capacity of the parser stack, including the start-of-input sentinel. Formulas
/// that need more pending symbols than this at once fail with a
/// [`StackOverflow`](kind::StackOverflow) error.
pub const MAX_STACK_DEPTH: usize = 100;

/// An entry of the parser stack.
#[derive(Debug, Clone)]
enum Entry {
    /// The start-of-input sentinel, always at the bottom of the stack.
    Start,

    /// A symbol that has not been reduced into a subexpression yet.
    Active(SymbolKind),

    /// A fully reduced subexpression.
    Reduced(Expr),
}

/// An entry of the parser stack, along with the region of the source code it covers.
#[derive(Debug, Clone)]
struct Slot {
    entry: Entry,
    span: Range<usize>,
}

impl Slot {
    /// Returns true if the entry takes part in precedence comparisons.
    fn is_active(&self) -> bool {
        !matches!(self.entry, Entry::Reduced(_))
    }

    /// Returns the precedence of the entry on the stack. Reduced entries never take part in
    /// precedence comparisons.
    fn precedence(&self) -> u8 {
        match self.entry {
            Entry::Start => START_PRECEDENCE,
            Entry::Active(kind) => kind.stack_precedence(),
            Entry::Reduced(_) => 0,
        }
    }
}

/// An operator-precedence parser for formulas.
///
/// The parser shifts symbols onto an explicit stack until the symbol on top of the stack has a
/// higher precedence than the incoming one, at which point the topmost _handle_ is reduced into a
/// subexpression. The handle is the run of entries above the nearest active (unreduced) entry
/// below the topmost active one. Depending on its length, a handle is reduced as:
///
/// - a number or parameter (1 entry),
/// - a negation of a subexpression (2 entries),
/// - a binary operation between two subexpressions (3 entries).
///
/// A closing parenthesis matched with its opening partner folds the parenthesized subexpression
/// into the function keyword in front of it, if there is one, or otherwise replaces the
/// parentheses with the subexpression.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The source of the symbols to parse.
    lexer: Lexer<'source>,

    /// The parser stack.
    stack: Vec<Slot>,

    /// The capacity of the parser stack.
    stack_limit: usize,
}

impl<'source> Parser<'source> {
    /// Creates a new parser for the given formula.
    pub fn new(source: &'source str) -> Self {
        Self {
            lexer: Lexer::new(source),
            stack: vec![Slot { entry: Entry::Start, span: 0..0 }],
            stack_limit: MAX_STACK_DEPTH,
        }
    }

    /// Sets the capacity of the parser stack.
    pub fn with_stack_limit(mut self, limit: usize) -> Self {
        self.stack_limit = limit;
        self
    }

    /// Parses the formula into an expression tree.
    pub fn parse(mut self) -> Result<Expr, Error> {
        loop {
            let incoming = self.lexer.next_symbol()?;
            let top = self.top_active();
            let top_slot = &self.stack[top];

            if top_slot.precedence() <= incoming.kind.input_precedence() {
                self.shift(incoming)?;
                continue;
            }

            let top_is_start = matches!(top_slot.entry, Entry::Start);
            let top_is_open = matches!(top_slot.entry, Entry::Active(SymbolKind::OpenParen));
            match incoming.kind {
                SymbolKind::CloseParen if top_is_open => {
                    self.close_paren(top, &incoming)?;
                    continue;
                },
                SymbolKind::CloseParen if top_is_start => {
                    return Err(Error::new(vec![incoming.span], kind::ParenMismatch {
                        issue: ParenIssue::Unopened,
                    }));
                },
                SymbolKind::End if top_is_start => return self.finish(&incoming),
                _ => {},
            }

            self.reduce(top, &incoming)?;

            // reducing does not consume the incoming symbol
            self.lexer.unget(incoming);
        }
    }

    /// Returns the index of the topmost active entry of the stack.
    fn top_active(&self) -> usize {
        // the start sentinel is never reduced
        self.stack.iter().rposition(Slot::is_active).unwrap_or(0)
    }

    /// Removes the last `N` entries of the stack.
    fn pop_handle<const N: usize>(&mut self) -> Option<[Slot; N]> {
        let at = self.stack.len().checked_sub(N)?;
        self.stack.split_off(at).try_into().ok()
    }

    /// Pushes an incoming symbol onto the stack.
    fn shift(&mut self, symbol: Symbol) -> Result<(), Error> {
        trace!("shift {:?} at {:?}", symbol.kind, symbol.span);
        self.stack.push(Slot {
            entry: Entry::Active(symbol.kind),
            span: symbol.span.clone(),
        });

        if self.stack.len() >= self.stack_limit {
            return Err(Error::new(vec![symbol.span], kind::StackOverflow {
                limit: self.stack_limit,
            }));
        }
        Ok(())
    }

    /// Reduces the handle above the nearest active entry below `top`.
    fn reduce(&mut self, top: usize, incoming: &Symbol) -> Result<(), Error> {
        let Some(lower) = self.stack[..top].iter().rposition(Slot::is_active) else {
            return Err(Error::new(vec![incoming.span.clone()], kind::Syntax));
        };

        let handle = self.stack.len() - lower - 1;
        let handle_span = self.stack[lower + 1].span.start..self.stack[self.stack.len() - 1].span.end;
        trace!("reduce handle of {} entries at {:?}", handle, handle_span);

        match handle {
            1 => self.reduce_leaf(handle_span),
            2 => self.reduce_unary(handle_span),
            3 => self.reduce_binary(handle_span),
            _ => Err(Error::new(vec![handle_span], kind::Syntax)),
        }
    }

    /// Reduces a number or parameter.
    fn reduce_leaf(&mut self, span: Range<usize>) -> Result<(), Error> {
        let expr = match self.pop_handle::<1>() {
            Some([Slot { entry: Entry::Active(SymbolKind::Number(value)), .. }]) => Expr::Number(value),
            Some([Slot { entry: Entry::Active(SymbolKind::Param(param)), .. }]) => Expr::Param(param),
            _ => return Err(Error::new(vec![span], kind::ParameterExpected)),
        };

        self.stack.push(Slot { entry: Entry::Reduced(expr), span });
        Ok(())
    }

    /// Reduces a negation.
    fn reduce_unary(&mut self, span: Range<usize>) -> Result<(), Error> {
        let Some([op, operand]) = self.pop_handle::<2>() else {
            return Err(Error::new(vec![span], kind::Syntax));
        };

        match (op.entry, operand.entry) {
            (Entry::Active(SymbolKind::Neg), Entry::Reduced(operand)) => {
                self.stack.push(Slot { entry: Entry::Reduced(-operand), span });
                Ok(())
            },
            (Entry::Active(SymbolKind::OpenParen), _) => Err(Error::new(vec![op.span], kind::ParenMismatch {
                issue: ParenIssue::Unclosed,
            })),
            _ => Err(Error::new(vec![span], kind::OneOperandExpected)),
        }
    }

    /// Reduces a binary operation.
    fn reduce_binary(&mut self, span: Range<usize>) -> Result<(), Error> {
        let Some([lhs, op, rhs]) = self.pop_handle::<3>() else {
            return Err(Error::new(vec![span], kind::Syntax));
        };

        match (lhs.entry, op.entry, rhs.entry) {
            (Entry::Reduced(lhs), Entry::Active(SymbolKind::Binary(op)), Entry::Reduced(rhs)) => {
                self.stack.push(Slot { entry: Entry::Reduced(Expr::binary(op, lhs, rhs)), span });
                Ok(())
            },
            _ => Err(Error::new(vec![span], kind::TwoOperandsExpected)),
        }
    }

    /// Matches a closing parenthesis with the opening parenthesis at index `open`.
    fn close_paren(&mut self, open: usize, close: &Symbol) -> Result<(), Error> {
        let span = self.stack[open].span.start..close.span.end;
        let contents = || Error::new(vec![span.clone()], kind::ParenMismatch {
            issue: ParenIssue::Contents,
        });

        if self.stack.len() - open != 2 {
            return Err(contents());
        }
        let Some([_, Slot { entry: Entry::Reduced(inner), .. }]) = self.pop_handle::<2>() else {
            return Err(contents());
        };

        let function = match self.stack.last() {
            Some(Slot { entry: Entry::Active(SymbolKind::Function(op)), .. }) => Some(*op),
            _ => None,
        };
        match function {
            Some(op) => {
                trace!("fold argument into {}", op.name());
                let start = self.stack.pop().map_or(span.start, |slot| slot.span.start);
                self.stack.push(Slot {
                    entry: Entry::Reduced(Expr::unary(op, inner)),
                    span: start..span.end,
                });
            },
            None => self.stack.push(Slot { entry: Entry::Reduced(inner), span }),
        }
        Ok(())
    }

    /// Returns the final expression once the end of the input is reached with only the start
    /// sentinel left active.
    fn finish(&mut self, end: &Symbol) -> Result<Expr, Error> {
        if self.stack.len() != 2 {
            let span = match self.stack.get(2) {
                Some(extra) => extra.span.start..self.stack[self.stack.len() - 1].span.end,
                None => end.span.clone(),
            };
            return Err(Error::new(vec![span], kind::Syntax));
        }

        match self.stack.pop() {
            Some(Slot { entry: Entry::Reduced(expr), .. }) => Ok(expr),
            _ => Err(Error::new(vec![end.span.clone()], kind::Syntax)),
        }
    }
}

/// Parses the formula into an expression tree, using the default stack capacity.
pub fn parse(source: &str) -> Result<Expr, Error> {
    Parser::new(source).parse()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use ast::{Param, UnaryOpKind};

    fn p(letter: char) -> Expr {
        Expr::param(Param::from_letter(letter).unwrap())
    }

    fn n(value: f64) -> Expr {
        Expr::number(value)
    }

    /// Parses the source, expecting an error of kind `K` that points at `span`.
    fn parse_err<K: formula_error::ErrorKind + 'static>(source: &str, span: Range<usize>) {
        let err = parse(source).unwrap_err();
        assert!(err.is::<K>(), "unexpected error for {:?}: {:?}", source, err);
        assert_eq!(err.spans, vec![span]);
    }

    #[test]
    fn literal_and_param() {
        assert_eq!(parse("2.5").unwrap(), n(2.5));
        assert_eq!(parse("  x ").unwrap(), p('x'));
    }

    #[test]
    fn factor_binds_tighter_than_term() {
        assert_eq!(parse("1+2*3").unwrap(), n(1.0) + n(2.0) * n(3.0));
        assert_eq!(parse("1*2+3").unwrap(), n(1.0) * n(2.0) + n(3.0));
        assert_eq!(parse("a-b/c").unwrap(), p('a') - p('b') / p('c'));
    }

    #[test]
    fn left_associative() {
        assert_eq!(parse("a-b-c").unwrap(), (p('a') - p('b')) - p('c'));
        assert_eq!(parse("a/b/c").unwrap(), (p('a') / p('b')) / p('c'));
        assert_eq!(parse("2^3^2").unwrap(), n(2.0).pow(&n(3.0)).pow(&n(2.0)));
    }

    #[test]
    fn negation() {
        assert_eq!(parse("-x^2").unwrap(), (-p('x')).pow(&n(2.0)));
        assert_eq!(parse("x^-2").unwrap(), p('x').pow(&-n(2.0)));
        assert_eq!(parse("--x").unwrap(), -(-p('x')));
        assert_eq!(parse("a*-b").unwrap(), p('a') * -p('b'));
        assert_eq!(parse("-a*b").unwrap(), -p('a') * p('b'));
    }

    #[test]
    fn grouping() {
        assert_eq!(parse("(a+b)*c").unwrap(), (p('a') + p('b')) * p('c'));
        assert_eq!(parse("((a))").unwrap(), p('a'));
        assert_eq!(parse("a-(b-c)").unwrap(), p('a') - (p('b') - p('c')));
    }

    #[test]
    fn functions() {
        assert_eq!(parse("sin(t^2)").unwrap(), p('t').pow(&n(2.0)).apply(UnaryOpKind::Sin));
        assert_eq!(parse("sin(x)^2").unwrap(), p('x').apply(UnaryOpKind::Sin).pow(&n(2.0)));
        assert_eq!(parse("-cos(x)").unwrap(), -p('x').apply(UnaryOpKind::Cos));
        assert_eq!(parse("sin((x))").unwrap(), p('x').apply(UnaryOpKind::Sin));
        assert_eq!(
            parse("ARCSIN(x) + ArcCos(y) * arctan(z)").unwrap(),
            p('x').apply(UnaryOpKind::ArcSin)
                + p('y').apply(UnaryOpKind::ArcCos) * p('z').apply(UnaryOpKind::ArcTan),
        );
        assert_eq!(parse("arc  TAN(x)").unwrap(), parse("arctan(x)").unwrap());
        assert_eq!(
            parse("sqrt(sqr(x)) - ln(abs(y)) / log(exp(z))").unwrap(),
            p('x').sqr().sqrt()
                - p('y').apply(UnaryOpKind::Abs).apply(UnaryOpKind::Ln)
                    / p('z').apply(UnaryOpKind::Exp).apply(UnaryOpKind::Log),
        );
        assert_eq!(parse("tan(2*x)").unwrap(), (n(2.0) * p('x')).apply(UnaryOpKind::Tan));
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(parse("SIN(T^2)").unwrap(), parse("sin(t^2)").unwrap());
    }

    #[test]
    fn unclosed_paren() {
        parse_err::<kind::ParenMismatch>("1+(2", 2..3);
    }

    #[test]
    fn unopened_paren() {
        parse_err::<kind::ParenMismatch>("1)", 1..2);
    }

    #[test]
    fn empty_parens() {
        parse_err::<kind::ParenMismatch>("()", 0..2);
        parse_err::<kind::ParenMismatch>("sin()", 3..5);
    }

    #[test]
    fn paren_issue() {
        let err = parse("sin(x").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::ParenMismatch>(),
            Some(&kind::ParenMismatch { issue: ParenIssue::Unclosed }),
        );
    }

    #[test]
    fn adjacent_operands() {
        parse_err::<kind::Syntax>("(1)(2)", 3..6);
        parse_err::<kind::Syntax>("1+(2)(3)", 0..8);
    }

    #[test]
    fn empty_input() {
        parse_err::<kind::Syntax>("", 0..0);
        parse_err::<kind::Syntax>("   ", 3..3);
    }

    #[test]
    fn missing_operand() {
        parse_err::<kind::OneOperandExpected>("x+", 0..2);
        parse_err::<kind::OneOperandExpected>("sin x", 0..5);
        parse_err::<kind::OneOperandExpected>("1 2", 0..3);
        parse_err::<kind::OneOperandExpected>("(1 2)", 1..4);
    }

    #[test]
    fn missing_operator() {
        parse_err::<kind::TwoOperandsExpected>("x sin y", 0..7);
    }

    #[test]
    fn operator_without_operands() {
        parse_err::<kind::ParameterExpected>("+", 0..1);
        parse_err::<kind::ParameterExpected>("cos", 0..3);
    }

    #[test]
    fn undefined_token() {
        parse_err::<kind::UndefinedToken>("2*foo(x)", 2..5);
        parse_err::<kind::UndefinedToken>("x # y", 2..3);
    }

    #[test]
    fn stack_overflow() {
        let source = format!("{}x{}", "(".repeat(150), ")".repeat(150));
        let err = parse(&source).unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::StackOverflow>(),
            Some(&kind::StackOverflow { limit: MAX_STACK_DEPTH }),
        );

        // nesting within the limit is fine
        let source = format!("{}x{}", "(".repeat(90), ")".repeat(90));
        assert_eq!(parse(&source).unwrap(), p('x'));
    }

    #[test]
    fn custom_stack_limit() {
        let err = Parser::new("1+2*3").with_stack_limit(4).parse().unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::StackOverflow>(),
            Some(&kind::StackOverflow { limit: 4 }),
        );
        assert!(Parser::new("1+2*3").with_stack_limit(7).parse().is_ok());
    }

    #[test]
    fn report() {
        let err = parse("1+(2").unwrap_err();
        let report = strip_ansi_escapes::strip_str(err.report_to_string("input", "1+(2").unwrap());
        assert!(report.contains("unbalanced parentheses"));
        assert!(report.contains("this parenthesis is never closed"));
    }
}
