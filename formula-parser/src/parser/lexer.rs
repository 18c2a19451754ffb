use crate::tokenizer::{tokenize_complete, Token, TokenKind};
use levenshtein::levenshtein;
use std::ops::Range;
use super::{
    ast::{BinOpKind, Param, UnaryOpKind},
    error::{kind, Error},
    symbol::{Symbol, SymbolKind},
};

/// Returns the function named by the given keyword, ignoring case.
///
/// Inverse trigonometric functions are recognized as the prefix `ARC` followed by the keyword of
/// `SIN`, `COS` or `TAN`. The lexer also accepts blanks between the prefix and the keyword.
pub fn keyword(name: &str) -> Option<UnaryOpKind> {
    let upper = name.to_ascii_uppercase();
    if let Some(rest) = upper.strip_prefix("ARC") {
        return match keyword(rest)? {
            UnaryOpKind::Sin => Some(UnaryOpKind::ArcSin),
            UnaryOpKind::Cos => Some(UnaryOpKind::ArcCos),
            UnaryOpKind::Tan => Some(UnaryOpKind::ArcTan),
            _ => None,
        };
    }

    match upper.as_str() {
        "ABS" => Some(UnaryOpKind::Abs),
        "COS" => Some(UnaryOpKind::Cos),
        "EXP" => Some(UnaryOpKind::Exp),
        "LN" => Some(UnaryOpKind::Ln),
        "LOG" => Some(UnaryOpKind::Log),
        "SIN" => Some(UnaryOpKind::Sin),
        "SQR" => Some(UnaryOpKind::Sqr),
        "SQRT" => Some(UnaryOpKind::Sqrt),
        "TAN" => Some(UnaryOpKind::Tan),
        _ => None,
    }
}

/// Returns the name of the function whose spelling is closest to `name`, if any is close enough.
fn similar_function(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    UnaryOpKind::FUNCTIONS.iter()
        .map(|op| (op.name(), levenshtein(op.name(), &lower)))
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(name, _)| name)
}

/// Turns the tokens of a formula into [`Symbol`]s.
///
/// The lexer remembers the kind of the last symbol it produced, which decides whether a minus
/// sign is a negation or a subtraction. It can also hold one symbol that was handed back with
/// [`Lexer::unget`], which is returned again by the next call to [`Lexer::next_symbol`].
#[derive(Debug, Clone)]
pub struct Lexer<'source> {
    /// The tokens of the formula.
    tokens: Box<[Token<'source>]>,

    /// The index of the next token to read.
    cursor: usize,

    /// The length of the formula, used as the position of the end symbol.
    len: usize,

    /// The kind of the last symbol produced.
    previous: Option<SymbolKind>,

    /// A symbol that was handed back to the lexer.
    pending: Option<Symbol>,
}

impl<'source> Lexer<'source> {
    /// Creates a lexer over the given formula.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            len: source.len(),
            previous: None,
            pending: None,
        }
    }

    /// Hands a symbol back to the lexer. Only one symbol can be held at a time; handing back a
    /// second symbol replaces the first.
    pub fn unget(&mut self, symbol: Symbol) {
        debug_assert!(self.pending.is_none(), "only one symbol can be handed back");
        self.pending = Some(symbol);
    }

    /// Returns the next symbol of the formula. Once the formula is exhausted, every call returns a
    /// [`SymbolKind::End`] symbol.
    pub fn next_symbol(&mut self) -> Result<Symbol, Error> {
        if let Some(symbol) = self.pending.take() {
            return Ok(symbol);
        }

        let Some(token) = self.next_token() else {
            return Ok(Symbol {
                kind: SymbolKind::End,
                span: self.len..self.len,
            });
        };

        let mut span = token.span.clone();
        let kind = match token.kind {
            TokenKind::Number => SymbolKind::Number(token.lexeme.parse().map_err(|_| undefined(&token))?),
            TokenKind::Name if token.lexeme.eq_ignore_ascii_case("arc") => {
                let (op, end) = self.arc_function(&token)?;
                span.end = end;
                SymbolKind::Function(op)
            },
            TokenKind::Name => classify_name(&token)?,
            TokenKind::Add => SymbolKind::Binary(BinOpKind::Add),
            TokenKind::Sub => match self.previous {
                None => SymbolKind::Neg,
                Some(previous) if previous.expects_operand() => SymbolKind::Neg,
                Some(_) => SymbolKind::Binary(BinOpKind::Sub),
            },
            TokenKind::Mul => SymbolKind::Binary(BinOpKind::Mul),
            TokenKind::Div => SymbolKind::Binary(BinOpKind::Div),
            TokenKind::Exp => SymbolKind::Binary(BinOpKind::Pow),
            TokenKind::OpenParen => SymbolKind::OpenParen,
            TokenKind::CloseParen => SymbolKind::CloseParen,
            TokenKind::Whitespace | TokenKind::Symbol => return Err(undefined(&token)),
        };

        self.previous = Some(kind);
        Ok(Symbol { kind, span })
    }

    /// Reads the keyword following a lone `ARC` prefix, as in `arc sin(x)`. Returns the function
    /// and the end of its keyword.
    fn arc_function(&mut self, arc: &Token) -> Result<(UnaryOpKind, usize), Error> {
        let name = match self.next_token() {
            Some(name) if name.kind == TokenKind::Name => name,
            _ => return Err(undefined(arc)),
        };

        let joined = format!("{}{}", arc.lexeme, name.lexeme);
        let span = arc.span.start..name.span.end;
        match keyword(&joined) {
            Some(op) => Ok((op, span.end)),
            None => {
                let suggestion = similar_function(&joined);
                Err(undefined_name(joined, span, suggestion))
            },
        }
    }

    /// Returns the next non-whitespace token.
    fn next_token(&mut self) -> Option<Token<'source>> {
        while let Some(token) = self.tokens.get(self.cursor) {
            self.cursor += 1;
            if !token.is_whitespace() {
                return Some(token.clone());
            }
        }
        None
    }
}

/// Classifies a run of letters as a parameter or a function keyword.
fn classify_name(token: &Token) -> Result<SymbolKind, Error> {
    let mut chars = token.lexeme.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        return Param::from_letter(letter)
            .map(SymbolKind::Param)
            .ok_or_else(|| undefined(token));
    }

    keyword(token.lexeme)
        .map(SymbolKind::Function)
        .ok_or_else(|| undefined(token))
}

/// Builds the error for a token that could not be classified.
fn undefined(token: &Token) -> Error {
    let suggestion = match token.kind {
        TokenKind::Name => similar_function(token.lexeme),
        _ => None,
    };
    undefined_name(token.lexeme.to_string(), token.span.clone(), suggestion)
}

fn undefined_name(name: String, span: Range<usize>, suggestion: Option<&'static str>) -> Error {
    Error::new(vec![span], kind::UndefinedToken { name, suggestion })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Lexes the whole input and returns the kinds of the symbols, excluding the end symbol.
    fn kinds(input: &str) -> Vec<SymbolKind> {
        let mut lexer = Lexer::new(input);
        let mut kinds = Vec::new();
        loop {
            let symbol = lexer.next_symbol().unwrap();
            if symbol.kind == SymbolKind::End {
                return kinds;
            }
            kinds.push(symbol.kind);
        }
    }

    fn param(letter: char) -> SymbolKind {
        SymbolKind::Param(Param::from_letter(letter).unwrap())
    }

    #[test]
    fn keywords() {
        assert_eq!(keyword("sin"), Some(UnaryOpKind::Sin));
        assert_eq!(keyword("SQR"), Some(UnaryOpKind::Sqr));
        assert_eq!(keyword("Sqrt"), Some(UnaryOpKind::Sqrt));
        assert_eq!(keyword("arcTan"), Some(UnaryOpKind::ArcTan));
        assert_eq!(keyword("arcsqrt"), None);
        assert_eq!(keyword("arc"), None);
        assert_eq!(keyword("sinh"), None);
    }

    #[test]
    fn params_and_numbers() {
        assert_eq!(
            kinds("x * 2.5 / Y"),
            vec![
                param('x'),
                SymbolKind::Binary(BinOpKind::Mul),
                SymbolKind::Number(2.5),
                SymbolKind::Binary(BinOpKind::Div),
                param('y'),
            ],
        );
    }

    #[test]
    fn unary_and_binary_minus() {
        assert_eq!(
            kinds("-x-(-1)--2^-y"),
            vec![
                SymbolKind::Neg,
                param('x'),
                SymbolKind::Binary(BinOpKind::Sub),
                SymbolKind::OpenParen,
                SymbolKind::Neg,
                SymbolKind::Number(1.0),
                SymbolKind::CloseParen,
                SymbolKind::Binary(BinOpKind::Sub),
                SymbolKind::Neg,
                SymbolKind::Number(2.0),
                SymbolKind::Binary(BinOpKind::Pow),
                SymbolKind::Neg,
                param('y'),
            ],
        );
    }

    #[test]
    fn minus_after_function_keyword_is_binary() {
        assert_eq!(
            kinds("sin-x"),
            vec![
                SymbolKind::Function(UnaryOpKind::Sin),
                SymbolKind::Binary(BinOpKind::Sub),
                param('x'),
            ],
        );
    }

    #[test]
    fn unget_returns_the_same_symbol() {
        let mut lexer = Lexer::new("a - b");
        let a = lexer.next_symbol().unwrap();
        lexer.unget(a.clone());
        assert_eq!(lexer.next_symbol().unwrap(), a);

        // the minus still follows a parameter
        assert_eq!(lexer.next_symbol().unwrap().kind, SymbolKind::Binary(BinOpKind::Sub));
    }

    #[test]
    fn end_is_repeated() {
        let mut lexer = Lexer::new("  ");
        assert_eq!(lexer.next_symbol().unwrap(), Symbol { kind: SymbolKind::End, span: 2..2 });
        assert_eq!(lexer.next_symbol().unwrap(), Symbol { kind: SymbolKind::End, span: 2..2 });
    }

    #[test]
    fn undefined_token_with_suggestion() {
        let err = Lexer::new("sine(x)").next_symbol().unwrap_err();
        assert_eq!(err.spans, vec![0..4]);
        assert_eq!(
            err.downcast_ref::<kind::UndefinedToken>(),
            Some(&kind::UndefinedToken { name: "sine".to_string(), suggestion: Some("sin") }),
        );
    }

    #[test]
    fn suggestion_within_two_edits() {
        let err = Lexer::new("arcsni(x)").next_symbol().unwrap_err();
        assert_eq!(err.spans, vec![0..6]);
        assert_eq!(
            err.downcast_ref::<kind::UndefinedToken>(),
            Some(&kind::UndefinedToken { name: "arcsni".to_string(), suggestion: Some("arcsin") }),
        );
    }

    #[test]
    fn arc_prefix_separated_by_blanks() {
        let mut lexer = Lexer::new("arc sin(x)");
        assert_eq!(
            lexer.next_symbol().unwrap(),
            Symbol { kind: SymbolKind::Function(UnaryOpKind::ArcSin), span: 0..7 },
        );
        assert_eq!(lexer.next_symbol().unwrap().kind, SymbolKind::OpenParen);

        assert_eq!(kinds("ARC  cos"), vec![SymbolKind::Function(UnaryOpKind::ArcCos)]);
    }

    #[test]
    fn arc_prefix_with_unknown_keyword() {
        let err = Lexer::new("arc sine").next_symbol().unwrap_err();
        assert_eq!(err.spans, vec![0..8]);
        assert_eq!(
            err.downcast_ref::<kind::UndefinedToken>(),
            Some(&kind::UndefinedToken { name: "arcsine".to_string(), suggestion: Some("arcsin") }),
        );

        let err = Lexer::new("arc (x)").next_symbol().unwrap_err();
        assert_eq!(err.spans, vec![0..3]);
        assert!(err.is::<kind::UndefinedToken>());
    }

    #[test]
    fn undefined_token_without_suggestion() {
        let mut lexer = Lexer::new("x + $");
        lexer.next_symbol().unwrap();
        lexer.next_symbol().unwrap();
        let err = lexer.next_symbol().unwrap_err();
        assert_eq!(err.spans, vec![4..5]);
        assert_eq!(
            err.downcast_ref::<kind::UndefinedToken>(),
            Some(&kind::UndefinedToken { name: "$".to_string(), suggestion: None }),
        );
    }

    #[test]
    fn multi_letter_names_are_not_params() {
        let err = Lexer::new("xyz").next_symbol().unwrap_err();
        assert!(err.is::<kind::UndefinedToken>());
    }
}
