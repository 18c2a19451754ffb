//! The operators and functions that can appear in a formula.

/// The precedence of an expression when it is printed. Higher variants bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any expression. Used inside parentheses, where nothing needs to be grouped.
    Any,

    /// Addition and subtraction.
    Term,

    /// Multiplication and division.
    Factor,

    /// Exponentiation.
    Pow,

    /// Numbers, parameters, function calls and negations, which never need extra parentheses.
    Atom,
}

/// The unary operation that is being performed. All variants except [`UnaryOpKind::Neg`] are
/// functions, written with a parenthesized argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOpKind {
    Abs,
    ArcSin,
    ArcCos,
    ArcTan,
    Cos,
    Exp,
    Ln,
    Log,
    Sin,
    Sqr,
    Sqrt,
    Tan,
    Neg,
}

impl UnaryOpKind {
    /// Every unary operation that is written as a function.
    pub const FUNCTIONS: [UnaryOpKind; 12] = [
        Self::Abs,
        Self::ArcSin,
        Self::ArcCos,
        Self::ArcTan,
        Self::Cos,
        Self::Exp,
        Self::Ln,
        Self::Log,
        Self::Sin,
        Self::Sqr,
        Self::Sqrt,
        Self::Tan,
    ];

    /// Returns true if the operation is written as a function call.
    pub fn is_function(self) -> bool {
        !matches!(self, Self::Neg)
    }

    /// Returns the lowercase name of the operation, as it is printed.
    pub fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::ArcSin => "arcsin",
            Self::ArcCos => "arccos",
            Self::ArcTan => "arctan",
            Self::Cos => "cos",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Sin => "sin",
            Self::Sqr => "sqr",
            Self::Sqrt => "sqrt",
            Self::Tan => "tan",
            Self::Neg => "-",
        }
    }
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOpKind {
    /// Returns the precedence of the binary operation.
    pub fn precedence(self) -> Precedence {
        match self {
            Self::Add | Self::Sub => Precedence::Term,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Pow => Precedence::Pow,
        }
    }

    /// Returns true if the operands of the operation can be swapped without changing its value.
    pub fn is_commutative(self) -> bool {
        matches!(self, Self::Add | Self::Mul)
    }

    /// Returns the symbol of the operation.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }
}
