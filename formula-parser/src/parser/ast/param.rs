use std::fmt;

/// The number of parameters available in a formula, one per letter `A` through `Z`.
pub const PARAM_COUNT: usize = 26;

/// A single-letter parameter of a formula, identified by its 0-based position in `A..=Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Param(u8);

impl Param {
    /// Creates the parameter at the given index, or [`None`] if the index is not in `0..26`.
    pub fn new(index: usize) -> Option<Self> {
        (index < PARAM_COUNT).then_some(Self(index as u8))
    }

    /// Creates the parameter named by the given letter. The letter is case-insensitive.
    pub fn from_letter(letter: char) -> Option<Self> {
        letter.is_ascii_alphabetic()
            .then(|| Self(letter.to_ascii_uppercase() as u8 - b'A'))
    }

    /// Returns the 0-based index of the parameter.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the uppercase letter naming the parameter.
    pub fn letter(self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter().to_ascii_lowercase())
    }
}

/// Selects which parameters [`Expr::contains_param`] looks for.
///
/// [`Expr::contains_param`]: super::expr::Expr::contains_param
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamQuery {
    /// Any parameter at all.
    All,

    /// Only the given parameter.
    Only(Param),
}

impl ParamQuery {
    /// Returns true if the given parameter is selected by this query.
    pub fn matches(self, param: Param) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == param,
        }
    }
}

impl From<Param> for ParamQuery {
    fn from(param: Param) -> Self {
        Self::Only(param)
    }
}
