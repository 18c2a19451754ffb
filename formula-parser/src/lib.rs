//! Reads single-letter algebraic formulas, such as `sin(t^2) - 3*x/(1 + y)`, into an [`Expr`]
//! tree using an operator-precedence parser.
//!
//! Formulas are case-insensitive. Every single letter is a parameter (`A` through `Z`), numbers
//! are plain decimals, and the functions `sin`, `cos`, `tan`, `arcsin`, `arccos`, `arctan`,
//! `sqrt`, `sqr`, `abs`, `ln`, `log` and `exp` take a parenthesized argument.
//!
//! ```
//! use formula_parser::{parse, parser::ast::Param};
//!
//! let expr = parse("sin(t^2)").unwrap();
//! assert_eq!(expr.to_string(), "sin(t^2)");
//! assert!(expr.contains_param(Param::from_letter('t').unwrap()));
//! ```

pub mod parser;
pub mod tokenizer;

pub use parser::{parse, Parser};
