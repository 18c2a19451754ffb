//! Symbolic manipulation of expressions.
//!
//! The operations in this module work directly on the [`Expr`] trees produced by
//! [`formula_parser`]. They never modify their input: every result is a freshly built tree.
//!
//! # Simplification
//!
//! [`simplify()`] makes one pass of rewrite rules over a tree, such as folding constant subtrees,
//! `x*1 = x` and `x-x = 0`. Since one rewrite can enable another, callers usually want
//! [`simplify_fully`], which repeats passes until the tree stops changing.
//!
//! # Differentiation
//!
//! [`derivative()`] differentiates a tree with respect to one parameter, then simplifies the
//! result.
//!
//! ```
//! use formula_compute::symbolic::derivative;
//! use formula_parser::{parse, parser::ast::Param};
//!
//! let t = Param::from_letter('t').unwrap();
//! let df = derivative(&parse("sin(t^2)").unwrap(), t).unwrap();
//! assert_eq!(df.to_string(), "cos(t^2)*(2*t)");
//! ```
//!
//! [`Expr`]: formula_parser::parser::ast::Expr

pub mod derivative;
pub mod simplify;
pub mod step_collector;

pub use derivative::{derivative, derivative_with, raw_derivative, DerivativeError};
pub use simplify::{simplify, simplify_fully, simplify_fully_with_steps, simplify_with};
pub use step_collector::StepCollector;

/// The number of passes the simplifier makes after reaching its fixed point when simplifying a
/// derivative.
pub const EXTRA_PASSES: usize = 10;
