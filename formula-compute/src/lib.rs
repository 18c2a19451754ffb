//! Numerical evaluation, symbolic differentiation and simplification of the expression trees
//! produced by [`formula_parser`].
//!
//! ```
//! use formula_compute::{numerical::{ctxt::Ctxt, eval::Eval}, symbolic::derivative::derivative};
//! use formula_parser::{parse, parser::ast::Param};
//!
//! let x = Param::from_letter('x').unwrap();
//! let f = parse("x^3 + 2*x").unwrap();
//! let df = derivative(&f, x).unwrap();
//!
//! let ctxt = Ctxt::new().with_param(x, 2.0);
//! assert_eq!(df.eval(&ctxt), 14.0);
//! ```

pub mod numerical;
pub mod symbolic;
