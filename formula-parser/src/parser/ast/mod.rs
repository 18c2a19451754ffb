//! The expression tree produced by the parser, and the operations that build and transform it.

pub mod expr;
mod fmt;
pub mod op;
mod ops;
pub mod param;

pub use expr::Expr;
pub use op::{BinOpKind, Precedence, UnaryOpKind};
pub use param::{Param, ParamQuery, PARAM_COUNT};
