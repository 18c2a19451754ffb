pub mod kind;

pub use formula_error::Error;
