pub mod ctxt;
pub mod eval;
