use formula_parser::parser::ast::{Param, PARAM_COUNT};

/// A context to use when evaluating an expression, holding the value of every parameter.
///
/// Parameters that were never set evaluate to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Ctxt {
    /// The value of each parameter, indexed by [`Param::index`].
    params: [f64; PARAM_COUNT],
}

impl Default for Ctxt {
    fn default() -> Self {
        Self { params: [0.0; PARAM_COUNT] }
    }
}

impl Ctxt {
    /// Creates a new context with every parameter set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a parameter, returning the context.
    pub fn with_param(mut self, param: Param, value: f64) -> Self {
        self.set_param(param, value);
        self
    }

    /// Sets the value of a parameter.
    pub fn set_param(&mut self, param: Param, value: f64) {
        self.params[param.index()] = value;
    }

    /// Sets the value of the parameter at the given index. Indices outside `0..26` are ignored.
    pub fn set_param_index(&mut self, index: usize, value: f64) {
        if let Some(slot) = self.params.get_mut(index) {
            *slot = value;
        }
    }

    /// Returns the value of a parameter.
    pub fn get_param(&self, param: Param) -> f64 {
        self.params[param.index()]
    }

    /// Returns the values of all parameters, indexed by [`Param::index`].
    pub fn get_params(&self) -> &[f64; PARAM_COUNT] {
        &self.params
    }
}
