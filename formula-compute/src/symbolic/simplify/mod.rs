//! Module to simplify expressions.
//!
//! A single call to [`simplify`] makes one pass over the tree. At every node, the pass first
//! folds the node into a number if it has no parameters, then rotates chains of `+` and `*` so
//! that constants buried deeper in the chain can meet each other, and finally tries the rewrite
//! rules in [`rules`] for the node's kind. If no rule applies, the node is rebuilt from its
//! simplified children. The input tree is never modified.
//!
//! The pass reports whether it changed anything. [`simplify_fully`] repeats passes until nothing
//! changes, then runs a few extra passes, since rotations alone do not count as a change but can
//! still expose new folds on a later pass.
//!
//! ```
//! use formula_compute::symbolic::simplify::simplify_fully;
//! use formula_parser::parse;
//!
//! let expr = parse("(x+1)+2").unwrap();
//! assert_eq!(simplify_fully(&expr, 10), parse("x+3").unwrap());
//! ```

pub mod rules;
pub mod step;

use crate::numerical::eval::Eval;
use formula_parser::parser::ast::{Expr, ParamQuery};
use log::{debug, trace};
use step::Step;
use super::step_collector::StepCollector;

/// The state of one pass over an expression tree.
pub struct Pass<'a> {
    /// Receives every step taken during the pass.
    step_collector: &'a mut dyn StepCollector<Step>,

    /// Whether a rule other than a rotation was applied.
    changed: bool,
}

impl<'a> Pass<'a> {
    fn new(step_collector: &'a mut dyn StepCollector<Step>) -> Self {
        Self { step_collector, changed: false }
    }

    /// Records a step that changes the expression.
    pub(crate) fn apply(&mut self, step: Step) {
        trace!("simplify: {:?}", step);
        self.changed = true;
        self.step_collector.push(step);
    }

    /// Records a step that only rearranges the expression.
    pub(crate) fn rearrange(&mut self, step: Step) {
        trace!("simplify: {:?}", step);
        self.step_collector.push(step);
    }

    /// Simplifies the given expression, returning a new tree.
    pub fn optimize(&mut self, expr: &Expr) -> Expr {
        if !matches!(expr, Expr::Number(_)) && !expr.contains_param(ParamQuery::All) {
            self.apply(Step::ConstantFold);
            return Expr::Number(expr.eval_default());
        }

        let expr = rules::rotate(expr, self);
        if let Some(simplified) = rules::all(&expr, self) {
            return simplified;
        }

        match &*expr {
            Expr::Number(value) => Expr::Number(*value),
            Expr::Param(param) => Expr::Param(*param),
            Expr::Unary { op, operand } => Expr::unary(*op, self.optimize(operand)),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.optimize(lhs);
                let rhs = self.optimize(rhs);
                Expr::binary(*op, lhs, rhs)
            },
        }
    }
}

/// Makes one simplification pass over the expression. Returns the simplified expression, and
/// whether any rule other than a rotation was applied.
pub fn simplify(expr: &Expr) -> (Expr, bool) {
    simplify_with(expr, &mut ())
}

/// Makes one simplification pass over the expression, collecting the steps taken into the given
/// collector.
pub fn simplify_with(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> (Expr, bool) {
    let mut pass = Pass::new(step_collector);
    let simplified = pass.optimize(expr);
    (simplified, pass.changed)
}

/// Base implementation of [`simplify_fully`].
fn inner_simplify_fully(
    expr: &Expr,
    extra_passes: usize,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let mut expr = expr.clone();
    let mut passes = 0;
    loop {
        let (simplified, changed) = simplify_with(&expr, step_collector);
        expr = simplified;
        passes += 1;
        if !changed {
            break;
        }
    }

    for _ in 0..extra_passes {
        expr = simplify_with(&expr, step_collector).0;
    }

    debug!("simplified in {} passes, plus {} extra passes", passes, extra_passes);
    expr
}

/// Simplifies the expression until a pass no longer changes it, then makes `extra_passes` more
/// passes.
pub fn simplify_fully(expr: &Expr, extra_passes: usize) -> Expr {
    inner_simplify_fully(expr, extra_passes, &mut ())
}

/// Simplifies the expression like [`simplify_fully`]. The steps taken by the simplifier will also
/// be collected and returned.
pub fn simplify_fully_with_steps(expr: &Expr, extra_passes: usize) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = inner_simplify_fully(expr, extra_passes, &mut steps);
    (expr, steps)
}
