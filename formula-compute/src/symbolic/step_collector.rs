/// A type that collects the steps of an algorithm.
///
/// [`StepCollector`] is implemented for the unit type `()`, which discards every step, and for
/// [`Vec`], which records them in the order they were taken.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
