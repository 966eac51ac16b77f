/// A type that collects the steps taken while transforming a tree.
///
/// [`StepCollector`] is also implemented for the unit type `()`, which discards every step. Use
/// it when only the final tree matters.
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
