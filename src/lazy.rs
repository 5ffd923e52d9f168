use crate::LResult;

/// A container that produces its value on demand, caches it,
/// and allows the cached value to be overwritten.
///
/// Evaluation takes `&mut self`: reading the value of a strategy
/// that has not been evaluated yet is a mutation.
/// See [`crate::Shared`] for access through a shared reference.
pub trait LazyValue<T> {
    /// Returns the up-to-date value, evaluating it first if needed.
    ///
    /// This is the only place where a strategy may run its producer.
    /// Strategies that cannot fail always return `Ok`.
    fn try_get_value(&mut self) -> LResult<&mut T>;

    /// The cached value, without evaluating.
    fn peek(&self) -> Option<&T>;

    fn is_evaluated(&self) -> bool;

    /// Overwrites the value, discarding a pending producer.
    /// The value counts as evaluated afterwards.
    fn reassign(&mut self, value: T);

    /// Infallible variant of [`LazyValue::try_get_value`].
    ///
    /// # Panics
    /// if a fallible producer returns an error.
    fn get_value(&mut self) -> &mut T {
        match self.try_get_value() {
            Ok(value) => value,
            Err(e) => panic!("lazy value failed to evaluate: {e}"),
        }
    }
}
