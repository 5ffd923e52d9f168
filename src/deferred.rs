use std::any::type_name;

use crate::{LResult, LazyValue};

pub use fallible::TryDeferred;

mod fallible;

pub type Producer<T> = Box<dyn FnMut() -> T>;

/// Holds either the producer or the value it produced, never both.
#[derive(Clone)]
enum Slot<T, F> {
    Producer(F),
    Value(T),
}

/// A value computed by `F` on first access and cached afterwards.
///
/// The producer runs at most once per instance. It only gets replaced
/// by its value once it returns, so if it panics the instance keeps
/// the producer and the next access runs it again.
///
/// Cloning an unevaluated `Deferred` clones the producer,
/// each clone then evaluates on its own. Use [`crate::Shared`]
/// to share one evaluation between several owners.
#[derive(Clone)]
pub struct Deferred<T, F = Producer<T>> {
    slot: Slot<T, F>,
}

impl<T, F: FnMut() -> T> Deferred<T, F> {
    /// `producer` is stored, not called.
    pub const fn new(producer: F) -> Self {
        Self {
            slot: Slot::Producer(producer),
        }
    }

    /// Evaluates if needed and returns the owned value.
    pub fn into_value(self) -> T {
        match self.slot {
            Slot::Value(value) => value,
            Slot::Producer(mut produce) => {
                tracing::trace!(value = type_name::<T>(), "evaluating deferred value");
                produce()
            }
        }
    }

    fn evaluate(&mut self) -> &mut T {
        if let Slot::Producer(produce) = &mut self.slot {
            tracing::trace!(value = type_name::<T>(), "evaluating deferred value");
            let value = produce();
            self.slot = Slot::Value(value);
        }

        match &mut self.slot {
            Slot::Value(value) => value,
            Slot::Producer(_) => unreachable!("the producer was just replaced by its value"),
        }
    }
}

impl<T> Deferred<T> {
    /// Boxes the producer, so deferred values built from
    /// different closures share one type.
    pub fn boxed(producer: impl FnMut() -> T + 'static) -> Self {
        Self::new(Box::new(producer))
    }

    /// A deferred value that starts out evaluated.
    pub const fn evaluated(value: T) -> Self {
        Self {
            slot: Slot::Value(value),
        }
    }
}

impl<T, F: FnMut() -> T> LazyValue<T> for Deferred<T, F> {
    fn try_get_value(&mut self) -> LResult<&mut T> {
        Ok(self.evaluate())
    }

    fn get_value(&mut self) -> &mut T {
        self.evaluate()
    }

    fn peek(&self) -> Option<&T> {
        match &self.slot {
            Slot::Value(value) => Some(value),
            Slot::Producer(_) => None,
        }
    }

    fn is_evaluated(&self) -> bool {
        matches!(self.slot, Slot::Value(_))
    }

    fn reassign(&mut self, value: T) {
        if !self.is_evaluated() {
            tracing::trace!(
                value = type_name::<T>(),
                "reassigned before evaluation, dropping producer"
            );
        }

        self.slot = Slot::Value(value);
    }
}

impl<T: std::fmt::Debug, F> std::fmt::Debug for Deferred<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tuple = f.debug_tuple(stringify!(Deferred));

        match &self.slot {
            Slot::Value(value) => tuple.field(value),
            Slot::Producer(_) => tuple.field(&format_args!("<unevaluated>")),
        }
        .finish()
    }
}
